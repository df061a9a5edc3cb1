use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header;
use uniform_core::{Envelope, Severity};

use crate::Formatter;
use crate::locale::resolve_locale;
use crate::reply::Reply;

/// Boundary middleware: resolve every request to the uniform envelope
///
/// Defers until the inner handler chain has fully run, then selects
/// the representative error from the request's bag, translates its
/// message for the caller's locale, logs a severity-routed summary
/// line, and responds with the error's registered HTTP status and the
/// JSON envelope. Always produces a response; handler failures are bag
/// entries, never panics across this boundary.
pub async fn format_middleware(formatter: Formatter, mut request: Request, next: Next) -> Response {
    let locale = resolve_locale(&request);

    let reply = Reply::new();
    request.extensions_mut().insert(reply.clone());

    let inner = next.run(request).await;

    let (picked, data) = reply.finish();
    let status = picked.status();
    let envelope = Envelope {
        code: picked.code(),
        message: picked.message(formatter.translator(), &locale),
        data,
    };

    match picked.severity() {
        Severity::Debug => tracing::debug!(
            code = envelope.code,
            message = %envelope.message,
            http_status = status.as_u16(),
            "request recorded",
        ),
        Severity::Warn => tracing::warn!(
            code = envelope.code,
            message = %envelope.message,
            http_status = status.as_u16(),
            "request recorded",
        ),
        Severity::Error => tracing::error!(
            code = envelope.code,
            message = %envelope.message,
            http_status = status.as_u16(),
            "request recorded",
        ),
        Severity::Info => tracing::info!(
            code = envelope.code,
            message = %envelope.message,
            http_status = status.as_u16(),
            "request recorded",
        ),
    }

    let mut response = (status, Json(envelope)).into_response();

    // Handler-set headers survive; the body framing belongs to the envelope
    let (inner_parts, _discarded_body) = inner.into_parts();
    for (name, value) in &inner_parts.headers {
        if *name != header::CONTENT_TYPE && *name != header::CONTENT_LENGTH {
            response.headers_mut().append(name.clone(), value.clone());
        }
    }

    response
}
