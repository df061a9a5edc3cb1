use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::request::Parts;
use serde::Serialize;
use serde_json::Value;
use uniform_core::{AppError, BoxError, Raised, ReplyState, representative};

/// Per-request surface for attaching a payload and raising errors
///
/// Injected into request extensions by the formatting middleware and
/// obtained in handlers as an extractor. Clones share the same
/// request-scoped state.
#[derive(Clone, Default)]
pub struct Reply {
    state: Arc<Mutex<ReplyState>>,
}

impl Reply {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Attach the response payload
    ///
    /// At most one payload per request; a second call is ignored past
    /// a warning. A payload that fails JSON serialization is recorded
    /// as an unclassified error and the request resolves to the
    /// unknown-error sentinel.
    pub fn data<T: Serialize>(&self, data: T) {
        match serde_json::to_value(data) {
            Ok(value) => self.lock().set_data(value),
            Err(err) => self.lock().push(Raised::Other(Box::new(err))),
        }
    }

    /// Raise a classified error occurrence
    pub fn error(&self, err: AppError) {
        self.lock().push(Raised::App(err));
    }

    /// Record a foreign error
    ///
    /// Surfaces to the caller as the unknown-error sentinel; the cause
    /// only reaches the logs.
    pub fn fail(&self, err: impl Into<BoxError>) {
        self.lock().push(Raised::Other(err.into()));
    }

    /// Resolve a handler result: `Ok` attaches the payload, `Err`
    /// raises the error
    pub fn complete<T: Serialize>(&self, result: Result<T, AppError>) {
        match result {
            Ok(data) => self.data(data),
            Err(err) => self.error(err),
        }
    }

    /// Close out the request: pick the representative error and take
    /// the payload
    ///
    /// Unclassified causes are logged here so they reach operators
    /// without ever being written to the wire.
    pub(crate) fn finish(&self) -> (AppError, Option<Value>) {
        let mut state = self.lock();
        let picked = representative(state.errors());
        for raised in state.errors() {
            if let Raised::Other(cause) = raised {
                tracing::debug!(%cause, "unclassified error raised during request");
            }
        }
        let data = state.take_data();
        (picked, data)
    }

    fn lock(&self) -> MutexGuard<'_, ReplyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reply").finish_non_exhaustive()
    }
}

impl<S> FromRequestParts<S> for Reply
where
    S: Send + Sync,
{
    type Rejection = MissingFormatter;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or(MissingFormatter)
    }
}

/// Rejection when the formatting middleware is not installed
///
/// Using the [`Reply`] extractor without attaching the formatter is a
/// wiring bug, reported loudly as a 500.
#[derive(Debug, thiserror::Error)]
#[error("uniform response middleware is not installed")]
pub struct MissingFormatter;

impl IntoResponse for MissingFormatter {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniform_core::ErrorKind;

    #[test]
    fn complete_ok_attaches_data() {
        let reply = Reply::new();
        reply.complete(Ok("payload"));
        let (picked, data) = reply.finish();
        assert_eq!(picked.code(), 0);
        assert_eq!(data, Some(Value::from("payload")));
    }

    #[test]
    fn complete_err_raises_the_error() {
        let kind = ErrorKind::register(StatusCode::NOT_FOUND, 10010, "foo message");
        let reply = Reply::new();
        reply.complete(Err::<(), _>(kind.err()));
        let (picked, data) = reply.finish();
        assert_eq!(picked.code(), 10010);
        assert_eq!(data, None);
    }

    #[test]
    fn foreign_failures_resolve_to_unknown() {
        let reply = Reply::new();
        reply.fail(std::io::Error::other("disk on fire"));
        let (picked, _) = reply.finish();
        assert_eq!(picked.code(), 1);
        assert_eq!(picked.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn clones_share_request_state() {
        let reply = Reply::new();
        let clone = reply.clone();
        clone.data("foo");
        let (_, data) = reply.finish();
        assert_eq!(data, Some(Value::from("foo")));
    }
}
