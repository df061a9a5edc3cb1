use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::kind::ErrorKind;

/// Boxed foreign error as accumulated in the per-request bag
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One entry in a request's error bag
///
/// Typed occurrences keep their full classification; everything else
/// is carried opaquely and only ever surfaces to the caller as the
/// unknown-error sentinel.
#[derive(Debug)]
pub enum Raised {
    /// An occurrence produced by a registered [`ErrorKind`]
    App(AppError),
    /// Any other error raised while handling the request
    Other(BoxError),
}

impl From<AppError> for Raised {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

/// Mutable per-request reply state: ordered error bag plus one data slot
///
/// Owned by a single request's flow of control; dropped when the
/// request completes.
#[derive(Debug, Default)]
pub struct ReplyState {
    errors: Vec<Raised>,
    data: Option<Value>,
}

impl ReplyState {
    /// Append a raised error, preserving raise order
    pub fn push(&mut self, raised: Raised) {
        self.errors.push(raised);
    }

    /// Attach the response payload
    ///
    /// At most one payload per request: a second call is ignored past
    /// a warning, guarding against double-write bugs without failing
    /// the request.
    pub fn set_data(&mut self, value: Value) {
        if self.data.is_some() {
            tracing::warn!("response data already set, ignoring");
            return;
        }
        self.data = Some(value);
    }

    /// Errors raised so far, in raise order
    #[must_use]
    pub fn errors(&self) -> &[Raised] {
        &self.errors
    }

    /// Take the attached payload, leaving the slot empty
    pub fn take_data(&mut self) -> Option<Value> {
        self.data.take()
    }
}

/// Pick the single error that represents this request's outcome
///
/// Empty bag means success (the nil sentinel). Otherwise the first
/// typed occurrence wins regardless of foreign errors raised around
/// it; a bag holding only foreign errors resolves to the unknown
/// sentinel so a failed request is never reported as success.
#[must_use]
pub fn representative(errors: &[Raised]) -> AppError {
    if errors.is_empty() {
        return ErrorKind::NIL.err();
    }
    for raised in errors {
        if let Raised::App(err) = raised {
            return err.clone();
        }
    }
    ErrorKind::UNKNOWN.err()
}

/// Uniform response body
///
/// Field names are fixed for wire compatibility; `data` serializes as
/// `null` when no payload was attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Numeric code of the representative error (0 on success)
    pub code: u32,
    /// Localized caller-facing message
    pub message: String,
    /// Handler-attached payload, if any
    pub data: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn foreign(msg: &str) -> Raised {
        Raised::Other(Box::new(std::io::Error::other(msg.to_owned())))
    }

    #[test]
    fn empty_bag_resolves_to_nil() {
        let picked = representative(&[]);
        assert_eq!(picked.code(), 0);
        assert_eq!(picked.status(), StatusCode::OK);
    }

    #[test]
    fn foreign_only_bag_resolves_to_unknown() {
        let bag = vec![foreign("a"), foreign("b")];
        let picked = representative(&bag);
        assert_eq!(picked.code(), 1);
        assert_eq!(picked.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn first_typed_error_wins_over_position() {
        let first = ErrorKind::register(StatusCode::NOT_FOUND, 10010, "first");
        let second = ErrorKind::register(StatusCode::CONFLICT, 10011, "second");
        let bag = vec![
            foreign("before"),
            Raised::App(first.err()),
            Raised::App(second.err()),
            foreign("after"),
        ];
        let picked = representative(&bag);
        assert_eq!(picked.code(), 10010);
        assert_eq!(picked.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn selection_is_idempotent() {
        let kind = ErrorKind::register(StatusCode::NOT_FOUND, 10010, "first");
        let bag = vec![foreign("x"), Raised::App(kind.err())];
        assert_eq!(representative(&bag).code(), representative(&bag).code());
    }

    #[test]
    fn second_data_attachment_is_ignored() {
        let mut state = ReplyState::default();
        state.set_data(Value::from("first"));
        state.set_data(Value::from("second"));
        assert_eq!(state.take_data(), Some(Value::from("first")));
    }

    #[test]
    fn envelope_serializes_null_data() {
        let envelope = Envelope {
            code: 10010,
            message: "foo message".to_owned(),
            data: None,
        };
        let wire = serde_json::to_string(&envelope).unwrap();
        assert_eq!(wire, r#"{"code":10010,"message":"foo message","data":null}"#);
    }
}
