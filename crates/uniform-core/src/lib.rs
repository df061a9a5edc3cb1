//! Core error-classification model for uniform
//!
//! Transport-agnostic pieces: registered error kinds, raised error
//! occurrences, the locale translation hook, and the per-request reply
//! state the boundary middleware resolves into a response envelope.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod kind;
mod reply;
mod severity;
mod translate;

pub use error::{AppError, CapturedTrace};
pub use kind::ErrorKind;
pub use reply::{BoxError, Envelope, Raised, ReplyState, representative};
pub use severity::Severity;
pub use translate::{EchoTranslator, Translate};
