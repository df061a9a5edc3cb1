//! axum boundary middleware for uniform
//!
//! Wraps a router so every request resolves to one JSON envelope
//! `{"code", "message", "data"}`: handlers attach payloads and raise
//! classified errors through the [`Reply`] surface, and the middleware
//! picks the representative error, translates its message for the
//! caller's locale, logs a severity-routed summary line, and responds
//! with the error's registered HTTP status.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod locale;
mod middleware;
mod reply;

use std::sync::Arc;

use axum::Router;

pub use locale::resolve_locale;
pub use middleware::format_middleware;
pub use reply::{MissingFormatter, Reply};
pub use uniform_core::{
    AppError, BoxError, CapturedTrace, EchoTranslator, Envelope, ErrorKind, Raised, Severity,
    Translate,
};

/// Boundary middleware configuration
///
/// Built once before serving begins and read-only thereafter; cloning
/// shares the translator. The default configuration echoes translation
/// keys back unchanged.
#[derive(Clone)]
pub struct Formatter {
    translator: Arc<dyn Translate>,
}

impl Formatter {
    /// Configuration with the identity translator
    #[must_use]
    pub fn new() -> Self {
        Self {
            translator: Arc::new(EchoTranslator),
        }
    }

    /// Inject a translation catalog
    #[must_use]
    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    pub(crate) fn translator(&self) -> &dyn Translate {
        self.translator.as_ref()
    }

    /// Wrap `router` with the response-formatting middleware
    pub fn attach(self, router: Router) -> Router {
        router.layer(axum::middleware::from_fn(move |request, next| {
            let formatter = self.clone();
            async move { format_middleware(formatter, request, next).await }
        }))
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter").finish_non_exhaustive()
    }
}
