use http::StatusCode;

use crate::error::AppError;
use crate::severity::Severity;

/// Immutable descriptor for one kind of failure
///
/// Registered once at process start and shared freely afterwards; the
/// value is `Copy` and never mutated, so concurrent reads from many
/// request tasks need no synchronization. Code uniqueness across kinds
/// is the registrant's responsibility and is not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKind {
    code: u32,
    status: StatusCode,
    severity: Severity,
    template: &'static str,
}

impl ErrorKind {
    /// Sentinel for the success path: code 0, HTTP 200
    pub const NIL: Self = Self::new(StatusCode::OK, 0, Severity::Info, "ok");

    /// Sentinel for unclassified failures: code 1, HTTP 500
    pub const UNKNOWN: Self =
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, 1, Severity::Error, "unknown error");

    /// Create a kind with every field explicit
    #[must_use]
    pub const fn new(status: StatusCode, code: u32, severity: Severity, template: &'static str) -> Self {
        Self { code, status, severity, template }
    }

    /// Register a kind, deriving the default severity from the status
    ///
    /// Intended to run during process initialization; nothing prevents
    /// later calls, but kinds are meant to live for the whole process.
    #[must_use]
    pub fn register(status: StatusCode, code: u32, template: &'static str) -> Self {
        Self::new(status, code, Severity::for_status(status), template)
    }

    /// Override the derived severity
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Numeric identifier of this kind
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// HTTP status emitted when this kind is the representative error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Severity the boundary middleware logs this kind at
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Message template, also the translation lookup key
    #[must_use]
    pub const fn template(&self) -> &'static str {
        self.template
    }

    /// Raise an occurrence of this kind with no arguments
    ///
    /// Records the caller's file and line for diagnostics.
    #[track_caller]
    #[must_use]
    pub fn err(&self) -> AppError {
        AppError::from_kind(*self, Vec::new())
    }

    /// Raise an occurrence carrying positional message arguments
    #[track_caller]
    #[must_use]
    pub fn err_with<I>(&self, args: I) -> AppError
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        AppError::from_kind(*self, args.into_iter().map(|arg| arg.to_string()).collect())
    }

    /// Whether `err` wraps an occurrence of this kind
    ///
    /// Unwraps exactly one level via [`std::error::Error::source`] and
    /// compares codes; anything whose source is not an [`AppError`] is
    /// not a match.
    #[must_use]
    pub fn matches(&self, err: &(dyn std::error::Error + 'static)) -> bool {
        err.source()
            .and_then(|source| source.downcast_ref::<AppError>())
            .is_some_and(|app| app.code() == self.code)
    }
}
