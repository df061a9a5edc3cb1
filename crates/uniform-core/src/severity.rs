use http::StatusCode;

/// Severity class attached to an error kind
///
/// Drives which leveled logging call receives the per-request summary
/// line emitted by the boundary middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Diagnostic detail, normally filtered out in production
    Debug,
    /// Expected client-facing failures (4xx and the ok path)
    Info,
    /// Suspicious but survivable conditions
    Warn,
    /// Server-side faults
    Error,
}

impl Severity {
    /// Default severity for an HTTP status
    ///
    /// Client errors are routine and logged at info; anything in the
    /// 5xx range is a server fault and logged at error.
    #[must_use]
    pub fn for_status(status: StatusCode) -> Self {
        if status.as_u16() < 500 { Self::Info } else { Self::Error }
    }
}
