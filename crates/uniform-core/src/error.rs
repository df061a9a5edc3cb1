use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;

use crate::kind::ErrorKind;
use crate::severity::Severity;
use crate::translate::Translate;
use http::StatusCode;

/// Bounded snapshot of the backtrace at a raise site
///
/// Capture is best-effort: it only happens when the runtime has
/// backtraces enabled (`RUST_BACKTRACE`), and the rendered trace is
/// clipped to a fixed number of lines. Absence is not an error.
#[derive(Debug, Clone)]
pub struct CapturedTrace {
    lines: Vec<String>,
}

impl CapturedTrace {
    const MAX_LINES: usize = 64;

    fn capture() -> Option<Self> {
        let backtrace = Backtrace::capture();
        if backtrace.status() != BacktraceStatus::Captured {
            return None;
        }
        let lines = backtrace
            .to_string()
            .lines()
            .take(Self::MAX_LINES)
            .map(str::to_owned)
            .collect();
        Some(Self { lines })
    }

    /// Rendered trace lines, oldest frame last
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// One concrete occurrence of a registered error kind
///
/// Carries the kind's classification plus call-time arguments, the
/// source location of the raise site, and an optional stack snapshot.
/// Immutable once created; owned by the request that raised it.
#[derive(Debug, Clone)]
pub struct AppError {
    kind: ErrorKind,
    args: Vec<String>,
    file: &'static str,
    line: u32,
    trace: Option<CapturedTrace>,
}

impl AppError {
    #[track_caller]
    pub(crate) fn from_kind(kind: ErrorKind, args: Vec<String>) -> Self {
        let location = Location::caller();
        Self {
            kind,
            args,
            file: location.file(),
            line: location.line(),
            trace: CapturedTrace::capture(),
        }
    }

    /// The kind this occurrence was raised from
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Numeric code of the underlying kind
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.kind.code()
    }

    /// HTTP status of the underlying kind
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Severity of the underlying kind
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Positional message arguments supplied at the raise site
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Source file of the raise site
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Source line of the raise site
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Stack snapshot, if backtraces were enabled at the raise site
    #[must_use]
    pub const fn trace(&self) -> Option<&CapturedTrace> {
        self.trace.as_ref()
    }

    /// Whether this occurrence was raised from `kind`
    #[must_use]
    pub const fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind.code() == kind.code()
    }

    /// Caller-facing message, localized and with arguments applied
    ///
    /// The code-0 sentinel returns its literal template so the ok path
    /// stays stable regardless of locale catalogs. Otherwise the
    /// template is passed through the translator as a lookup key; when
    /// no arguments were supplied the translated string is returned
    /// verbatim, even if it still contains placeholder syntax.
    #[must_use]
    pub fn message(&self, translator: &dyn Translate, locale: &str) -> String {
        if self.kind.code() == 0 {
            return self.kind.template().to_owned();
        }
        let template = translator.translate(locale, self.kind.template());
        if self.args.is_empty() {
            return template;
        }
        substitute(&template, &self.args)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] {}|{}|{}|{:?}",
            self.file,
            self.line,
            self.kind.code(),
            self.kind.status().as_u16(),
            self.kind.template(),
            self.args
        )
    }
}

impl std::error::Error for AppError {}

/// Replace `%v` placeholders with arguments, left to right
///
/// Surplus placeholders are left literal; surplus arguments are
/// ignored.
fn substitute(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();
    while let Some(pos) = rest.find("%v") {
        let Some(arg) = args.next() else { break };
        out.push_str(&rest[..pos]);
        out.push_str(arg);
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
