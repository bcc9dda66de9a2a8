//! Log event model
//!
//! A [`LogEvent`] is built once by the router and handed by reference to
//! every sink. Nothing mutates it after construction.

use chrono::{DateTime, Local};
use nia_core_types::Severity;
use nia_errors::ExError;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::panic::Location;
use std::path::Path;

use crate::error::LoggingError;

/// Source location that produced an event (best-effort)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
}

impl Origin {
    /// Placeholder used when no location is known
    pub const UNKNOWN: Origin = Origin {
        file: "<unknown>",
        line: 0,
    };

    /// Location of the caller of the enclosing `#[track_caller]` chain
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    /// File name without its directory, as rendered in log lines
    pub fn file_name(&self) -> &str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }
}

impl From<&'static Location<'static>> for Origin {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Errors that can be classified in FAILED events
///
/// `kind_name` is the classification rendered before the message, e.g.
/// `Processing: Simulated reasoning error`. The default is the short name of
/// the implementing type.
pub trait Failure: std::error::Error {
    fn kind_name(&self) -> Cow<'static, str>
    where
        Self: Sized,
    {
        Cow::Owned(short_type_name::<Self>().to_string())
    }
}

impl Failure for ExError {
    fn kind_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.kind().name())
    }
}

impl Failure for LoggingError {
    fn kind_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            LoggingError::CreateDir { .. } => "CreateDir",
            LoggingError::OpenSink { .. } => "OpenSink",
            LoggingError::Config(_) => "Config",
        })
    }
}

impl Failure for std::io::Error {
    fn kind_name(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{:?}", self.kind()))
    }
}

/// Last path segment of a type name, generics stripped
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Structured failure attached to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail {
    kind: String,
    message: String,
    trace: String,
}

impl FailureDetail {
    /// Classify an error and capture its trace
    ///
    /// The trace lists the `source()` chain and, when enabled through
    /// `RUST_BACKTRACE`, a backtrace of the current thread.
    pub fn from_error<E: Failure>(err: &E) -> Self {
        let kind = err.kind_name().into_owned();
        let message = err.to_string();

        let mut causes = Vec::new();
        let mut current = err.source();
        while let Some(cause) = current {
            causes.push(cause.to_string());
            current = cause.source();
        }

        let trace = render_trace(&kind, &message, &causes);
        Self {
            kind,
            message,
            trace,
        }
    }

    /// Failure raised by a panic unwinding through a scope
    pub fn panic() -> Self {
        Self::synthetic("Panic", "operation panicked")
    }

    /// Failure for a scope guard dropped without an explicit exit
    pub fn abandoned() -> Self {
        Self::synthetic("Abandoned", "scope ended without complete or fail")
    }

    fn synthetic(kind: &str, message: &str) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.to_string(),
            trace: render_trace(kind, message, &[]),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Multi-line trace text appended below the rendered message
    pub fn trace(&self) -> &str {
        &self.trace
    }
}

fn render_trace(kind: &str, message: &str, causes: &[String]) -> String {
    let backtrace = Backtrace::capture();
    let mut out = match backtrace.status() {
        BacktraceStatus::Captured => format!("Backtrace:\n{}\n", backtrace),
        _ => "Backtrace unavailable (set RUST_BACKTRACE=1 to capture)\n".to_string(),
    };
    out.push_str(&format!("{}: {}", kind, message));
    for cause in causes {
        out.push_str(&format!("\nCaused by: {}", cause));
    }
    out
}

/// A single structured log event
#[derive(Debug, Clone)]
pub struct LogEvent {
    timestamp: DateTime<Local>,
    severity: Severity,
    source: String,
    message: String,
    origin: Origin,
    failure: Option<FailureDetail>,
}

impl LogEvent {
    /// Create an event stamped with the current local time
    pub fn new(
        severity: Severity,
        source: impl Into<String>,
        message: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            source: source.into(),
            message: message.into(),
            origin,
            failure: None,
        }
    }

    /// Attach a failure detail
    pub fn with_failure(mut self, failure: FailureDetail) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Name of the router that emitted the event
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn failure(&self) -> Option<&FailureDetail> {
        self.failure.as_ref()
    }
}
