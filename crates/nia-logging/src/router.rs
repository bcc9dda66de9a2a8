//! Severity-filtered fan-out of log events to sinks
//!
//! Delivery is best-effort: a sink that fails to write is counted in
//! [`LogRouter::dropped_deliveries`] and otherwise ignored, so logging never
//! fails the caller.

use nia_core_types::Severity;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::event::{FailureDetail, LogEvent, Origin};
use crate::sink::Sink;

/// Named router owning an ordered list of sinks
pub struct LogRouter {
    name: String,
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    dropped: AtomicU64,
}

impl std::fmt::Debug for LogRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRouter")
            .field("name", &self.name)
            .field("sinks", &self.sink_count())
            .field("dropped", &self.dropped_deliveries())
            .finish()
    }
}

impl LogRouter {
    /// Create a router with no sinks attached
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sinks: RwLock::new(Vec::new()),
            dropped: AtomicU64::new(0),
        }
    }

    /// Source name stamped on every event
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a sink after the existing ones
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of sink writes that failed and were swallowed
    pub fn dropped_deliveries(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Whether any attached sink would accept `severity`
    pub fn enabled(&self, severity: Severity) -> bool {
        self.sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|sink| sink.accepts(severity))
    }

    /// Emit an event at the caller's location
    #[track_caller]
    pub fn emit(&self, severity: Severity, message: impl Into<String>) {
        self.emit_at(severity, message, Origin::caller(), None);
    }

    /// Emit an event carrying a failure detail at the caller's location
    #[track_caller]
    pub fn emit_with_failure(
        &self,
        severity: Severity,
        message: impl Into<String>,
        failure: FailureDetail,
    ) {
        self.emit_at(severity, message, Origin::caller(), Some(failure));
    }

    /// Emit an event with an explicit origin
    pub fn emit_at(
        &self,
        severity: Severity,
        message: impl Into<String>,
        origin: Origin,
        failure: Option<FailureDetail>,
    ) {
        let mut event = LogEvent::new(severity, self.name.as_str(), message, origin);
        if let Some(failure) = failure {
            event = event.with_failure(failure);
        }
        self.dispatch(&event);
    }

    /// Deliver a prepared event to every sink whose threshold it meets
    pub fn dispatch(&self, event: &LogEvent) {
        let sinks = self.sinks.read().unwrap_or_else(PoisonError::into_inner);
        for sink in sinks.iter().filter(|s| s.accepts(event.severity())) {
            if sink.write(event).is_err() {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.emit(Severity::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.emit(Severity::Info, message);
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) {
        self.emit(Severity::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.emit(Severity::Error, message);
    }

    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) {
        self.emit(Severity::Critical, message);
    }

    #[track_caller]
    pub fn error_with_failure(&self, message: impl Into<String>, failure: FailureDetail) {
        self.emit_with_failure(Severity::Error, message, failure);
    }

    #[track_caller]
    pub fn critical_with_failure(&self, message: impl Into<String>, failure: FailureDetail) {
        self.emit_with_failure(Severity::Critical, message, failure);
    }
}
