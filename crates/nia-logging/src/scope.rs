//! Timed operation scopes
//!
//! A [`TimedOperationScope`] brackets a unit of work with a START event and
//! exactly one terminal event. Entering it yields a [`ScopeGuard`]; the guard
//! emits COMPLETE or FAILED when it is finished explicitly. A guard dropped
//! without being finished emits FAILED: kind `Panic` while unwinding,
//! otherwise kind `Abandoned`, since an early return through `?` cannot be
//! told apart from success at drop time. Use [`TimedOperationScope::run`] or
//! [`ScopeGuard::track`] for fallible work.
//!
//! The scope only observes. Errors passed through [`ScopeGuard::track`] are
//! returned to the caller unchanged.
//!
//! # Example
//!
//! ```
//! use nia_logging::{LogRouter, TimedOperationScope};
//! use std::sync::Arc;
//!
//! let router = Arc::new(LogRouter::new("nia_core"));
//! let answer: Result<u32, std::io::Error> =
//!     TimedOperationScope::new("compute", router).run(|| Ok(42));
//! assert_eq!(answer.unwrap(), 42);
//! ```

use nia_core_types::schema::{EVENT_COMPLETE, EVENT_FAILED, EVENT_START};
use nia_core_types::Severity;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::event::{Failure, FailureDetail, Origin};
use crate::router::LogRouter;

/// Label and router for a scope that has not been entered yet
#[derive(Debug)]
pub struct TimedOperationScope {
    label: String,
    router: Arc<LogRouter>,
}

impl TimedOperationScope {
    /// Prepare a scope; nothing is emitted until [`enter`](Self::enter)
    pub fn new(label: impl Into<String>, router: Arc<LogRouter>) -> Self {
        Self {
            label: label.into(),
            router,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Start the clock and emit `START: <label>`
    #[track_caller]
    pub fn enter(self) -> ScopeGuard {
        let origin = Origin::caller();
        self.router.emit_at(
            Severity::Info,
            format!("{}: {}", EVENT_START, self.label),
            origin,
            None,
        );
        ScopeGuard {
            label: self.label,
            router: self.router,
            started: Instant::now(),
            origin,
            exited: false,
        }
    }

    /// Run `work` inside the scope and return its result unchanged
    ///
    /// # Errors
    ///
    /// Returns whatever error `work` returns, after it has been logged as FAILED.
    #[track_caller]
    pub fn run<T, E, F>(self, work: F) -> Result<T, E>
    where
        E: Failure,
        F: FnOnce() -> Result<T, E>,
    {
        let guard = self.enter();
        guard.track(work())
    }
}

/// An entered scope; exits exactly once
#[must_use = "dropping the guard immediately ends the scope"]
#[derive(Debug)]
pub struct ScopeGuard {
    label: String,
    router: Arc<LogRouter>,
    started: Instant,
    origin: Origin,
    exited: bool,
}

impl ScopeGuard {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Exit normally: `COMPLETE: <label> (<secs>s)`
    pub fn complete(mut self) {
        self.exit(None);
    }

    /// Exit with an error: `FAILED: <label> after <secs>s - <Kind>: <message>`
    pub fn fail<E: Failure>(mut self, err: &E) {
        self.exit(Some(FailureDetail::from_error(err)));
    }

    /// Exit according to `result` and hand it back untouched
    ///
    /// # Errors
    ///
    /// Returns `result`'s error unchanged.
    pub fn track<T, E: Failure>(self, result: Result<T, E>) -> Result<T, E> {
        match &result {
            Ok(_) => self.complete(),
            Err(err) => self.fail(err),
        }
        result
    }

    fn exit(&mut self, failure: Option<FailureDetail>) {
        if self.exited {
            return;
        }
        self.exited = true;

        let secs = self.started.elapsed().as_secs_f64();
        match failure {
            None => self.router.emit_at(
                Severity::Info,
                format!("{}: {} ({:.2}s)", EVENT_COMPLETE, self.label, secs),
                self.origin,
                None,
            ),
            Some(failure) => self.router.emit_at(
                Severity::Error,
                format!(
                    "{}: {} after {:.2}s - {}: {}",
                    EVENT_FAILED,
                    self.label,
                    secs,
                    failure.kind(),
                    failure.message()
                ),
                self.origin,
                Some(failure),
            ),
        }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if self.exited {
            return;
        }
        if std::thread::panicking() {
            self.exit(Some(FailureDetail::panic()));
        } else {
            self.exit(Some(FailureDetail::abandoned()));
        }
    }
}
