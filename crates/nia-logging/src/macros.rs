//! Logging macros
//!
//! Thin wrappers that format a label or message and keep the caller's
//! location for the event origin.

/// Enter a timed scope with a formatted label
///
/// # Example
///
/// ```
/// # use nia_logging::{timed_scope, LogRouter};
/// # use std::sync::Arc;
/// let router = Arc::new(LogRouter::new("nia_core"));
/// let key = "project_name";
/// let guard = timed_scope!(router, "Brain.recall_memory({})", key);
/// guard.complete();
/// ```
#[macro_export]
macro_rules! timed_scope {
    ($router:expr, $($label:tt)+) => {
        $crate::scope::TimedOperationScope::new(
            format!($($label)+),
            ::std::sync::Arc::clone(&$router),
        )
        .enter()
    };
}

/// Emit an event carrying an error's failure detail
///
/// # Example
///
/// ```
/// # use nia_logging::{log_failure, LogRouter};
/// # use nia_logging::Severity;
/// let router = LogRouter::new("nia_core");
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// log_failure!(router, Severity::Error, err, "Error storing memory: {}", err);
/// ```
#[macro_export]
macro_rules! log_failure {
    ($router:expr, $severity:expr, $err:expr, $($msg:tt)+) => {
        $router.emit_with_failure(
            $severity,
            format!($($msg)+),
            $crate::event::FailureDetail::from_error(&$err),
        )
    };
}
