//! Line templates for sinks

use nia_core_types::schema::{AUDIT_TAG, DATE_FORMAT};

use crate::event::LogEvent;

/// Rendering template owned by a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// `time - source - LEVEL - [file:line] - message`
    Full,
    /// `time - AUDIT - LEVEL - message`
    Audit,
    /// `LEVEL: message [source]`
    Console,
}

impl Template {
    /// Render an event without a trailing newline
    ///
    /// A failure detail, when present, is appended on the following lines.
    pub fn render(&self, event: &LogEvent) -> String {
        let mut line = match self {
            Template::Full => format!(
                "{} - {} - {} - [{}:{}] - {}",
                event.timestamp().format(DATE_FORMAT),
                event.source(),
                event.severity(),
                event.origin().file_name(),
                event.origin().line,
                event.message()
            ),
            Template::Audit => format!(
                "{} - {} - {} - {}",
                event.timestamp().format(DATE_FORMAT),
                AUDIT_TAG,
                event.severity(),
                event.message()
            ),
            Template::Console => format!(
                "{}: {} [{}]",
                event.severity(),
                event.message(),
                event.source()
            ),
        };

        if let Some(failure) = event.failure() {
            line.push('\n');
            line.push_str(failure.trace());
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{FailureDetail, Origin};
    use nia_core_types::Severity;

    fn event() -> LogEvent {
        LogEvent::new(
            Severity::Error,
            "nia_core",
            "disk on fire",
            Origin {
                file: "src/brain.rs",
                line: 42,
            },
        )
    }

    fn strip_timestamp(line: &str) -> &str {
        // "YYYY-MM-DD HH:MM:SS - " is 22 bytes
        &line[22..]
    }

    #[test]
    fn test_full_template() {
        let line = Template::Full.render(&event());
        assert_eq!(
            strip_timestamp(&line),
            "nia_core - ERROR - [brain.rs:42] - disk on fire"
        );
    }

    #[test]
    fn test_audit_template() {
        let line = Template::Audit.render(&event());
        assert_eq!(strip_timestamp(&line), "AUDIT - ERROR - disk on fire");
    }

    #[test]
    fn test_console_template_has_no_timestamp() {
        let line = Template::Console.render(&event());
        assert_eq!(line, "ERROR: disk on fire [nia_core]");
    }

    #[test]
    fn test_timestamp_shape() {
        let line = Template::Full.render(&event());
        let stamp = &line[..19];
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, DATE_FORMAT).is_ok());
        assert_eq!(&line[19..22], " - ");
    }

    #[test]
    fn test_failure_trace_appended() {
        let line = Template::Console.render(&event().with_failure(FailureDetail::panic()));
        let mut lines = line.lines();
        assert_eq!(lines.next(), Some("ERROR: disk on fire [nia_core]"));
        assert!(line.ends_with("Panic: operation panicked"));
    }
}
