#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Brain Core Tests
//!
//! End-to-end behavior of the brain through its router.
//!
//! ## Scenarios Covered
//!
//! 1. Successful think records history and completes both scopes
//! 2. Simulated reasoning fault is logged, FAILED and returned
//! 3. Invalid prompts are absorbed with a warning
//! 4. Memory store/recall round-trip and rejected keys
//! 5. Brain acquired from a registry writes the standard log files

use nia_core::{BrainConfig, BrainCore, BrainError};
use nia_core_types::schema::{EVENT_COMPLETE, EVENT_FAILED, EVENT_START};
use nia_logging::{CaptureSink, LogEvent, LogRouter, LoggingConfig, RouterRegistry, Severity};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

const SIMULATED: &str = "ProcessingError: Simulated reasoning error";

fn captured_brain(config: BrainConfig) -> (BrainCore, CaptureSink) {
    let router = Arc::new(LogRouter::new("nia_core"));
    let capture = CaptureSink::new(Severity::Debug);
    router.add_sink(Arc::new(capture.clone()));
    (BrainCore::new(config, router), capture)
}

fn count_prefix(capture: &CaptureSink, prefix: &str) -> usize {
    capture.count_events(|e| e.message().starts_with(prefix))
}

fn count_exact(capture: &CaptureSink, severity: Severity, message: &str) -> usize {
    let matches = |e: &LogEvent| e.severity() == severity && e.message() == message;
    capture.count_events(matches)
}

fn count_simulated_failures(capture: &CaptureSink, label: &str) -> usize {
    let prefix = format!("{}: {} after ", EVENT_FAILED, label);
    let matches = |e: &LogEvent| {
        let message = e.message();
        message.starts_with(&prefix) && message.ends_with(SIMULATED)
    };
    capture.count_events(matches)
}

#[test]
fn test_think_success_end_to_end() {
    // GIVEN a brain with default config
    let (mut brain, capture) = captured_brain(BrainConfig::default());

    // WHEN it thinks about a normal prompt
    let response = brain.think("What is machine learning?", None).unwrap();

    // THEN the response echoes the prompt
    let response = response.unwrap();
    let expected = "Reasoning response to: What is machine learning?";
    assert!(response.contains("What is machine learning?"));
    assert_eq!(response, expected);

    // AND both scopes start and complete once
    for label in ["Brain.think()", "Brain.process_reasoning()"] {
        let start = format!("{}: {}", EVENT_START, label);
        let complete = format!("{}: {} (", EVENT_COMPLETE, label);
        assert_eq!(count_prefix(&capture, &start), 1);
        assert_eq!(count_prefix(&capture, &complete), 1);
    }
    assert_eq!(count_prefix(&capture, EVENT_FAILED), 0);

    // AND the exchange is recorded
    let history = brain.conversation_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].prompt, "What is machine learning?");
    assert_eq!(history[0].response, response);
    capture.assert_message_starts_with(&format!(
        "Reasoning completed successfully, response length: {}",
        response.len()
    ));
}

#[test]
fn test_simulated_fault_is_logged_and_returned() {
    // GIVEN a brain whose reasoner fails on "error"
    let (mut brain, capture) = captured_brain(BrainConfig::default());

    // WHEN the prompt contains the trigger in any case
    let err = brain.think("Please raise an ERROR now", None).unwrap_err();

    // THEN the error reaches the caller
    assert!(matches!(err, BrainError::Processing { .. }));
    assert_eq!(err.to_string(), "Simulated reasoning error");

    // AND both scopes report FAILED with the error kind
    for label in ["Brain.process_reasoning()", "Brain.think()"] {
        let prefix = format!("{}: {} after ", EVENT_FAILED, label);
        assert_eq!(count_prefix(&capture, &prefix), 1);
        assert_eq!(count_simulated_failures(&capture, label), 1);
    }

    // AND the error messages carry a trace
    let events = capture.events();
    for message in [
        "Reasoning processing failed: Simulated reasoning error",
        "Error during reasoning: Simulated reasoning error",
    ] {
        let event = &events
            .iter()
            .find(|c| c.event.message() == message)
            .unwrap()
            .event;
        assert_eq!(event.severity(), Severity::Error);
        let failure = event.failure().unwrap();
        assert_eq!(failure.kind(), "ProcessingError");
        assert!(failure.trace().contains(SIMULATED));
    }

    // AND nothing is added to history
    assert!(brain.conversation_history().is_empty());
}

#[test]
fn test_fault_trigger_can_be_disabled() {
    let config = BrainConfig::default().without_fault();
    let (mut brain, capture) = captured_brain(config);

    let response = brain.think("no error here", None).unwrap();
    let expected = "Reasoning response to: no error here";
    assert_eq!(response.as_deref(), Some(expected));
    assert_eq!(count_prefix(&capture, EVENT_FAILED), 0);
}

#[test]
fn test_invalid_prompt_is_absorbed() {
    let (mut brain, capture) = captured_brain(BrainConfig::default());
    let warning = "Invalid input for reasoning: Prompt must be a non-empty string";

    for prompt in ["", "   ", "\n\t"] {
        capture.clear();
        assert_eq!(brain.think(prompt, None).unwrap(), None);

        assert_eq!(count_exact(&capture, Severity::Warning, warning), 1);
        capture.assert_message_starts_with("COMPLETE: Brain.think() (");
        assert_eq!(count_prefix(&capture, "START: Brain.process"), 0);
    }
    assert!(brain.conversation_history().is_empty());
}

#[test]
fn test_memory_round_trip() {
    let (mut brain, capture) = captured_brain(BrainConfig::default());

    assert!(brain.store_memory("project_name", json!("Nia")));
    let recalled = brain.recall_memory("project_name");
    assert_eq!(recalled, Some(json!("Nia")));

    capture.assert_message_starts_with("Memory stored: project_name = str");
    capture.assert_message_starts_with("Memory recalled: project_name");
    capture.assert_message_starts_with("COMPLETE: Brain.store_memory(project_name) (");
    capture.assert_message_starts_with("COMPLETE: Brain.recall_memory(project_name) (");
}

#[test]
fn test_missing_key_logs_warning() {
    let (brain, capture) = captured_brain(BrainConfig::default());

    assert_eq!(brain.recall_memory("nonexistent"), None);

    let warning = "Memory key not found: nonexistent";
    assert_eq!(count_exact(&capture, Severity::Warning, warning), 1);
}

#[test]
fn test_empty_key_is_rejected() {
    let (mut brain, capture) = captured_brain(BrainConfig::default());

    assert!(!brain.store_memory("", json!(1)));
    assert!(brain.memory().is_empty());

    let error = "Error storing memory: Memory key cannot be empty";
    assert_eq!(count_exact(&capture, Severity::Error, error), 1);
    let with_trace = capture.count_events(|e| e.failure().is_some());
    assert_eq!(with_trace, 1);
}

#[test]
fn test_history_grows_in_order() {
    let (mut brain, capture) = captured_brain(BrainConfig::default());

    brain.think("first", None).unwrap();
    brain.think("second", None).unwrap();
    let _ = brain.think("an error", None);

    let prompts: Vec<_> = brain
        .conversation_history()
        .iter()
        .map(|e| e.prompt.clone())
        .collect();
    assert_eq!(prompts, vec!["first", "second"]);
    capture.assert_message_starts_with("Returning conversation history (2 entries)");
}

#[test]
fn test_brain_from_registry_writes_log_files() {
    // GIVEN a registry rooted in a temp dir
    let temp_dir = TempDir::new().unwrap();
    let logging = LoggingConfig::default()
        .with_log_dir(temp_dir.path().join("logs"))
        .with_console(false);
    let registry = RouterRegistry::new(logging.clone());

    // WHEN a brain runs one good and one failing prompt
    let config = BrainConfig::default();
    let mut brain = BrainCore::from_registry(config, &registry).unwrap();
    assert_eq!(brain.router().name(), "nia_core");
    brain.think("What is machine learning?", None).unwrap();
    assert!(brain.think("trigger error", None).is_err());

    // THEN the error file holds only failures, with traces
    let errors = std::fs::read_to_string(logging.error_log_path()).unwrap();
    assert!(errors.contains("FAILED: Brain.think() after "));
    assert!(errors.contains("FAILED: Brain.process_reasoning() after "));
    assert!(errors.contains(&format!("\n{}", SIMULATED)));
    assert!(!errors.contains("START: "));

    // AND the info and audit files hold the scope telemetry
    let info = std::fs::read_to_string(logging.info_log_path()).unwrap();
    assert!(info.contains("Nia Brain Core initialized successfully"));
    assert!(info.contains("COMPLETE: Brain.think() ("));

    let audit = std::fs::read_to_string(logging.audit_log_path()).unwrap();
    assert!(audit.contains(" - AUDIT - INFO - START: Brain.think()"));
}

#[test]
fn test_named_logger_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let logging = LoggingConfig::default()
        .with_log_dir(temp_dir.path())
        .with_console(false);
    let registry = RouterRegistry::new(logging);

    let config = BrainConfig::default().with_logger_name("nia_test");
    let brain = BrainCore::from_registry(config, &registry).unwrap();
    assert_eq!(brain.router().name(), "nia_test");
    assert!(registry.contains("nia_test"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_think_outcome_matches_trigger(prompt in "[a-zA-Z ]{1,40}") {
        let (mut brain, capture) = captured_brain(BrainConfig::default());
        let result = brain.think(&prompt, None);

        if prompt.trim().is_empty() {
            prop_assert!(matches!(result, Ok(None)));
        } else if prompt.to_lowercase().contains("error") {
            prop_assert!(result.is_err());
        } else {
            let expected = format!("Reasoning response to: {}", prompt);
            prop_assert_eq!(result.unwrap(), Some(expected));
        }

        // Every START is matched by exactly one terminal event
        let starts = count_prefix(&capture, EVENT_START);
        let completes = count_prefix(&capture, EVENT_COMPLETE);
        let failures = count_prefix(&capture, EVENT_FAILED);
        prop_assert_eq!(starts, completes + failures);
    }
}
