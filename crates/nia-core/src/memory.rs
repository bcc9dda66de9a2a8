//! In-memory key/value store and conversation history

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::errors::{BrainError, Result};

/// Keyed memory of arbitrary JSON values
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns [`BrainError::EmptyKey`] if `key` is empty.
    pub fn store(&mut self, key: &str, value: Value) -> Result<()> {
        if key.is_empty() {
            return Err(BrainError::EmptyKey);
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    pub fn recall(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Bulk update from a context map; empty keys are skipped
    ///
    /// Returns the number of keys written.
    pub fn merge(&mut self, context: &Map<String, Value>) -> usize {
        let mut written = 0;
        for (key, value) in context.iter().filter(|(key, _)| !key.is_empty()) {
            self.entries.insert(key.clone(), value.clone());
            written += 1;
        }
        written
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// JSON type name used in memory log lines
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// One prompt/response exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub timestamp: DateTime<Local>,
    pub prompt: String,
    pub response: String,
}

impl ConversationEntry {
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            prompt: prompt.into(),
            response: response.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_and_recall() {
        let mut memory = MemoryStore::new();
        memory.store("project_name", json!("Nia")).unwrap();

        assert_eq!(memory.recall("project_name"), Some(&json!("Nia")));
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_store_replaces_existing_value() {
        let mut memory = MemoryStore::new();
        memory.store("k", json!(1)).unwrap();
        memory.store("k", json!(2)).unwrap();

        assert_eq!(memory.recall("k"), Some(&json!(2)));
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut memory = MemoryStore::new();
        let err = memory.store("", json!(true)).unwrap_err();
        assert!(matches!(err, BrainError::EmptyKey));
        assert!(memory.is_empty());
    }

    #[test]
    fn test_recall_missing() {
        let memory = MemoryStore::new();
        assert!(memory.recall("nope").is_none());
    }

    #[test]
    fn test_merge_skips_empty_keys() {
        let mut memory = MemoryStore::new();
        let context = json!({ "user": "ada", "": "ignored", "turn": 3 });
        let written = memory.merge(context.as_object().unwrap());

        assert_eq!(written, 2);
        assert_eq!(memory.recall("user"), Some(&json!("ada")));
        assert_eq!(memory.recall("turn"), Some(&json!(3)));
        assert!(memory.recall("").is_none());
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(false)), "bool");
        assert_eq!(json_type_name(&json!(7)), "int");
        assert_eq!(json_type_name(&json!(7.5)), "float");
        assert_eq!(json_type_name(&json!("s")), "str");
        assert_eq!(json_type_name(&json!([1])), "list");
        assert_eq!(json_type_name(&json!({})), "dict");
    }

    #[test]
    fn test_conversation_entry_serializes_rfc3339() {
        let entry = ConversationEntry::new("hi", "Reasoning response to: hi");
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["prompt"], "hi");
        let ts = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());

        let back: ConversationEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
