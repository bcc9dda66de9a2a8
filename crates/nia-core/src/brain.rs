//! Brain core: prompt handling, memory and conversation history
//!
//! Every public operation runs inside a timed scope on the brain's router.
//! Bad input is logged and absorbed (`None` / `false`); reasoning failures
//! are logged with their trace and returned to the caller.

use nia_logging::{
    log_failure, timed_scope, LogRouter, RouterRegistry, Severity, TimedOperationScope,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::BrainConfig;
use crate::errors::{BrainError, Result};
use crate::memory::{json_type_name, ConversationEntry, MemoryStore};
use crate::reasoner::{Reasoner, TemplateReasoner};

const PROMPT_PREVIEW_CHARS: usize = 100;
const RESPONSE_PREVIEW_CHARS: usize = 50;

pub struct BrainCore {
    config: BrainConfig,
    memory: MemoryStore,
    history: Vec<ConversationEntry>,
    reasoner: Box<dyn Reasoner>,
    router: Arc<LogRouter>,
}

impl std::fmt::Debug for BrainCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrainCore")
            .field("config", &self.config)
            .field("memory_keys", &self.memory.len())
            .field("history", &self.history.len())
            .field("router", &self.router.name())
            .finish()
    }
}

impl BrainCore {
    /// Create a brain that logs to `router`, using the template reasoner
    pub fn new(config: BrainConfig, router: Arc<LogRouter>) -> Self {
        let reasoner = TemplateReasoner::with_fault_trigger(config.simulate_fault_on.as_deref());
        router.debug(format!("Brain mode: {}", config.mode));
        router.info("Nia Brain Core initialized successfully");
        Self {
            config,
            memory: MemoryStore::new(),
            history: Vec::new(),
            reasoner: Box::new(reasoner),
            router,
        }
    }

    /// Create a brain whose router comes from `registry`
    ///
    /// Uses `config.logger_name` if set, otherwise the registry's default.
    ///
    /// # Errors
    ///
    /// Returns [`BrainError::Logging`] if the router's sinks cannot be set up.
    pub fn from_registry(config: BrainConfig, registry: &RouterRegistry) -> Result<Self> {
        let router = match config.logger_name.as_deref() {
            Some(name) => registry.router(name)?,
            None => registry.default_router()?,
        };
        Ok(Self::new(config, router))
    }

    /// Replace the reasoning backend
    pub fn with_reasoner(mut self, reasoner: Box<dyn Reasoner>) -> Self {
        self.reasoner = reasoner;
        self
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    pub fn router(&self) -> &Arc<LogRouter> {
        &self.router
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Answer `prompt`, optionally merging `context` into memory first
    ///
    /// Returns `Ok(None)` for an empty or whitespace-only prompt.
    ///
    /// # Errors
    ///
    /// Returns [`BrainError::Processing`] if the reasoner fails.
    pub fn think(
        &mut self,
        prompt: &str,
        context: Option<&Map<String, Value>>,
    ) -> Result<Option<String>> {
        let scope = TimedOperationScope::new("Brain.think()", Arc::clone(&self.router));
        scope.run(|| self.think_inner(prompt, context))
    }

    fn think_inner(
        &mut self,
        prompt: &str,
        context: Option<&Map<String, Value>>,
    ) -> Result<Option<String>> {
        if prompt.trim().is_empty() {
            self.router.warning(format!(
                "Invalid input for reasoning: {}",
                BrainError::InvalidInput
            ));
            return Ok(None);
        }

        self.router.info(format!(
            "Processing prompt: {}...",
            preview(prompt, PROMPT_PREVIEW_CHARS)
        ));

        if let Some(context) = context.filter(|c| !c.is_empty()) {
            let written = self.memory.merge(context);
            self.router
                .debug(format!("Merged {} context keys into memory", written));
        }

        match self.process_reasoning(prompt) {
            Ok(response) => {
                self.router.info(format!(
                    "Reasoning completed successfully, response length: {}",
                    response.chars().count()
                ));
                self.history
                    .push(ConversationEntry::new(prompt, response.clone()));
                Ok(Some(response))
            }
            Err(err) => {
                log_failure!(
                    self.router,
                    Severity::Error,
                    err,
                    "Error during reasoning: {}",
                    err
                );
                Err(err)
            }
        }
    }

    fn process_reasoning(&self, prompt: &str) -> Result<String> {
        let router = Arc::clone(&self.router);
        TimedOperationScope::new("Brain.process_reasoning()", router).run(|| {
            match self.reasoner.reason(prompt) {
                Ok(response) => {
                    self.router.debug(format!(
                        "Processed reasoning: {}...",
                        preview(&response, RESPONSE_PREVIEW_CHARS)
                    ));
                    Ok(response)
                }
                Err(err) => {
                    log_failure!(
                        self.router,
                        Severity::Error,
                        err,
                        "Reasoning processing failed: {}",
                        err
                    );
                    Err(err)
                }
            }
        })
    }

    /// Look up a stored value
    pub fn recall_memory(&self, key: &str) -> Option<Value> {
        let guard = timed_scope!(self.router, "Brain.recall_memory({})", key);
        let value = self.memory.recall(key).cloned();
        let router = &self.router;
        match value {
            Some(_) => router.info(format!("Memory recalled: {}", key)),
            None => router.warning(format!("Memory key not found: {}", key)),
        }
        guard.complete();
        value
    }

    /// Store `value` under `key`; returns `false` if the key was rejected
    pub fn store_memory(&mut self, key: &str, value: Value) -> bool {
        let guard = timed_scope!(self.router, "Brain.store_memory({})", key);
        let type_name = json_type_name(&value);
        let stored = match self.memory.store(key, value) {
            Ok(()) => {
                self.router
                    .info(format!("Memory stored: {} = {}", key, type_name));
                true
            }
            Err(err) => {
                log_failure!(
                    self.router,
                    Severity::Error,
                    err,
                    "Error storing memory: {}",
                    err
                );
                false
            }
        };
        guard.complete();
        stored
    }

    /// All exchanges so far, oldest first
    pub fn conversation_history(&self) -> &[ConversationEntry] {
        self.router.info(format!(
            "Returning conversation history ({} entries)",
            self.history.len()
        ));
        &self.history
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
