//! Application-owned registry of named routers
//!
//! Acquiring a router by name is idempotent: the first call builds it with the
//! standard sinks, every later call returns the same `Arc`, so sinks are never
//! attached twice.

use nia_core_types::Severity;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::LoggingConfig;
use crate::error::{LoggingError, Result};
use crate::format::Template;
use crate::router::LogRouter;
use crate::sink::{ConsoleSink, FileSink, RotatingFileSink, Sink};

/// The standard sink set for one log directory
///
/// | Sink | Threshold | Template |
/// |---|---|---|
/// | `nia_errors.log` | ERROR | Full |
/// | `nia_info.log` (rotating) | INFO | Full |
/// | `nia_audit.log` | INFO | Audit |
/// | stderr (if enabled) | WARNING | Console |
///
/// Cloning shares the underlying sinks. Every router writing to the same
/// files must hold the same sinks, otherwise each rotating sink tracks its own
/// size and keeps a handle to a file another one has already rotated away.
#[derive(Clone)]
pub struct StandardSinks {
    sinks: Vec<Arc<dyn Sink>>,
}

impl std::fmt::Debug for StandardSinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sinks.iter().map(|sink| sink.name()))
            .finish()
    }
}

impl StandardSinks {
    /// Create the log directory and open every standard sink
    ///
    /// # Errors
    ///
    /// Returns `CreateDir` if the log directory cannot be created, or `OpenSink`
    /// if any log file cannot be opened.
    pub fn open(config: &LoggingConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.log_dir).map_err(|source| LoggingError::CreateDir {
            path: config.log_dir.clone(),
            source,
        })?;

        let mut sinks: Vec<Arc<dyn Sink>> = vec![
            Arc::new(FileSink::open(
                config.error_log_path(),
                Severity::Error,
                Template::Full,
            )?),
            Arc::new(RotatingFileSink::open(
                config.info_log_path(),
                Severity::Info,
                Template::Full,
                config.rotation_policy(),
            )?),
            Arc::new(FileSink::open(
                config.audit_log_path(),
                Severity::Info,
                Template::Audit,
            )?),
        ];
        if config.console {
            sinks.push(Arc::new(ConsoleSink::stderr(Severity::Warning)));
        }
        Ok(Self { sinks })
    }

    /// Attach every sink to `router`, in table order
    pub fn attach(&self, router: &LogRouter) {
        for sink in &self.sinks {
            router.add_sink(Arc::clone(sink));
        }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

/// Build a standalone router with its own standard sinks
///
/// Routers that write to the same directory should come from one
/// [`RouterRegistry`] instead, which shares a single [`StandardSinks`].
///
/// # Errors
///
/// Same as [`StandardSinks::open`].
pub fn standard_router(name: &str, config: &LoggingConfig) -> Result<LogRouter> {
    let sinks = StandardSinks::open(config)?;
    let router = LogRouter::new(name);
    sinks.attach(&router);
    Ok(router)
}

#[derive(Debug, Default)]
struct RegistryState {
    routers: HashMap<String, Arc<LogRouter>>,
    sinks: Option<StandardSinks>,
}

/// Mapping from router name to its single instance
///
/// All routers of a registry share one [`StandardSinks`], opened on first
/// acquisition.
#[derive(Debug)]
pub struct RouterRegistry {
    config: LoggingConfig,
    state: Mutex<RegistryState>,
}

impl RouterRegistry {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RegistryState::default()),
        }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Get the router for `name`, building it on first use
    ///
    /// # Errors
    ///
    /// Returns the setup error from [`StandardSinks::open`] when the sinks are
    /// opened for the first time. Nothing is registered in that case, so a
    /// later call retries.
    pub fn router(&self, name: &str) -> Result<Arc<LogRouter>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(router) = state.routers.get(name) {
            return Ok(Arc::clone(router));
        }

        let sinks = match &state.sinks {
            Some(sinks) => sinks.clone(),
            None => {
                let sinks = StandardSinks::open(&self.config)?;
                state.sinks = Some(sinks.clone());
                sinks
            }
        };

        let router = Arc::new(LogRouter::new(name));
        sinks.attach(&router);
        state.routers.insert(name.to_string(), Arc::clone(&router));
        Ok(router)
    }

    /// Get the router named by `config.default_logger`
    ///
    /// # Errors
    ///
    /// Same as [`RouterRegistry::router`].
    pub fn default_router(&self) -> Result<Arc<LogRouter>> {
        self.router(&self.config.default_logger)
    }

    /// Whether a router for `name` has already been built
    pub fn contains(&self, name: &str) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .routers
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .routers
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
