//! Construct-once access to a shared [`Logger`].
//!
//! A [`LoggerRegistry`] hands every caller the same logger, built from whichever
//! configuration reached it first. The process-wide registry behind [`global`] backs the
//! free functions in this module; code that wants isolation (tests, embedded
//! components) creates its own registry and passes the resulting handle down.

use crate::core::error::LogError;
use crate::loggers::attr::Attr;
use crate::loggers::builder::{Logger, LoggerConfig};
use crate::loggers::core::LogLevel;
use once_cell::sync::OnceCell;

pub struct LoggerRegistry {
    cell: OnceCell<Logger>,
}

impl LoggerRegistry {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the registered logger, building it from `config` if this is the first call.
    ///
    /// Concurrent first calls build exactly one logger; the losing configurations are
    /// ignored. A failed build leaves the registry empty so a later call can retry.
    pub fn get_or_init(&self, config: LoggerConfig) -> Result<Logger, LogError> {
        self.cell
            .get_or_try_init(|| Logger::with_config(config))
            .cloned()
    }

    pub fn get(&self) -> Option<Logger> {
        self.cell.get().cloned()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: LoggerRegistry = LoggerRegistry::new();

/// The process-wide registry.
pub fn global() -> &'static LoggerRegistry {
    &GLOBAL
}

/// Process-wide logger, built on first use.
pub fn get_logger(config: LoggerConfig) -> Result<Logger, LogError> {
    GLOBAL.get_or_init(config)
}

fn log_global(level: LogLevel, msg: impl Into<String>, attrs: Vec<Attr>) {
    // Not yet built: discard.
    if let Some(logger) = GLOBAL.cell.get() {
        let _ = logger.log(level, msg, attrs);
    }
}

pub fn debug(msg: impl Into<String>, attrs: Vec<Attr>) {
    log_global(LogLevel::Debug, msg, attrs);
}

pub fn info(msg: impl Into<String>, attrs: Vec<Attr>) {
    log_global(LogLevel::Info, msg, attrs);
}

pub fn warn(msg: impl Into<String>, attrs: Vec<Attr>) {
    log_global(LogLevel::Warn, msg, attrs);
}

pub fn error(msg: impl Into<String>, attrs: Vec<Attr>) {
    log_global(LogLevel::Error, msg, attrs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loggers::sink::MemorySink;
    use std::sync::Arc;

    #[test]
    fn test_first_config_wins() {
        let registry = LoggerRegistry::new();
        assert!(registry.get().is_none());

        let first = registry
            .get_or_init(LoggerConfig {
                buffer_size: 50,
                sink: Some(Arc::new(MemorySink::new())),
                ..LoggerConfig::default()
            })
            .unwrap();
        let second = registry
            .get_or_init(LoggerConfig {
                buffer_size: 5,
                ..LoggerConfig::default()
            })
            .unwrap();

        assert!(Logger::ptr_eq(&first, &second));
        assert_eq!(second.capacity(), 50);
        first.shutdown().unwrap();
    }

    #[test]
    fn test_registries_are_isolated() {
        let a = LoggerRegistry::new();
        let b = LoggerRegistry::new();
        let sink = Arc::new(MemorySink::new());
        let cfg = LoggerConfig {
            sink: Some(sink),
            ..LoggerConfig::default()
        };
        let la = a.get_or_init(cfg.clone()).unwrap();
        let lb = b.get_or_init(cfg).unwrap();
        assert!(!Logger::ptr_eq(&la, &lb));
        la.shutdown().unwrap();
        lb.shutdown().unwrap();
    }
}
