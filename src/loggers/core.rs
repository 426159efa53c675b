use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::loggers::attr::Attr;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Debug, Info, Warn, Error,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One log call, frozen at the call site and handed to the worker untouched.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub ts: DateTime<Utc>,
    pub level: LogLevel,
    pub msg: String,
    pub attrs: Vec<Attr>,
}

impl LogRecord {
    pub fn new(level: LogLevel, msg: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            ts: Utc::now(),
            level,
            msg: msg.into(),
            attrs,
        }
    }

    /// First attribute with the given key, if any.
    pub fn attr(&self, key: &str) -> Option<&Attr> {
        self.attrs.iter().find(|a| a.key == key)
    }
}

/// Outcome of a single enqueue attempt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    /// Accepted by the queue; `attempts` is 1 on the non-blocking path.
    Enqueued { attempts: u32 },
    /// The queue stayed full for every attempt and the record was discarded.
    Dropped { attempts: u32 },
    /// The logger was already shut down.
    Closed,
    /// Below the configured minimum level.
    Filtered,
}

impl LogStatus {
    pub fn is_enqueued(&self) -> bool {
        matches!(self, LogStatus::Enqueued { .. })
    }
}
