
pub mod core;
pub mod configs;
pub mod loggers;

pub use crate::core::error::LogError;
pub use loggers::{attr, Attr, AttrValue, LogLevel, LogRecord, LogSink, LogStatus, Logger, LoggerBuilder, LoggerConfig};
