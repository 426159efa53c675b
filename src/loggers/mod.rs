// src/loggers/mod.rs

pub mod attr;
pub mod builder;
pub mod core;
pub mod queue;
pub mod registry;
pub mod signal;
pub mod sink;
pub mod worker;

pub use attr::{Attr, AttrValue};
pub use builder::{Logger, LoggerBuilder, LoggerConfig, RuntimeOptions};
pub use self::core::{LogLevel, LogRecord, LogStatus};
pub use registry::{get_logger, global, LoggerRegistry};
pub use sink::{JsonSink, LogSink, MemorySink, TextSink};

#[macro_export]
macro_rules! log_base {
    // No kv pairs
    ($logger:expr, $level:expr, $msg:expr) => {
        $crate::log_base!($logger, $level, $msg, )
    };
    // With kv pairs (zero or more)
    ($logger:expr, $level:expr, $msg:expr, $( $k:expr => $v:expr ),* $(,)? ) => {
        {
            #[allow(unused_mut)]
            let mut attrs = ::std::vec::Vec::new();
            $(
                attrs.push($crate::loggers::attr::Attr::new($k, $v));
            )*
            // Status is dropped here; call `Logger::log` directly to inspect it.
            let _ = $logger.log($level, $msg, attrs);
        }
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $k:expr => $v:expr )* $(,)? ) => {
        $crate::log_base!($logger, $crate::loggers::core::LogLevel::Debug, $msg $(, $k => $v )* )
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $k:expr => $v:expr )* $(,)? ) => {
        $crate::log_base!($logger, $crate::loggers::core::LogLevel::Info, $msg $(, $k => $v )* )
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(, $k:expr => $v:expr )* $(,)? ) => {
        $crate::log_base!($logger, $crate::loggers::core::LogLevel::Warn, $msg $(, $k => $v )* )
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $k:expr => $v:expr )* $(,)? ) => {
        $crate::log_base!($logger, $crate::loggers::core::LogLevel::Error, $msg $(, $k => $v )* )
    };
}
