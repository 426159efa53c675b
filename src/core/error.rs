//! # Core Error Module
//!
//! This module defines the central `LogError` type used throughout the library.
//! It leverages `thiserror` for error message formatting and `serde` for serialization.

use serde::Serialize;
use thiserror::Error;

/// Central error type for the `quelog` library.
///
/// Logging calls themselves never fail; only construction, settings loading
/// and shutdown surface a `LogError`.
#[derive(Debug, Error, Serialize, PartialEq)]
pub enum LogError {
    /// Error related to configuration loading or merging.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The background worker (thread or runtime) could not be started.
    #[error("Worker error: {0}")]
    WorkerError(String),

    /// Shutdown was requested from the worker thread itself, which would wait on itself forever.
    #[error("Shutdown called from the log worker thread")]
    ShutdownFromWorker,

    /// Error related to internal logic or state.
    #[error("Internal error: {0}")]
    InternalError(String),
}
