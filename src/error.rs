//! Error types
//!
//! `ApiError` covers the failures that can reach the command layer: configuration,
//! logging setup, and an unreadable traversal root. `BackendError` is the reason a
//! single description tier gave up; the describer logs it and moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the caller of the library.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cannot read root directory {path}: {source}")]
    RootNotAccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Why one description backend did not produce text.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("health check returned status {0}")]
    HealthStatus(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode completion response: {0}")]
    Decode(String),

    #[error("completion response had no usable text")]
    EmptyResponse,

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("local inference exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("local inference produced no output")]
    EmptyOutput,

    #[error("model cache {0} is empty")]
    ModelNotCached(PathBuf),

    #[error("failed to start async runtime: {0}")]
    Runtime(String),
}
