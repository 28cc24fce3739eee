//! Error types for appgraph operations.

use crate::domain::ApplicationId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for appgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No application with this id exists.
    #[error("Application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    /// No application with this code exists.
    #[error("Application not found: '{0}'")]
    UnknownApplicationCode(String),

    /// The request itself is malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The entity store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No registry was found from the working directory upwards.
    #[error("Not an appgraph registry. Run 'appgraph init' first.")]
    NotInitialized,

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failures of the entity store.
///
/// Any store failure aborts the whole query; the engine never builds a graph
/// from a partial read.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store read did not finish within the configured budget.
    #[error("{operation} timed out after {after_ms}ms")]
    Timeout {
        /// What was being read
        operation: &'static str,
        /// The budget that was exceeded
        after_ms: u64,
    },

    /// A data file holds a record that cannot be decoded.
    #[error("{}: {}", location(path, *line_number), reason)]
    Corrupt {
        /// The offending file
        path: PathBuf,
        /// 1-based line number, when known
        line_number: Option<usize>,
        /// Decoder message
        reason: String,
    },

    /// Two applications share an id.
    #[error("duplicate application id {id}")]
    DuplicateApplication {
        /// The repeated id
        id: ApplicationId,
    },

    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

fn location(path: &std::path::Path, line_number: Option<usize>) -> String {
    match line_number {
        Some(line) => format!("{}:{line}", path.display()),
        None => path.display().to_string(),
    }
}

/// A specialized Result type for appgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
