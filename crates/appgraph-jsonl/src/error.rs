//! Error types for appgraph-jsonl operations.

use std::io;
use thiserror::Error;

/// The error type for appgraph-jsonl operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A value could not be serialized while writing.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line could not be decoded into the requested record type.
    #[error("line {line_number}: {source}")]
    Parse {
        /// 1-based line number of the offending line.
        line_number: usize,
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Returns the line number for parse failures, `None` otherwise.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Parse { line_number, .. } => Some(*line_number),
            Self::Io(_) | Self::Json(_) => None,
        }
    }
}

/// A specialized Result type for appgraph-jsonl operations.
pub type Result<T> = std::result::Result<T, Error>;
