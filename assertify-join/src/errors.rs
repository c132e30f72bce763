//! Error types for file joins.

use thiserror::Error;

/// Errors that can occur while reading or joining files.
#[derive(Debug, Error)]
pub enum JoinError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// A line has fewer columns than the join column index.
    #[error("{path}:{line}: no column {column}")]
    MissingColumn {
        path: String,
        line: usize,
        column: usize,
    },
}
