//! Error types for assertion generation.
//!
//! Accessor failures come in two flavours: an [`AccessError::Invocation`]
//! is recovered locally by the traversal (the accessor is treated as having
//! produced no value), while an [`AccessError::Introspection`] aborts the
//! whole call.

use thiserror::Error;

/// Failure while reading one accessor or peeling one wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The accessor itself failed (an error result, a borrowed cell, a lazy
    /// value that could not be loaded). Recovered as "no value".
    #[error("accessor invocation failed: {0}")]
    Invocation(String),

    /// The value could not be introspected at all. Fatal.
    #[error("introspection failed: {0}")]
    Introspection(String),
}

/// Errors that abort an `assertify` call.
#[derive(Debug, Error)]
pub enum AssertifyError {
    /// An accessor reported an introspection failure.
    #[error("introspection failed at `{path}`: {reason}")]
    Introspection { path: String, reason: String },

    /// The object graph is deeper than the configured limit.
    #[error("traversal exceeded the maximum depth of {limit} at `{path}`")]
    DepthExceeded { limit: usize, path: String },

    /// Writing the rendered assertions failed.
    #[error("failed to write assertions: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for assertion generation.
pub type AssertifyResult<T> = Result<T, AssertifyError>;

/// Errors that can occur while loading a [`GeneratorConfig`](crate::GeneratorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// The file is not a valid configuration document.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
