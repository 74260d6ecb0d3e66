//! Error types for checkbox-tree
//!
//! Only the edges of the crate (reading option documents, parsing
//! configuration) can fail. Tree and selection operations are total.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for checkbox-tree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Main error type for checkbox-tree operations
#[derive(Error, Debug)]
pub enum TreeError {
    /// Options document is not a keyed mapping
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
