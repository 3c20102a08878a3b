//! Error types for the Coalesce library.
//!
//! Only structural problems are errors here: a file that cannot be read, or a
//! header that does not carry the expected columns. Bad *values* never error;
//! they degrade to null inside the normalizer and show up in the run stats.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Coalesce operations.
#[derive(Debug, Error)]
pub enum CoalesceError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input header is missing columns the schema requires.
    #[error("Header mismatch in '{path}': missing required column(s) {missing}")]
    Header { path: PathBuf, missing: String },

    /// Empty file or no data rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Coalesce operations.
pub type Result<T> = std::result::Result<T, CoalesceError>;
