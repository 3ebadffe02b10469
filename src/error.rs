//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating input, selecting, or running the harness.
#[derive(Debug, Error)]
pub enum OccError {
    /// Matrix (or view) is empty, ragged, or otherwise malformed.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// Tournament range is empty or reaches past the counts.
    #[error("invalid range [{start}, {end}) over {len} counts")]
    InvalidRange {
        /// Inclusive start of the requested range.
        start: usize,
        /// Exclusive end of the requested range.
        end: usize,
        /// Length of the sequence the range was applied to.
        len: usize,
    },

    /// An integer entry outside {0, 1}.
    #[error("non-binary entry {value} at row {row}, column {col}")]
    NonBinary { row: usize, col: usize, value: i64 },

    /// An entry that does not parse as an integer.
    #[error("non-integer entry '{raw}' at row {row}, column {col}")]
    NonInteger { row: usize, col: usize, raw: String },

    /// Persisted matrix file does not exist.
    #[error("input matrix not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// Harness configuration cannot produce measurements.
    #[error("invalid harness configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Underlying I/O error.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// CSV reader/writer error.
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialisation error.
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl OccError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        OccError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, OccError>;
