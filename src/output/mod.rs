//! JSON snapshot and CSV report writers

pub mod csv;
pub mod json;

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// CSV write error
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Snapshot file required for replay is missing
    #[error("snapshot file not found: {0}")]
    MissingSnapshot(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
