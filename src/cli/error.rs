//! CLI error type

use crate::output::OutputError;
use crate::source::SourceError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Argument failed validation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Data retrieval or replay failure
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Report or snapshot write failure
    #[error(transparent)]
    Output(#[from] OutputError),
}
