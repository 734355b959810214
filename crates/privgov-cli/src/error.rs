//! CLI error type and exit-code mapping.

use crate::Exit;
use privgov_advisory::AdvisoryError;
use privgov_core::ValidationError;
use privgov_log::LogError;
use privgov_report::ReportError;
use privgov_store::StoreError;

/// Anything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Advisory(#[from] AdvisoryError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Log(#[from] LogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Map to a process exit code.
    pub fn exit_code(&self) -> Exit {
        match self {
            CliError::Validation(_) | CliError::InvalidArgument(_) => Exit::ValidationError,
            CliError::Io(_) => Exit::IoError,
            CliError::Advisory(_) => Exit::NetworkError,
            CliError::Store(StoreError::NotFound { .. }) => Exit::NotFound,
            _ => Exit::GeneralError,
        }
    }
}
