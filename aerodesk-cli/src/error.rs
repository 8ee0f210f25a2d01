use std::path::PathBuf;

use aerodesk_catalog::SnapshotError;
use aerodesk_core::ValidationError;

/// Everything a command can refuse or fail with; `Display` is the user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Enter a {0}")]
    EmptyQuery(&'static str),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Flight {0} not found")]
    NotFound(String),

    #[error("Could not reserve a ticket on {0}: no free seats left")]
    SoldOut(String),

    #[error("Invalid JSON format: {0}")]
    ImportRejected(SnapshotError),

    #[error("Export failed: {0}")]
    Export(SnapshotError),

    #[error("Cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CliError {
    /// Process exit code: 2 for bad input, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::EmptyQuery(_) | CliError::Validation(_) | CliError::ImportRejected(_) => 2,
            CliError::NotFound(_)
            | CliError::SoldOut(_)
            | CliError::Export(_)
            | CliError::ReadFile { .. }
            | CliError::WriteFile { .. } => 1,
        }
    }
}
