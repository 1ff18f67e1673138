//! Error types and exit codes for meridianctl

use meridian_cemu::CemuError;
use meridian_eden::EdenError;
use meridian_input::SnapshotError;
use meridian_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Process exit status for a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Other,
    ProfileNotFound,
    InvalidInput,
    Io,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Other => 1,
            Self::ProfileNotFound => 2,
            Self::InvalidInput => 3,
            Self::Io => 4,
        }
    }
}

/// Exit status for `err`, from the first classifiable error in its chain.
pub fn exit_status(err: &anyhow::Error) -> ExitStatus {
    err.chain()
        .find_map(classify)
        .unwrap_or(ExitStatus::Other)
}

fn classify(err: &(dyn std::error::Error + 'static)) -> Option<ExitStatus> {
    if let Some(err) = err.downcast_ref::<CliError>() {
        return Some(match err {
            CliError::ProfileNotFound(_) => ExitStatus::ProfileNotFound,
            CliError::InvalidInput(_)
            | CliError::InvalidConfiguration(_)
            | CliError::YamlError(_) => ExitStatus::InvalidInput,
            CliError::IoError(_) => ExitStatus::Io,
        });
    }
    if let Some(err) = err.downcast_ref::<CemuError>() {
        return Some(match err {
            CemuError::ProfileNotFound { .. } => ExitStatus::ProfileNotFound,
            CemuError::Storage(_) => ExitStatus::Io,
            CemuError::Serialize(_) => ExitStatus::Other,
            CemuError::UnexpectedRoot { .. }
            | CemuError::MalformedXml(_)
            | CemuError::Validation(_)
            | CemuError::InvalidProfileName(_)
            | CemuError::InvalidSlot { .. } => ExitStatus::InvalidInput,
        });
    }
    if err.is::<EdenError>() || err.is::<StorageError>() || err.is::<std::io::Error>() {
        return Some(ExitStatus::Io);
    }
    if err.is::<SnapshotError>() || err.is::<serde_yaml::Error>() {
        return Some(ExitStatus::InvalidInput);
    }
    None
}
