//! Error types for the Eden writer

use meridian_storage::StorageError;
use thiserror::Error;

/// Errors raised while reading or patching `qt-config.ini`
#[derive(Error, Debug)]
pub enum EdenError {
    /// Reading or writing the config file failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for Eden operations
pub type Result<T> = std::result::Result<T, EdenError>;
