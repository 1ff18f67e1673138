//! Error types for storage operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or atomically replacing a file
#[derive(Error, Debug)]
pub enum StorageError {
    /// The destination directory could not be created
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Source error
        source: std::io::Error,
    },

    /// Writing the temporary file failed
    #[error("Failed to write temporary file for {path}: {source}")]
    Write {
        /// Final destination of the write
        path: PathBuf,
        /// Source error
        source: std::io::Error,
    },

    /// Renaming the temporary file over the destination failed
    #[error("Failed to replace {path}: {source}")]
    Persist {
        /// Final destination of the write
        path: PathBuf,
        /// Source error
        source: std::io::Error,
    },

    /// Reading an existing file failed
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path being read
        path: PathBuf,
        /// Source error
        source: std::io::Error,
    },

    /// Removing a file failed
    #[error("Failed to remove {path}: {source}")]
    Remove {
        /// Path being removed
        path: PathBuf,
        /// Source error
        source: std::io::Error,
    },
}

impl StorageError {
    /// Path the failed operation was acting on
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir { path, .. }
            | Self::Write { path, .. }
            | Self::Persist { path, .. }
            | Self::Read { path, .. }
            | Self::Remove { path, .. } => path,
        }
    }

    /// Underlying I/O error kind
    pub fn kind(&self) -> std::io::ErrorKind {
        match self {
            Self::CreateDir { source, .. }
            | Self::Write { source, .. }
            | Self::Persist { source, .. }
            | Self::Read { source, .. }
            | Self::Remove { source, .. } => source.kind(),
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exposes_path_and_kind() {
        let err = StorageError::Read {
            path: PathBuf::from("/tmp/missing.xml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.path(), Path::new("/tmp/missing.xml"));
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains("missing.xml"));
    }
}
