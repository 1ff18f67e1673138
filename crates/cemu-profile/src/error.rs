//! Error types for Cemu profile operations

use std::path::PathBuf;

use meridian_storage::StorageError;
use thiserror::Error;

/// Errors that can occur while reading, writing or managing Cemu profiles
#[derive(Error, Debug)]
pub enum CemuError {
    /// Document root is not `<emulated_controller>`
    #[error("Expected <emulated_controller> root, got <{found}>")]
    UnexpectedRoot {
        /// Root tag actually found
        found: String,
    },

    /// Document is not well-formed XML
    #[error("Malformed profile XML: {0}")]
    MalformedXml(String),

    /// Profile content is out of range
    #[error("Profile validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Profile name is empty or unusable as a file stem
    #[error("Invalid profile name: {0:?}")]
    InvalidProfileName(String),

    /// Controller slot outside 0..=7
    #[error("Controller slot must be 0-{max}, got {slot}", max = crate::repository::MAX_SLOT)]
    InvalidSlot {
        /// Requested slot
        slot: u32,
    },

    /// Named profile does not exist
    #[error("Profile {name:?} not found at {path}")]
    ProfileNotFound {
        /// Requested profile name
        name: String,
        /// Path that was probed
        path: PathBuf,
    },

    /// Filesystem failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// XML writer failure
    #[error("Failed to serialize profile: {0}")]
    Serialize(String),
}

impl CemuError {
    /// True for errors caused by the document structure rather than I/O.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::UnexpectedRoot { .. } | Self::MalformedXml(_))
    }

    /// Create a profile-not-found error
    pub fn profile_not_found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::ProfileNotFound {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Range and closed-set violations reported by `validate()`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Controller API outside the closed set Cemu understands
    #[error("Unknown controller API {0:?}")]
    UnknownApi(String),

    /// Deadzone outside [0, 1]
    #[error("{group} deadzone must be 0.0-1.0, got {value}")]
    Deadzone {
        /// Axis group name
        group: &'static str,
        /// Offending value
        value: f32,
    },

    /// Range outside (0, 2]
    #[error("{group} range must be >0.0 and <=2.0, got {value}")]
    Range {
        /// Axis group name
        group: &'static str,
        /// Offending value
        value: f32,
    },

    /// Mapping id outside 1..=27
    #[error("mapping id must be 1-{max}, got {id}", max = crate::models::MAX_MAPPING_ID)]
    MappingId {
        /// Offending id
        id: u8,
    },
}

/// Result type for Cemu profile operations
pub type Result<T> = std::result::Result<T, CemuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        assert!(
            CemuError::UnexpectedRoot {
                found: "profile".into()
            }
            .is_structural()
        );
        assert!(CemuError::MalformedXml("eof".into()).is_structural());
        assert!(!CemuError::InvalidSlot { slot: 9 }.is_structural());
    }

    #[test]
    fn test_messages_name_the_problem() {
        let err = CemuError::InvalidSlot { slot: 8 };
        assert_eq!(err.to_string(), "Controller slot must be 0-7, got 8");

        let err = ValidationError::MappingId { id: 30 };
        assert_eq!(err.to_string(), "mapping id must be 1-27, got 30");
    }
}
