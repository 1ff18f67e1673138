//! Snapshot decoding errors

use thiserror::Error;

/// Errors raised while decoding a player snapshot.
///
/// Individual malformed fields never produce an error; they decode to an
/// absent value instead. Only a document that is not a JSON object at all is
/// rejected.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot text is not valid JSON
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot is valid JSON but not an object keyed by player number
    #[error("Snapshot must be a JSON object keyed by player number, got {0}")]
    NotAnObject(&'static str),
}
