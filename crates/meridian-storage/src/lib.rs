//! Atomic file persistence for Meridian.
//!
//! Emulators read their configuration files while Meridian rewrites them, so
//! every mutation in this workspace goes through [`write_atomic`]:
//!
//! 1. Write the full content to a temporary file in the destination directory
//! 2. Flush and sync it
//! 3. Rename it over the destination
//!
//! A reader of the destination path sees either the old file or the new one.
//! If any step before the rename fails the temporary file is removed and the
//! destination is left untouched.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod storage;

pub use error::StorageError;
pub use storage::{read_optional, read_optional_bytes, remove_if_exists, write_atomic};

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
