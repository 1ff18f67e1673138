//! File operations with atomic replace semantics

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::{Result, StorageError};

const TEMP_PREFIX: &str = ".tmp_";

/// Write `contents` to `path` atomically.
///
/// The parent directory is created when missing. The temporary file lives in
/// the same directory as `path` so the final rename never crosses a
/// filesystem boundary.
///
/// # Errors
///
/// Returns [`StorageError`] when the directory cannot be created, the
/// temporary file cannot be written, or the rename fails. In every error case
/// the destination keeps its previous content.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    debug!(path = ?path, bytes = contents.len(), "Writing file atomically");

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let suffix = path
        .extension()
        .map(|ext| {
            let mut suffix = OsString::from(".");
            suffix.push(ext);
            suffix
        })
        .unwrap_or_default();

    // Dropping the NamedTempFile on any early return deletes it.
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(&suffix)
        .tempfile_in(dir)
        .map_err(|source| StorageError::write(path, source))?;

    temp.write_all(contents)
        .map_err(|source| StorageError::write(path, source))?;
    temp.flush()
        .map_err(|source| StorageError::write(path, source))?;
    temp.as_file()
        .sync_all()
        .map_err(|source| StorageError::write(path, source))?;

    temp.persist(path).map_err(|err| StorageError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    debug!(path = ?path, "File replaced");
    Ok(())
}

/// Read `path` as raw bytes, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns [`StorageError::Read`] for I/O failures other than a missing file.
pub fn read_optional_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read `path` as UTF-8 text, returning `None` when it does not exist.
///
/// Invalid UTF-8 sequences are replaced rather than rejected. Use
/// [`read_optional_bytes`] when the content is written back.
///
/// # Errors
///
/// Returns [`StorageError::Read`] for I/O failures other than a missing file.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    Ok(read_optional_bytes(path)?.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

/// Delete `path` if present. Returns whether a file was removed.
///
/// # Errors
///
/// Returns [`StorageError::Remove`] when the file exists but cannot be deleted.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = ?path, "Removed file");
            Ok(true)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StorageError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn leftover_temp_files(dir: &Path) -> std::io::Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(dir)? {
            let name = entry?.file_name();
            if name.to_string_lossy().starts_with(TEMP_PREFIX) {
                count += 1;
            }
        }
        Ok(count)
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() -> TestResult {
        let temp_dir = TempDir::new()?;
        let target = temp_dir.path().join("nested/dir/profile.xml");

        write_atomic(&target, b"<emulated_controller/>")?;

        assert_eq!(fs::read_to_string(&target)?, "<emulated_controller/>");
        assert_eq!(leftover_temp_files(temp_dir.path().join("nested/dir").as_path())?, 0);
        Ok(())
    }

    #[test]
    fn test_atomic_write_replaces_existing_content() -> TestResult {
        let temp_dir = TempDir::new()?;
        let target = temp_dir.path().join("qt-config.ini");
        fs::write(&target, "old")?;

        write_atomic(&target, b"new")?;

        assert_eq!(fs::read_to_string(&target)?, "new");
        Ok(())
    }

    #[test]
    fn test_failed_persist_leaves_destination_and_no_temp() -> TestResult {
        let temp_dir = TempDir::new()?;
        // A directory at the destination makes the final rename fail.
        let target = temp_dir.path().join("controller0.xml");
        fs::create_dir(&target)?;
        fs::write(target.join("keep.txt"), "untouched")?;

        let result = write_atomic(&target, b"content");

        assert!(matches!(result, Err(StorageError::Persist { .. })));
        assert!(target.is_dir());
        assert_eq!(fs::read_to_string(target.join("keep.txt"))?, "untouched");
        assert_eq!(leftover_temp_files(temp_dir.path())?, 0);
        Ok(())
    }

    #[test]
    fn test_read_optional_missing_is_none() -> TestResult {
        let temp_dir = TempDir::new()?;
        assert!(read_optional(&temp_dir.path().join("missing.ini"))?.is_none());
        Ok(())
    }

    #[test]
    fn test_read_optional_bytes_is_verbatim() -> TestResult {
        let temp_dir = TempDir::new()?;
        let target = temp_dir.path().join("qt-config.ini");
        fs::write(&target, b"name=caf\xe9\r\n")?;

        assert_eq!(
            read_optional_bytes(&target)?,
            Some(b"name=caf\xe9\r\n".to_vec())
        );
        assert_eq!(read_optional(&target)?.as_deref(), Some("name=caf\u{fffd}\r\n"));
        Ok(())
    }

    #[test]
    fn test_remove_if_exists_reports_removal() -> TestResult {
        let temp_dir = TempDir::new()?;
        let target = temp_dir.path().join("meridian_player2.xml");
        fs::write(&target, "x")?;

        assert!(remove_if_exists(&target)?);
        assert!(!target.exists());
        assert!(!remove_if_exists(&target)?);
        Ok(())
    }
}
