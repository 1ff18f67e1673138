//! Line-oriented access to Eden's `qt-config.ini`
//!
//! Qt writes sub-keys with backslashes (`player_0_button_a\default=false`)
//! and quotes engine strings, which generic INI parsers mangle. This module
//! works on raw lines instead: only lines it replaces or adds change, every
//! other byte of the file, line endings included, is kept.

use std::path::{Path, PathBuf};

use meridian_storage::{read_optional, read_optional_bytes, write_atomic};
use tracing::debug;

use crate::controls::ControlSet;
use crate::error::Result;

/// Section holding the controller configuration.
pub const CONTROLS_SECTION: &str = "Controls";

/// `qt-config.ini` of the Eden installation at `eden_dir`.
pub fn resolve_config_path(eden_dir: &Path) -> PathBuf {
    eden_dir.join("user").join("config").join("qt-config.ini")
}

/// Key/value pairs of the `[Controls]` section, keys verbatim.
///
/// A missing file reads as an empty set.
///
/// # Errors
///
/// Returns [`crate::EdenError::Storage`] if the file exists but cannot be
/// read.
pub fn read_controls(path: &Path) -> Result<ControlSet> {
    let Some(content) = read_optional(path)? else {
        return Ok(ControlSet::new());
    };

    let mut controls = ControlSet::new();
    let mut in_section = false;
    for line in content.lines() {
        let line = line.trim();
        if let Some(name) = section_name(line.as_bytes()) {
            in_section = name == CONTROLS_SECTION.as_bytes();
            continue;
        }
        if in_section && let Some((key, value)) = line.split_once('=') {
            controls.insert(key.trim(), value);
        }
    }
    Ok(controls)
}

/// Apply `updates` to the `[Controls]` section of the file at `path`.
///
/// Existing keys are replaced where they stand. The rest are appended after
/// the last non-blank line of the section; when there is no such section one
/// is added at the end of the file, and a missing file is created holding
/// only that section. The file is replaced atomically.
///
/// # Errors
///
/// Returns [`crate::EdenError::Storage`] if the file cannot be read or
/// written.
pub fn patch_controls(path: &Path, updates: &ControlSet) -> Result<()> {
    let original = read_optional_bytes(path)?.unwrap_or_default();
    let patched = patch_bytes(&original, updates);
    write_atomic(path, &patched)?;
    debug!(path = ?path, keys = updates.len(), "Patched [Controls]");
    Ok(())
}

/// Pure form of [`patch_controls`] over the raw file content.
///
/// Section headers and keys are matched as ASCII; bytes that are not valid
/// UTF-8 pass through untouched.
pub fn patch_bytes(original: &[u8], updates: &ControlSet) -> Vec<u8> {
    let newline = if original.windows(2).any(|w| w == b"\r\n") {
        b"\r\n".as_slice()
    } else {
        b"\n".as_slice()
    };
    let mut remaining = updates.clone();
    let mut out: Vec<Vec<u8>> = Vec::new();

    // Output position after the last non-blank line of the first
    // [Controls] section, once that section has been seen.
    let mut insert_at: Option<usize> = None;
    let mut section = SectionState::Before;

    for line in original.split_inclusive(|&b| b == b'\n') {
        let (body, eol) = split_line_ending(line);
        let trimmed = body.trim_ascii();

        if let Some(name) = section_name(trimmed) {
            section = match (section, name == CONTROLS_SECTION.as_bytes()) {
                (SectionState::Before, true) => SectionState::FirstControls,
                (_, true) => SectionState::Controls,
                (SectionState::Before, false) => SectionState::Before,
                (_, false) => SectionState::Other,
            };
            out.push(line.to_vec());
            if section == SectionState::FirstControls {
                insert_at = Some(out.len());
            }
            continue;
        }

        let in_controls = matches!(section, SectionState::FirstControls | SectionState::Controls);
        let replacement = in_controls
            .then(|| line_key(trimmed))
            .flatten()
            .and_then(|key| {
                remaining
                    .remove(key)
                    .map(|value| [format!("{key}={value}").as_bytes(), eol].concat())
            });
        out.push(replacement.unwrap_or_else(|| line.to_vec()));

        if section == SectionState::FirstControls && !trimmed.is_empty() {
            insert_at = Some(out.len());
        }
    }

    if remaining.is_empty() {
        return out.concat();
    }

    let additions: Vec<Vec<u8>> = remaining
        .iter()
        .map(|(key, value)| [format!("{key}={value}").as_bytes(), newline].concat())
        .collect();

    match insert_at {
        Some(position) => {
            terminate_line_before(&mut out, position, newline);
            out.splice(position..position, additions);
        }
        None => {
            if !out.is_empty() {
                let end = out.len();
                terminate_line_before(&mut out, end, newline);
                out.push(newline.to_vec());
            }
            out.push([format!("[{CONTROLS_SECTION}]").as_bytes(), newline].concat());
            out.extend(additions);
        }
    }
    out.concat()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    Before,
    FirstControls,
    Controls,
    Other,
}

fn section_name(trimmed: &[u8]) -> Option<&[u8]> {
    trimmed.strip_prefix(b"[")?.strip_suffix(b"]")
}

/// Trimmed key of a `key=value` line, when it is valid UTF-8.
fn line_key(trimmed: &[u8]) -> Option<&str> {
    if !trimmed.contains(&b'=') {
        return None;
    }
    let key = trimmed.split(|&b| b == b'=').next()?;
    std::str::from_utf8(key.trim_ascii()).ok()
}

fn split_line_ending(line: &[u8]) -> (&[u8], &[u8]) {
    if let Some(body) = line.strip_suffix(b"\r\n") {
        (body, b"\r\n".as_slice())
    } else if let Some(body) = line.strip_suffix(b"\n") {
        (body, b"\n".as_slice())
    } else {
        (line, b"".as_slice())
    }
}

/// Give the line just before `position` a line ending if it lacks one.
fn terminate_line_before(out: &mut [Vec<u8>], position: usize, newline: &[u8]) {
    if let Some(line) = position.checked_sub(1).and_then(|i| out.get_mut(i))
        && !line.ends_with(b"\n")
    {
        line.extend_from_slice(newline);
    }
}
