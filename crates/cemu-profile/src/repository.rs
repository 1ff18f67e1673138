//! Controller profile storage inside a Cemu installation
//!
//! Profiles live in `controllerProfiles/`, preferring the portable layout
//! (`<cemu>/portable/controllerProfiles/`) when Cemu runs in portable mode.
//! `controller0.xml` .. `controller7.xml` in the same directory are the slot
//! files Cemu loads at startup. Per-title assignments go to
//! `<cemu>/gameProfiles/<title_id>.ini`.
//!
//! Every write goes through [`meridian_storage::write_atomic`].

use std::fs;
use std::path::{Path, PathBuf};

use meridian_storage::{
    StorageError, read_optional, read_optional_bytes, remove_if_exists, write_atomic,
};
use tracing::{debug, info};

use crate::error::{CemuError, Result};
use crate::models::{CemuProfile, GameAssignment};
use crate::xml::{parse_profile, to_xml};

/// Highest controller slot Cemu loads.
pub const MAX_SLOT: u32 = 7;

const PROFILE_DIR: &str = "controllerProfiles";
const PORTABLE_DIR: &str = "portable";
const GAME_PROFILE_DIR: &str = "gameProfiles";

/// Profile operations rooted at one Cemu installation directory.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    cemu_dir: PathBuf,
}

impl ProfileRepository {
    /// Repository for the installation at `cemu_dir` (the directory holding
    /// `Cemu.exe`). Nothing is touched until an operation runs.
    pub fn new(cemu_dir: impl Into<PathBuf>) -> Self {
        Self {
            cemu_dir: cemu_dir.into(),
        }
    }

    /// Installation directory.
    pub fn cemu_dir(&self) -> &Path {
        &self.cemu_dir
    }

    /// Active `controllerProfiles` directory, created when missing.
    ///
    /// The portable directory wins when it or `portable/` already exists.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::Storage`] if the directory cannot be created.
    pub fn profile_dir(&self) -> Result<PathBuf> {
        let portable_root = self.cemu_dir.join(PORTABLE_DIR);
        let portable = portable_root.join(PROFILE_DIR);
        let dir = if portable.exists() || portable_root.exists() {
            portable
        } else {
            self.cemu_dir.join(PROFILE_DIR)
        };
        ensure_dir(&dir)?;
        Ok(dir)
    }

    /// `gameProfiles` directory, created when missing.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::Storage`] if the directory cannot be created.
    pub fn game_profile_dir(&self) -> Result<PathBuf> {
        let dir = self.cemu_dir.join(GAME_PROFILE_DIR);
        ensure_dir(&dir)?;
        Ok(dir)
    }

    /// Sorted names of the stored profiles. Slot files are not listed.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::Storage`] if the directory cannot be read.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let dir = self.profile_dir()?;
        let read_err = |source| StorageError::Read {
            path: dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("xml") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && is_valid_profile_name(stem)
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load the profile stored as `<name>.xml`.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::ProfileNotFound`] when the file does not exist,
    /// [`CemuError::InvalidProfileName`] for names that cannot be a file stem,
    /// or a parse error.
    pub fn load_profile(&self, name: &str) -> Result<CemuProfile> {
        let path = self.profile_path(name)?;
        let Some(xml) = read_optional(&path)? else {
            return Err(CemuError::profile_not_found(name, path));
        };
        debug!(name, path = ?path, "Loading profile");
        parse_profile(&xml)
    }

    /// Validate and store `profile` as `<name>.xml`.
    ///
    /// `name` defaults to the profile's own name and is sanitized. A profile
    /// without a name takes the sanitized one.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::InvalidProfileName`], [`CemuError::Validation`]
    /// or a write failure.
    pub fn save_profile(&self, profile: &CemuProfile, name: Option<&str>) -> Result<PathBuf> {
        let requested = name
            .filter(|n| !n.is_empty())
            .unwrap_or(&profile.profile_name);
        let name = sanitize_profile_name(requested)?;

        let mut profile = profile.clone();
        if profile.profile_name.is_empty() {
            profile.profile_name.clone_from(&name);
        }
        profile.validate()?;

        let path = self.profile_dir()?.join(format!("{name}.xml"));
        write_atomic(&path, to_xml(&profile)?.as_bytes())?;
        info!(name = %name, path = ?path, "Profile saved");
        Ok(path)
    }

    /// Delete `<name>.xml`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::InvalidProfileName`] or a removal failure.
    pub fn delete_profile(&self, name: &str) -> Result<bool> {
        let path = self.profile_path(name)?;
        let removed = remove_if_exists(&path)?;
        if removed {
            info!(name, "Profile deleted");
        }
        Ok(removed)
    }

    /// Parse the XML file at `source` and store it under `name`, or the
    /// source file stem when `name` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::ProfileNotFound`] when `source` is missing, or any
    /// parse or save error.
    pub fn import_profile(&self, source: &Path, name: Option<&str>) -> Result<CemuProfile> {
        let Some(xml) = read_optional(source)? else {
            return Err(CemuError::profile_not_found(
                source.display().to_string(),
                source,
            ));
        };
        let mut profile = parse_profile(&xml)?;

        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = sanitize_profile_name(name.unwrap_or(&stem))?;
        if profile.profile_name.is_empty() {
            profile.profile_name.clone_from(&name);
        }
        self.save_profile(&profile, Some(name.as_str()))?;
        Ok(profile)
    }

    /// Write `profile` as `controller<slot>.xml`.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::InvalidSlot`] for slots above 7, or a
    /// validation or write failure.
    pub fn activate_slot(&self, profile: &CemuProfile, slot: u32) -> Result<PathBuf> {
        let path = self.slot_path(slot)?;
        profile.validate()?;
        write_atomic(&path, to_xml(profile)?.as_bytes())?;
        info!(slot, profile = %profile.profile_name, "Slot activated");
        Ok(path)
    }

    /// Remove `controller<slot>.xml`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::InvalidSlot`] or a removal failure.
    pub fn deactivate_slot(&self, slot: u32) -> Result<bool> {
        let removed = remove_if_exists(&self.slot_path(slot)?)?;
        if removed {
            info!(slot, "Slot deactivated");
        }
        Ok(removed)
    }

    /// Profile currently in `controller<slot>.xml`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CemuError::InvalidSlot`], a read failure or a parse error.
    pub fn load_slot(&self, slot: u32) -> Result<Option<CemuProfile>> {
        let path = self.slot_path(slot)?;
        read_optional(&path)?
            .map(|xml| parse_profile(&xml))
            .transpose()
    }

    /// Write the controller assignment lines of a game profile.
    ///
    /// Lines of an existing file that are not `controller<n>` assignments are
    /// kept verbatim and written first; every old assignment is dropped and
    /// the new ones follow in player order.
    ///
    /// # Errors
    ///
    /// Returns a read or write failure.
    pub fn apply_game_assignment(&self, assignment: &GameAssignment) -> Result<PathBuf> {
        let path = self.game_profile_dir()?.join(assignment.file_name());
        let existing = read_optional_bytes(&path)?.unwrap_or_default();

        let mut content = Vec::with_capacity(existing.len());
        let kept = existing
            .split_inclusive(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\n").unwrap_or(line))
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !is_assignment_line(line));
        for line in kept {
            content.extend_from_slice(line);
            content.push(b'\n');
        }
        for (player, profile) in &assignment.player_to_profile {
            content.extend_from_slice(format!("controller{player} = {profile}\n").as_bytes());
        }
        write_atomic(&path, &content)?;
        info!(
            title_id = %assignment.title_id,
            players = assignment.player_to_profile.len(),
            "Game profile assignment written"
        );
        Ok(path)
    }

    fn profile_path(&self, name: &str) -> Result<PathBuf> {
        if !is_file_stem(name) {
            return Err(CemuError::InvalidProfileName(name.to_string()));
        }
        Ok(self.profile_dir()?.join(format!("{name}.xml")))
    }

    fn slot_path(&self, slot: u32) -> Result<PathBuf> {
        if slot > MAX_SLOT {
            return Err(CemuError::InvalidSlot { slot });
        }
        Ok(self.profile_dir()?.join(slot_file_name(slot)))
    }
}

/// `controller<slot>.xml`
pub fn slot_file_name(slot: u32) -> String {
    format!("controller{slot}.xml")
}

/// Turn `name` into a safe file stem.
///
/// Characters other than ASCII letters, digits, `_`, space, `.`, `(`, `)`
/// and `-` become `_`, and the result is trimmed. Names that would collide
/// with a slot file (`controller0` .. `controller9`) get a `profile_` prefix.
///
/// # Errors
///
/// Returns [`CemuError::InvalidProfileName`] when nothing is left.
pub fn sanitize_profile_name(name: &str) -> Result<String> {
    let cleaned = clean_profile_name(name);
    if cleaned.is_empty() {
        return Err(CemuError::InvalidProfileName(name.to_string()));
    }
    Ok(cleaned)
}

/// [`sanitize_profile_name`] without the emptiness check.
pub(crate) fn clean_profile_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if is_stem_char(c) { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim();
    if is_reserved_name(cleaned) {
        return format!("profile_{cleaned}");
    }
    cleaned.to_string()
}

/// True for names [`ProfileRepository::list_profiles`] reports: a plain file
/// stem that is not a slot file name.
pub fn is_valid_profile_name(name: &str) -> bool {
    is_file_stem(name) && !is_reserved_name(name)
}

fn is_stem_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '.' | '(' | ')' | '-')
}

fn is_file_stem(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && name.chars().all(is_stem_char)
}

fn is_reserved_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower
        .strip_prefix("controller")
        .is_some_and(|rest| rest.len() == 1 && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// `controller<n> = ...` with `n` >= 1, case-insensitive.
fn is_assignment_line(line: &[u8]) -> bool {
    let key = line
        .split(|&b| b == b'=')
        .next()
        .unwrap_or_default()
        .trim_ascii();
    let Some((prefix, digits)) = key.split_at_checked(b"controller".len()) else {
        return false;
    };
    prefix.eq_ignore_ascii_case(b"controller")
        && !digits.is_empty()
        && !digits.starts_with(b"0")
        && digits.iter().all(u8::is_ascii_digit)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(())
}
