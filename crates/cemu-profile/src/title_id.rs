//! Wii U title id lookup for a game path

use std::path::Path;

use meridian_storage::read_optional;
use tracing::debug;

use crate::xml::parse_document;

const TITLE_ID_LEN: usize = 16;
const TITLE_CACHE_FILE: &str = "title_list_cache.xml";

/// Title id of the game at `game_path`.
///
/// Dumps are usually named after their title id, so the 16 leading hex
/// digits of the file stem are used when present. Otherwise Cemu's
/// `title_list_cache.xml` (portable location first) is searched for an
/// `<Entry>` whose `<path>` equals `game_path`.
///
/// Lookup is best effort: unreadable or malformed caches are skipped.
pub fn resolve_title_id(game_path: &Path, cemu_dir: &Path) -> Option<String> {
    if let Some(id) = game_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(leading_title_id)
    {
        return Some(id.to_string());
    }

    [
        cemu_dir.join("portable").join(TITLE_CACHE_FILE),
        cemu_dir.join(TITLE_CACHE_FILE),
    ]
    .iter()
    .find_map(|cache| lookup_in_cache(cache, game_path))
}

fn leading_title_id(stem: &str) -> Option<&str> {
    stem.get(..TITLE_ID_LEN)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn lookup_in_cache(cache: &Path, game_path: &Path) -> Option<String> {
    let xml = match read_optional(cache) {
        Ok(xml) => xml?,
        Err(err) => {
            debug!(path = ?cache, error = %err, "Title cache unreadable");
            return None;
        }
    };
    let root = match parse_document(&xml) {
        Ok(root) => root,
        Err(err) => {
            debug!(path = ?cache, error = %err, "Title cache malformed");
            return None;
        }
    };

    root.descendants("Entry").into_iter().find_map(|entry| {
        let cached = entry.child_text("path").filter(|p| !p.is_empty())?;
        let title_id = entry.child_text("title_id")?;
        (Path::new(cached) == game_path).then(|| title_id.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_title_id_from_file_name() {
        let dir = Path::new("/nonexistent");
        assert_eq!(
            resolve_title_id(Path::new("/games/0005000010101C00 Mario Kart 8.wua"), dir).as_deref(),
            Some("0005000010101C00")
        );
        assert_eq!(resolve_title_id(Path::new("/games/short.wua"), dir), None);
        assert_eq!(
            resolve_title_id(Path::new("/games/000500001010zz00.rpx"), dir),
            None
        );
    }

    #[test]
    fn test_title_id_from_cache_prefers_portable() -> TestResult {
        let temp_dir = TempDir::new()?;
        let game = temp_dir.path().join("games/Mario Kart 8/code/Turbo.rpx");
        let entry = |id: &str| {
            format!(
                "<title_list_cache><Entry><title_id>{id}</title_id><path>{}</path></Entry></title_list_cache>",
                game.display()
            )
        };
        fs::create_dir_all(temp_dir.path().join("portable"))?;
        fs::write(temp_dir.path().join("portable").join(TITLE_CACHE_FILE), entry("00050000AAAA0000"))?;
        fs::write(temp_dir.path().join(TITLE_CACHE_FILE), entry("00050000BBBB0000"))?;

        assert_eq!(
            resolve_title_id(&game, temp_dir.path()).as_deref(),
            Some("00050000AAAA0000")
        );
        Ok(())
    }

    #[test]
    fn test_malformed_cache_is_skipped() -> TestResult {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join(TITLE_CACHE_FILE), "<title_list_cache><Entry>")?;
        assert_eq!(resolve_title_id(Path::new("/games/game.rpx"), temp_dir.path()), None);
        Ok(())
    }
}
