//! Cemu controller profile XML codec
//!
//! Reading is tolerant: besides the canonical layout Cemu writes, profiles
//! produced by older Meridian builds are accepted. Writing always produces
//! the canonical layout.

mod shapes;
mod tree;
mod writer;

pub use shapes::SHAPE_READERS;
pub use tree::{XmlNode, parse_document};
pub use writer::to_xml;

use tracing::warn;

use crate::error::{CemuError, Result};
use crate::models::{CemuProfile, EmulatedType};

/// Root element of every controller profile.
pub const ROOT_TAG: &str = "emulated_controller";

/// Parse a controller profile.
///
/// # Errors
///
/// Returns [`CemuError::MalformedXml`] when `xml` is not well-formed and
/// [`CemuError::UnexpectedRoot`] when the root is not
/// `<emulated_controller>`. Unparseable field values never fail; they fall
/// back to their defaults.
pub fn parse_profile(xml: &str) -> Result<CemuProfile> {
    let root = parse_document(xml)?;
    profile_from_tree(&root)
}

/// Build a profile from an already parsed element tree.
///
/// # Errors
///
/// Returns [`CemuError::UnexpectedRoot`] when the root is not
/// `<emulated_controller>`.
pub fn profile_from_tree(root: &XmlNode) -> Result<CemuProfile> {
    if root.name != ROOT_TAG {
        return Err(CemuError::UnexpectedRoot {
            found: root.name.clone(),
        });
    }

    let emulated_type = match root.child_text("type") {
        None | Some("") => EmulatedType::default(),
        Some(name) => EmulatedType::from_name(name).unwrap_or_else(|| {
            warn!(emulated_type = name, "Unknown emulated type, using Wii U GamePad");
            EmulatedType::default()
        }),
    };

    let controllers = SHAPE_READERS
        .iter()
        .find_map(|read| read(root).filter(|found| !found.is_empty()))
        .unwrap_or_default();

    Ok(CemuProfile {
        emulated_type,
        profile_name: root.child_text("profile").unwrap_or_default().to_string(),
        controllers,
    })
}
