//! Readers for the historical profile layouts
//!
//! Each reader looks for one layout and returns `None` when the document is
//! not in it. [`SHAPE_READERS`] lists them in the order they are tried; the
//! first non-empty result wins.

use tracing::debug;

use super::tree::XmlNode;
use crate::models::{AxisSettings, ControllerEntry, MappingSet};

/// Reads the controller list of one layout.
pub type ShapeReader = fn(&XmlNode) -> Option<Vec<ControllerEntry>>;

type EntryReader = fn(&XmlNode) -> Option<(u8, u64)>;

/// Layout readers in priority order.
pub static SHAPE_READERS: [ShapeReader; 3] = [read_canonical, read_legacy_nested, read_flat];

/// Cemu's own layout:
///
/// ```xml
/// <controller>
///   <api>SDLController</api>
///   ...
///   <mappings><entry><mapping>1</mapping><button>0</button></entry></mappings>
/// </controller>
/// ```
///
/// `<axis>` in place of `<button>` is accepted. Declines when a controller has
/// mapping entries but none of them are in this form.
fn read_canonical(root: &XmlNode) -> Option<Vec<ControllerEntry>> {
    let mut controllers = Vec::new();
    for node in api_controllers(root) {
        let (mappings, seen) = read_mappings(node.child("mappings"), canonical_entry);
        if seen > 0 && mappings.is_empty() {
            return None;
        }
        controllers.push(read_controller(node, mappings));
    }
    Some(controllers)
}

/// Older Meridian layout with the id outside the `<mapping>` element:
///
/// ```xml
/// <entry>
///   <mapping><device>..</device><button>0</button></mapping>
///   <entry>1</entry>
/// </entry>
/// ```
fn read_legacy_nested(root: &XmlNode) -> Option<Vec<ControllerEntry>> {
    let controllers: Vec<_> = api_controllers(root)
        .into_iter()
        .map(|node| read_controller(node, read_mappings(node.child("mappings"), any_entry).0))
        .collect();
    Some(controllers)
}

/// Oldest Meridian layout: `<controller>` holds only the API name and
/// `<mappings>` is a child of the root.
fn read_flat(root: &XmlNode) -> Option<Vec<ControllerEntry>> {
    let controller = root.child("controller");
    let mappings_node = root.child("mappings");
    if controller.is_none() && mappings_node.is_none() {
        return None;
    }

    let (mappings, _) = read_mappings(mappings_node, any_entry);
    if mappings.is_empty() && controller.is_some_and(|c| c.child("api").is_some()) {
        return None;
    }

    let api = controller.map_or("SDLController", XmlNode::trimmed_text);
    Some(vec![ControllerEntry {
        api: api.to_string(),
        mappings,
        ..ControllerEntry::default()
    }])
}

fn api_controllers(root: &XmlNode) -> Vec<&XmlNode> {
    root.descendants("controller")
        .into_iter()
        .filter(|node| node.child("api").is_some())
        .collect()
}

fn read_controller(node: &XmlNode, mappings: MappingSet) -> ControllerEntry {
    let defaults = ControllerEntry::default();
    let uuid = match node.child_text("uuid") {
        None | Some("") => defaults.uuid,
        Some(uuid) => uuid.to_string(),
    };
    ControllerEntry {
        api: node.child_text("api").unwrap_or_default().to_string(),
        uuid,
        display_name: node.child_raw_text("display_name").unwrap_or_default().to_string(),
        product_guid: node.child_text("product_guid").unwrap_or_default().to_string(),
        rumble: parse_or(node.child_text("rumble"), defaults.rumble),
        motion: node
            .child_text("motion")
            .is_some_and(|m| m == "1" || m.eq_ignore_ascii_case("true")),
        axis: read_axis_group(node.child("axis"), AxisSettings::STICK),
        rotation: read_axis_group(node.child("rotation"), AxisSettings::STICK),
        trigger: read_axis_group(node.child("trigger"), AxisSettings::TRIGGER),
        mappings,
    }
}

/// Accepts `<deadzone>`/`<range>` children or a bare deadzone value.
fn read_axis_group(node: Option<&XmlNode>, default: AxisSettings) -> AxisSettings {
    let Some(node) = node else {
        return default;
    };
    if node.child("deadzone").is_some() || node.child("range").is_some() {
        return AxisSettings {
            deadzone: parse_or(node.child_text("deadzone"), default.deadzone),
            range: parse_or(node.child_text("range"), default.range),
        };
    }
    match node.trimmed_text().parse::<f32>() {
        Ok(deadzone) => AxisSettings {
            deadzone,
            range: 1.0,
        },
        Err(_) => default,
    }
}

/// Returns the mappings read and the number of `<entry>` elements seen.
fn read_mappings(node: Option<&XmlNode>, read_entry: EntryReader) -> (MappingSet, usize) {
    let Some(node) = node else {
        return (MappingSet::new(), 0);
    };
    let entries: Vec<&XmlNode> = node.children_named("entry").collect();
    let mut mappings = MappingSet::new();
    for entry in entries.iter().copied() {
        match read_entry(entry) {
            Some((id, code)) => {
                mappings.insert(id, code);
            }
            None => debug!("Skipping unreadable mapping entry"),
        }
    }
    (mappings, entries.len())
}

fn canonical_entry(entry: &XmlNode) -> Option<(u8, u64)> {
    let mapping = entry.child("mapping")?;
    if mapping.child("device").is_some() {
        return None;
    }
    let id = mapping.trimmed_text().parse().ok()?;
    let code = entry
        .child_text("button")
        .or_else(|| entry.child_text("axis"))?;
    Some((id, parse_or(Some(code), 0)))
}

fn legacy_entry(entry: &XmlNode) -> Option<(u8, u64)> {
    let mapping = entry.child("mapping")?;
    mapping.child("device")?;
    let id = entry.child_text("entry")?.parse().ok()?;
    Some((id, parse_or(mapping.child_text("button"), 0)))
}

fn any_entry(entry: &XmlNode) -> Option<(u8, u64)> {
    canonical_entry(entry).or_else(|| legacy_entry(entry))
}

fn parse_or<T: std::str::FromStr>(text: Option<&str>, default: T) -> T {
    text.and_then(|t| t.parse().ok()).unwrap_or(default)
}
