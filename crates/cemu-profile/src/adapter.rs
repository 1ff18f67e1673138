//! Conversion between launcher binding models and Cemu profiles

use std::collections::BTreeMap;

use meridian_input::{
    BindingModel, DeviceResolver, NoDeviceResolver, PlayerSnapshot, RawBinding, is_unbound_value,
};
use tracing::debug;

use crate::buttons;
use crate::models::{CemuProfile, ControllerEntry, MappingSet};
use crate::repository::clean_profile_name;
use crate::tables::{self, BindingTables, STANDARD_TABLES};

/// Profile name prefix; player `n` gets `<prefix><n>`.
pub const DEFAULT_PROFILE_PREFIX: &str = "meridian_player";

/// Display name used when the launcher has no device label.
pub const DEFAULT_DISPLAY_NAME: &str = "Meridian Controller";

/// Collaborators and naming used by conversion.
#[derive(Clone, Copy)]
pub struct ConversionContext<'a> {
    /// Lookup tables
    pub tables: &'a BindingTables,
    /// Device identity lookup for DirectInput players
    pub resolver: &'a dyn DeviceResolver,
    /// Profile name prefix
    pub name_prefix: &'a str,
}

impl Default for ConversionContext<'_> {
    fn default() -> Self {
        Self {
            tables: &STANDARD_TABLES,
            resolver: &NoDeviceResolver,
            name_prefix: DEFAULT_PROFILE_PREFIX,
        }
    }
}

impl std::fmt::Debug for ConversionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionContext")
            .field("name_prefix", &self.name_prefix)
            .finish_non_exhaustive()
    }
}

impl<'a> ConversionContext<'a> {
    /// Use `resolver` for device identity.
    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn DeviceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Use `prefix` for profile names.
    #[must_use]
    pub fn with_name_prefix(mut self, prefix: &'a str) -> Self {
        self.name_prefix = prefix;
        self
    }

    /// Profile name for 1-based `player`, as it is stored on disk.
    ///
    /// The prefix goes through the same cleaning as
    /// [`sanitize_profile_name`](crate::sanitize_profile_name), so `"Player #"`
    /// yields `"Player _1"`. The player number keeps the result non-empty.
    pub fn profile_name(&self, player: u8) -> String {
        clean_profile_name(&format!("{}{player}", self.name_prefix))
    }
}

/// Device identity written to `<uuid>` and `<product_guid>`.
struct DeviceIdentity {
    uuid: String,
    product_guid: String,
}

impl DeviceIdentity {
    fn uuid_only(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            product_guid: String::new(),
        }
    }
}

/// Identity sources tried per API, most specific first, ending at `"0"`.
fn resolve_identity(model: &BindingModel, api: &str, ctx: &ConversionContext<'_>) -> DeviceIdentity {
    let index = model.device_index.map(|i| i.to_string());

    if api == "DirectInput"
        && !model.device_name.trim().is_empty()
        && let Some(device) = ctx.resolver.resolve(&model.device_name, model.device_index)
    {
        return DeviceIdentity {
            uuid: device.instance_guid,
            product_guid: device.product_guid,
        };
    }

    let from_guid = match api {
        "DirectInput" | "SDLController" => model.guid().map(str::to_string),
        _ => None,
    };
    DeviceIdentity::uuid_only(from_guid.or(index).unwrap_or_else(|| "0".to_string()))
}

/// Convert one player's model into a profile.
///
/// Returns `None` when the player is disconnected, has no bindings, or none
/// of its bindings can be represented.
pub fn convert_player(
    model: &BindingModel,
    player: u8,
    ctx: &ConversionContext<'_>,
) -> Option<CemuProfile> {
    if !model.is_active() {
        return None;
    }

    let api = tables::api_name(model.api);
    let emulated_type = tables::emulated_type_for(model.controller_type);
    let name_to_id = ctx.tables.forward(emulated_type);
    let correction = ctx
        .tables
        .correction_for(api, emulated_type, &model.device_name);

    let mut mappings = MappingSet::new();
    for (name, value) in &model.bindings {
        let name = name.trim().to_lowercase();
        if name == "motion" {
            continue;
        }
        let Some(id) = name_to_id.get(name.as_str()).copied() else {
            debug!(player, binding = %name, "Skipping unknown binding");
            continue;
        };

        let mut binding = RawBinding::parse(value);
        if let Some(correction) = correction {
            binding = correction.apply(&name, binding);
        }
        let Some(code) = binding.and_then(buttons::encode) else {
            if !is_unbound_value(value) {
                debug!(player, binding = %name, value = %value, "Binding has no Cemu code");
            }
            continue;
        };
        mappings.insert(id, code);
    }

    if mappings.is_empty() {
        debug!(player, "No representable bindings");
        return None;
    }

    let identity = resolve_identity(model, api, ctx);
    let display_name = match model.device_name.trim() {
        "" => DEFAULT_DISPLAY_NAME.to_string(),
        name => name.to_string(),
    };

    Some(CemuProfile {
        emulated_type,
        profile_name: ctx.profile_name(player),
        controllers: vec![ControllerEntry {
            api: api.to_string(),
            uuid: identity.uuid,
            display_name,
            product_guid: identity.product_guid,
            motion: model.motion_enabled(),
            mappings,
            ..ControllerEntry::default()
        }],
    })
}

/// Convert every player of `snapshot`; only players that produce a profile
/// appear in the result.
pub fn convert_players(
    snapshot: &PlayerSnapshot,
    ctx: &ConversionContext<'_>,
) -> BTreeMap<u8, CemuProfile> {
    snapshot
        .iter()
        .filter_map(|(player, model)| convert_player(model, player, ctx).map(|p| (player, p)))
        .collect()
}

/// Recover launcher bindings from the first controller of `profile`.
///
/// Each mapping id yields its canonical logical name; ids without one are
/// dropped. A set motion flag comes back as `motion = "Gyro"`.
pub fn extract_bindings(profile: &CemuProfile, tables: &BindingTables) -> BTreeMap<String, String> {
    let Some(controller) = profile.first_controller() else {
        return BTreeMap::new();
    };

    let id_to_name = tables.reverse(profile.emulated_type);
    let mut bindings: BTreeMap<String, String> = controller
        .mappings
        .iter()
        .filter_map(|(id, code)| {
            id_to_name
                .get(&id)
                .map(|name| ((*name).to_string(), buttons::decode(code)))
        })
        .collect();

    if controller.motion {
        bindings.insert("motion".to_string(), "Gyro".to_string());
    }
    bindings
}
