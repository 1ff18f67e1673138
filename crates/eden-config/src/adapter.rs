//! Binding model to Eden `[Controls]` entries
//!
//! Eden describes every input as an SDL engine string:
//!
//! ```text
//! "engine:sdl,guid:<guid>,port:<n>,pad:<n>,button:<n>"
//! "engine:sdl,guid:<guid>,port:<n>,pad:<n>,axis:<n>,threshold:0.500000,direction:+"
//! ```
//!
//! Keys are `player_<i>_<field>` with `i` the 0-based Eden player index, each
//! preceded by its `\default=false` companion the way Eden writes them.

use std::collections::BTreeMap;

use meridian_input::{
    BindingModel, ControllerType, HatDirection, PlayerSnapshot, RawBinding, is_unbound_value,
};
use tracing::debug;

use crate::controls::ControlSet;

/// Highest 0-based Eden player index.
pub const MAX_PLAYER_INDEX: u8 = 9;

const BIND_TO_EDEN_KEY: &[(&str, &str)] = &[
    ("a", "button_a"),
    ("b", "button_b"),
    ("x", "button_x"),
    ("y", "button_y"),
    ("cross", "button_a"),
    ("circle", "button_b"),
    ("square", "button_x"),
    ("triangle", "button_y"),
    ("l", "button_l"),
    ("r", "button_r"),
    ("zl", "button_zl"),
    ("zr", "button_zr"),
    ("lb", "button_l"),
    ("rb", "button_r"),
    ("lt", "button_zl"),
    ("rt", "button_zr"),
    ("l1", "button_l"),
    ("r1", "button_r"),
    ("l2", "button_zl"),
    ("r2", "button_zr"),
    ("plus", "button_plus"),
    ("minus", "button_minus"),
    ("home", "button_home"),
    ("capture", "button_screenshot"),
    ("start", "button_plus"),
    ("back", "button_minus"),
    ("guide", "button_home"),
    ("options", "button_plus"),
    ("share", "button_minus"),
    ("create", "button_minus"),
    ("ps", "button_home"),
    ("dp_up", "button_dup"),
    ("dp_down", "button_ddown"),
    ("dp_left", "button_dleft"),
    ("dp_right", "button_dright"),
    ("ls_press", "button_lstick"),
    ("ls_click", "button_lstick"),
    ("l3", "button_lstick"),
    ("rs_press", "button_rstick"),
    ("rs_click", "button_rstick"),
    ("r3", "button_rstick"),
];

/// Bindings folded into the compound stick entries.
const STICK_DIRECTIONS: [&str; 8] = [
    "ls_up", "ls_down", "ls_left", "ls_right", "rs_up", "rs_down", "rs_left", "rs_right",
];

/// Compound stick entries: key, X binding, Y binding, default axes.
const STICKS: [(&str, &str, &str, (u32, u32)); 2] = [
    ("lstick", "ls_left", "ls_up", (0, 1)),
    ("rstick", "rs_left", "rs_up", (2, 3)),
];

const EDEN_TYPES: &[(ControllerType, u8)] = &[
    (ControllerType::ProController, 0),
    (ControllerType::DualJoycons, 1),
    (ControllerType::LeftJoycon, 2),
    (ControllerType::RightJoycon, 3),
    (ControllerType::Handheld, 4),
    (ControllerType::GameCubeController, 5),
];

/// SDL button numbers Eden uses for hat directions.
fn hat_button(direction: HatDirection) -> u32 {
    match direction {
        HatDirection::Up => 11,
        HatDirection::Down => 12,
        HatDirection::Left => 13,
        HatDirection::Right => 14,
    }
}

/// Eden's `type` value; unknown or absent types are the Pro Controller.
pub fn eden_type(controller_type: Option<ControllerType>) -> u8 {
    controller_type
        .and_then(|ty| EDEN_TYPES.iter().find(|(from, _)| *from == ty))
        .map_or(0, |(_, value)| *value)
}

/// Eden key suffix for a logical binding name.
pub fn eden_key(binding: &str) -> Option<&'static str> {
    BIND_TO_EDEN_KEY
        .iter()
        .find(|(name, _)| *name == binding)
        .map(|(_, key)| *key)
}

/// 0-based Eden index for 1-based `player`.
pub fn eden_index(player: u8) -> Option<u8> {
    player.checked_sub(1).filter(|i| *i <= MAX_PLAYER_INDEX)
}

fn is_stick_direction(name: &str) -> bool {
    STICK_DIRECTIONS.contains(&name)
}

/// Device part shared by every engine string of one player.
#[derive(Debug, Clone)]
struct SdlDevice {
    guid: String,
    port: u32,
}

impl SdlDevice {
    fn for_model(model: &BindingModel, index: u8) -> Self {
        Self {
            guid: model.guid().unwrap_or("0").to_string(),
            port: model.device_index.unwrap_or_else(|| u32::from(index)),
        }
    }

    fn engine(&self, tail: &str) -> String {
        format!(
            "\"engine:sdl,guid:{},port:{},pad:{},{tail}\"",
            self.guid, self.port, self.port
        )
    }

    fn binding(&self, binding: RawBinding) -> String {
        match binding {
            RawBinding::Button(button) => self.engine(&format!("button:{button}")),
            RawBinding::Axis { index, direction } => self.engine(&format!(
                "axis:{index},threshold:0.500000,direction:{}",
                direction.symbol()
            )),
            RawBinding::Hat { direction, .. } => {
                self.engine(&format!("button:{}", hat_button(direction)))
            }
        }
    }

    fn stick(&self, axis_x: u32, axis_y: u32) -> String {
        self.engine(&format!(
            "axis_x:{axis_x},axis_y:{axis_y},deadzone:0.150000,range:1.000000,threshold:0.500000"
        ))
    }
}

fn axis_index(bindings: &BTreeMap<String, String>, name: &str) -> Option<u32> {
    let value = bindings
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
        .map(|(_, v)| v)?;
    match RawBinding::parse(value)? {
        RawBinding::Axis { index, .. } => Some(index),
        _ => None,
    }
}

/// Convert one player into `[Controls]` entries for Eden player `index`.
///
/// Returns `None` when the player is disconnected or has no bindings.
pub fn convert_player(model: &BindingModel, index: u8) -> Option<ControlSet> {
    if !model.is_active() {
        return None;
    }

    let device = SdlDevice::for_model(model, index);
    let prefix = format!("player_{index}");
    let key = |field: &str| format!("{prefix}_{field}");
    let mut set = ControlSet::new();

    set.insert_with_default(&key("type"), eden_type(model.controller_type).to_string());
    set.insert_with_default(&key("connected"), "true");
    set.insert_with_default(&key("vibration_enabled"), "true");

    for (name, value) in &model.bindings {
        let name = name.trim().to_lowercase();
        if name == "motion" || is_stick_direction(&name) {
            continue;
        }
        let Some(field) = eden_key(&name) else {
            debug!(player = index, binding = %name, "No Eden key for binding");
            continue;
        };
        if is_unbound_value(value) {
            continue;
        }
        let Some(binding) = RawBinding::parse(value) else {
            debug!(player = index, binding = %name, value = %value, "Unsupported binding value for Eden");
            continue;
        };
        set.insert_with_default(&key(field), device.binding(binding));
    }

    for (stick, x_name, y_name, (default_x, default_y)) in STICKS {
        let (axis_x, axis_y) = axis_index(&model.bindings, x_name)
            .zip(axis_index(&model.bindings, y_name))
            .unwrap_or((default_x, default_y));
        set.insert_with_default(&key(stick), device.stick(axis_x, axis_y));
    }

    if model.motion_enabled() {
        set.insert_with_default(&key("motionleft"), device.engine("motion:0"));
        set.insert_with_default(&key("motionright"), device.engine("motion:1"));
    }

    Some(set)
}

/// Convert every player of `snapshot`, keyed by Eden index. Players outside
/// 1..=10 and players that produce nothing are left out.
pub fn convert_players(snapshot: &PlayerSnapshot) -> BTreeMap<u8, ControlSet> {
    snapshot
        .iter()
        .filter_map(|(player, model)| {
            let index = eden_index(player)?;
            convert_player(model, index).map(|set| (index, set))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_input::InputApi;
    use tracing_test::traced_test;

    #[test]
    fn test_stick_directions_are_not_buttons() {
        for name in ["ls_up", "ls_down", "ls_left", "ls_right", "rs_up", "rs_right"] {
            assert!(is_stick_direction(name), "{name}");
        }
        for name in ["ls_click", "rs_press", "l3", "a"] {
            assert!(!is_stick_direction(name), "{name}");
        }
    }

    #[test]
    fn test_types_and_indices() {
        assert_eq!(eden_type(None), 0);
        assert_eq!(eden_type(Some(ControllerType::Handheld)), 4);
        assert_eq!(eden_type(Some(ControllerType::GameCubeController)), 5);
        assert_eq!(eden_type(Some(ControllerType::Wiimote)), 0);
        assert_eq!(eden_index(0), None);
        assert_eq!(eden_index(1), Some(0));
        assert_eq!(eden_index(10), Some(9));
        assert_eq!(eden_index(11), None);
    }

    #[test]
    #[traced_test]
    fn test_placeholder_values_are_skipped_quietly() {
        let model = BindingModel::connected(InputApi::Sdl)
            .with_binding("a", "None")
            .with_binding("b", " ")
            .with_binding("x", "Button 2")
            .with_binding("y", "Key 5");
        let set = convert_player(&model, 0);

        assert!(set.as_ref().is_some_and(|s| s.get("player_0_button_a").is_none()));
        assert!(set.as_ref().is_some_and(|s| s.get("player_0_button_b").is_none()));
        assert!(set.as_ref().is_some_and(|s| s.get("player_0_button_x").is_some()));
        assert!(logs_contain("value=Key 5"));
        assert!(!logs_contain("value=None"));
    }

    #[test]
    fn test_inactive_players_produce_nothing() {
        assert!(convert_player(&BindingModel::connected(InputApi::Sdl), 0).is_none());
        let disconnected = BindingModel {
            connected: false,
            ..BindingModel::connected(InputApi::Sdl).with_binding("a", "Button 0")
        };
        assert!(convert_player(&disconnected, 0).is_none());
    }
}
