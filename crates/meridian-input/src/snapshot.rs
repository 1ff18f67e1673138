//! Tolerant decoding of the launcher's player settings
//!
//! The launcher hands over a JSON object keyed by 1-based player number:
//!
//! ```json
//! {
//!   "1": {
//!     "connected": true,
//!     "api": "DirectInput",
//!     "device": "DualSense Wireless Controller",
//!     "device_index": 0,
//!     "device_guid": "030000004c050000e60c000000000000",
//!     "type": "Pro Controller",
//!     "bindings": { "a": "Button 1", "zl": "Axis 4-" }
//!   }
//! }
//! ```
//!
//! Every field is optional. A field of the wrong JSON type decodes as if it
//! were absent, and entries that are not objects or whose key is not a player
//! number are skipped.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SnapshotError;
use crate::model::{BindingModel, ControllerType, InputApi};

/// All players' binding models for one configuration pass, keyed by 1-based
/// player number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSnapshot {
    players: BTreeMap<u8, BindingModel>,
}

impl PlayerSnapshot {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the text is not JSON or not an object.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Decode a snapshot from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotAnObject`] when `value` is not an object.
    pub fn from_value(value: &Value) -> Result<Self, SnapshotError> {
        let Value::Object(entries) = value else {
            return Err(SnapshotError::NotAnObject(json_type_name(value)));
        };

        let mut players = BTreeMap::new();
        for (key, entry) in entries {
            let Ok(player) = key.trim().parse::<u8>() else {
                debug!(key = %key, "Skipping non-numeric player key");
                continue;
            };
            let Value::Object(fields) = entry else {
                debug!(player, "Skipping non-object player entry");
                continue;
            };
            players.insert(player, binding_model_from_object(fields));
        }

        Ok(Self { players })
    }

    /// Add or replace a player.
    pub fn insert(&mut self, player: u8, model: BindingModel) -> Option<BindingModel> {
        self.players.insert(player, model)
    }

    /// Builder form of [`PlayerSnapshot::insert`].
    #[must_use]
    pub fn with_player(mut self, player: u8, model: BindingModel) -> Self {
        self.players.insert(player, model);
        self
    }

    /// Model for `player`, if present.
    pub fn get(&self, player: u8) -> Option<&BindingModel> {
        self.players.get(&player)
    }

    /// Players in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BindingModel)> {
        self.players.iter().map(|(player, model)| (*player, model))
    }

    /// Number of players present.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when no players are present.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

fn binding_model_from_object(fields: &Map<String, Value>) -> BindingModel {
    let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::trim);

    let bindings = fields
        .get("bindings")
        .and_then(Value::as_object)
        .map(|raw| {
            raw.iter()
                .filter_map(|(name, value)| value.as_str().map(|v| (name.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();

    BindingModel {
        connected: fields
            .get("connected")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        api: text("api")
            .and_then(InputApi::from_label)
            .unwrap_or_default(),
        device_name: text("device").unwrap_or_default().to_string(),
        device_index: fields
            .get("device_index")
            .and_then(Value::as_u64)
            .and_then(|index| u32::try_from(index).ok()),
        device_guid: text("device_guid")
            .filter(|guid| !guid.is_empty())
            .map(str::to_string),
        controller_type: text("type").and_then(ControllerType::from_label),
        bindings,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
