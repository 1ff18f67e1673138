//! Cemu `Buttons2` physical input codes
//!
//! Codes 0..=31 are native button indices. Codes from 32 up are synthesized
//! by Cemu for triggers, hat directions and half-axes.

use meridian_input::{AxisDirection, HatDirection, RawBinding};
use tracing::debug;

/// Highest code that is a plain button index.
pub const MAX_BUTTON_CODE: u64 = 31;

/// Left trigger pressed as a button
pub const BUTTON_ZL: u64 = 32;
/// Right trigger pressed as a button
pub const BUTTON_ZR: u64 = 33;
/// Hat up
pub const BUTTON_UP: u64 = 34;
/// Hat down
pub const BUTTON_DOWN: u64 = 35;
/// Hat left
pub const BUTTON_LEFT: u64 = 36;
/// Hat right
pub const BUTTON_RIGHT: u64 = 37;

/// Axis index to `(positive, negative)` code.
///
/// Indices 0/1 are the left stick, 2/3 the right stick ("rotation") and 4/5
/// the triggers.
pub const AXIS_CODES: [(u32, u64, u64); 6] = [
    (0, 38, 44),
    (1, 39, 45),
    (2, 40, 46),
    (3, 41, 47),
    (4, 42, 48),
    (5, 43, 49),
];

const HAT_CODES: [(HatDirection, u64); 4] = [
    (HatDirection::Up, BUTTON_UP),
    (HatDirection::Down, BUTTON_DOWN),
    (HatDirection::Left, BUTTON_LEFT),
    (HatDirection::Right, BUTTON_RIGHT),
];

/// Encode a decoded binding. Axis indices outside [`AXIS_CODES`] yield `None`.
///
/// The hat index is not part of the code; every hat maps onto the same four
/// directions.
pub fn encode(binding: RawBinding) -> Option<u64> {
    match binding {
        RawBinding::Button(n) => Some(u64::from(n)),
        RawBinding::Axis { index, direction } => {
            let found = AXIS_CODES.iter().find(|(axis, _, _)| *axis == index);
            let Some((_, positive, negative)) = found else {
                debug!(axis = index, "Axis index has no Buttons2 code");
                return None;
            };
            Some(match direction {
                AxisDirection::Positive => *positive,
                AxisDirection::Negative => *negative,
            })
        }
        RawBinding::Hat { direction, .. } => HAT_CODES
            .iter()
            .find(|(dir, _)| *dir == direction)
            .map(|(_, code)| *code),
    }
}

/// Decode a code back into the raw value notation.
///
/// Codes that are neither native buttons nor in the axis/hat tables come back
/// as `Button <code>`, which Meridian cannot capture but preserves.
pub fn decode(code: u64) -> String {
    if code <= MAX_BUTTON_CODE {
        return format!("Button {code}");
    }

    let axis = AXIS_CODES.iter().find_map(|(index, positive, negative)| {
        if code == *positive {
            Some((*index, AxisDirection::Positive))
        } else if code == *negative {
            Some((*index, AxisDirection::Negative))
        } else {
            None
        }
    });
    if let Some((index, direction)) = axis {
        return RawBinding::Axis { index, direction }.to_string();
    }

    if let Some((direction, _)) = HAT_CODES.iter().find(|(_, c)| *c == code) {
        return RawBinding::Hat {
            index: 0,
            direction: *direction,
        }
        .to_string();
    }

    format!("Button {code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> Option<u64> {
        RawBinding::parse(value).and_then(encode)
    }

    #[test]
    fn test_encode_shapes() {
        assert_eq!(code("Button 12"), Some(12));
        assert_eq!(code("Axis 0+"), Some(38));
        assert_eq!(code("Axis 0-"), Some(44));
        assert_eq!(code("Axis 5-"), Some(49));
        assert_eq!(code("Hat 0 Up"), Some(BUTTON_UP));
        assert_eq!(code("Hat 3 Right"), Some(BUTTON_RIGHT));
    }

    #[test]
    fn test_unknown_axis_is_a_decode_failure() {
        assert_eq!(code("Axis 6+"), None);
    }

    #[test]
    fn test_decode_tables() {
        assert_eq!(decode(3), "Button 3");
        assert_eq!(decode(45), "Axis 1-");
        assert_eq!(decode(42), "Axis 4+");
        assert_eq!(decode(36), "Hat 0 Left");
    }

    #[test]
    fn test_decode_passthrough_for_unmapped_codes() {
        assert_eq!(decode(BUTTON_ZL), "Button 32");
        assert_eq!(decode(200), "Button 200");
    }
}
