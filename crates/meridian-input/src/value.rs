//! Raw binding value notation.
//!
//! The settings UI records every captured input as one of three strings:
//!
//! | Shape | Example |
//! |---|---|
//! | button | `Button 3` |
//! | signed axis | `Axis 1-` |
//! | hat direction | `Hat 0 Up` |
//!
//! Keywords are case-insensitive and any run of whitespace separates tokens.

use core::fmt;

/// Direction of a half-axis binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    /// `+`
    Positive,
    /// `-`
    Negative,
}

impl AxisDirection {
    /// The opposite half of the same axis.
    pub fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }

    /// `'+'` or `'-'`.
    pub fn symbol(self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Positive),
            '-' => Some(Self::Negative),
            _ => None,
        }
    }
}

/// One of the four cardinal hat directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HatDirection {
    /// Up
    Up,
    /// Down
    Down,
    /// Left
    Left,
    /// Right
    Right,
}

impl HatDirection {
    /// All directions in Up, Down, Left, Right order.
    pub const ALL: [HatDirection; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Capitalised label used in the raw notation.
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }

    /// Case-insensitive parse of a direction label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.label().eq_ignore_ascii_case(label))
    }
}

/// A decoded raw binding value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawBinding {
    /// `Button <n>`
    Button(u32),
    /// `Axis <n><+|->`
    Axis {
        /// Axis index
        index: u32,
        /// Half of the axis that triggers the binding
        direction: AxisDirection,
    },
    /// `Hat <n> <Up|Down|Left|Right>`
    Hat {
        /// Hat index
        index: u32,
        /// Direction on that hat
        direction: HatDirection,
    },
}

impl RawBinding {
    /// Parse one of the three raw shapes.
    ///
    /// Returns `None` for anything else, including the placeholder values
    /// accepted by [`is_unbound_value`].
    pub fn parse(value: &str) -> Option<Self> {
        let mut tokens = value.split_whitespace();
        let keyword = tokens.next()?;
        let first = tokens.next()?;
        let second = tokens.next();
        if tokens.next().is_some() {
            return None;
        }

        if keyword.eq_ignore_ascii_case("button") {
            if second.is_some() {
                return None;
            }
            return parse_digits(first).map(Self::Button);
        }

        if keyword.eq_ignore_ascii_case("axis") {
            if second.is_some() {
                return None;
            }
            let symbol = first.chars().next_back()?;
            let direction = AxisDirection::from_symbol(symbol)?;
            let index = parse_digits(first.strip_suffix(symbol)?)?;
            return Some(Self::Axis { index, direction });
        }

        if keyword.eq_ignore_ascii_case("hat") {
            let index = parse_digits(first)?;
            let direction = HatDirection::from_label(second?)?;
            return Some(Self::Hat { index, direction });
        }

        None
    }
}

impl fmt::Display for RawBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button(n) => write!(f, "Button {n}"),
            Self::Axis { index, direction } => write!(f, "Axis {index}{}", direction.symbol()),
            Self::Hat { index, direction } => write!(f, "Hat {index} {}", direction.label()),
        }
    }
}

/// True for the values the UI stores when a control has no physical input:
/// empty, `None`, or a motion source (`Gyro`, `Motion`).
pub fn is_unbound_value(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || ["none", "gyro", "motion"]
            .iter()
            .any(|placeholder| value.eq_ignore_ascii_case(placeholder))
}

fn parse_digits(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
