use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

const HIGHEST_FIRST: &str = "highest first";
const LOWEST_FIRST: &str = "lowest first";

/// Priority level of a queued payload.
///
/// `None` is the sentinel level for payloads without a priority. It is served
/// only once every valued level has been drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    None,
    Value(u32),
}

impl Level {
    /// Converts a raw signed level. Anything outside `1..=u32::MAX` maps to
    /// `Level::None`.
    pub fn from_raw(raw: i64) -> Self {
        match u32::try_from(raw) {
            Ok(value) if value > 0 => Level::Value(value),
            _ => Level::None,
        }
    }

    /// `Value(0)` is the only representable invalid level.
    pub fn is_valid(&self) -> bool {
        match self {
            Level::None => true,
            Level::Value(value) => *value > 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            Level::None => None,
            Level::Value(value) => Some(*value),
        }
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Level::Value(value)
    }
}

impl From<i32> for Level {
    fn from(raw: i32) -> Self {
        Level::from_raw(i64::from(raw))
    }
}

impl From<i64> for Level {
    fn from(raw: i64) -> Self {
        Level::from_raw(raw)
    }
}

impl From<Option<u32>> for Level {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Level::None, Level::Value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::None => write!(f, "none"),
            Level::Value(value) => write!(f, "{}", value),
        }
    }
}

/// Which end of the level range is served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PriorityOrder {
    #[default]
    #[serde(rename = "highest first")]
    HighestFirst,
    #[serde(rename = "lowest first")]
    LowestFirst,
}

impl PriorityOrder {
    /// Lenient lookup by name; unknown names fall back to `HighestFirst`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            LOWEST_FIRST => PriorityOrder::LowestFirst,
            _ => PriorityOrder::HighestFirst,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PriorityOrder::HighestFirst => HIGHEST_FIRST,
            PriorityOrder::LowestFirst => LOWEST_FIRST,
        }
    }

    pub fn swapped(&self) -> Self {
        match self {
            PriorityOrder::HighestFirst => PriorityOrder::LowestFirst,
            PriorityOrder::LowestFirst => PriorityOrder::HighestFirst,
        }
    }

    /// Returns true if `candidate` must be served strictly before `current`.
    /// Equal levels never outrank each other.
    pub fn outranks(&self, candidate: u32, current: u32) -> bool {
        match (self, candidate.cmp(&current)) {
            (PriorityOrder::HighestFirst, Ordering::Greater) => true,
            (PriorityOrder::LowestFirst, Ordering::Less) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PriorityOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
