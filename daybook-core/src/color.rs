//! The closed colour palette events are tagged with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Event colour tag. Serialized as its hex value (`"#3B82F6"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventColor {
    #[default]
    Blue,
    Red,
    Green,
    Amber,
}

impl EventColor {
    pub const ALL: [EventColor; 4] = [
        EventColor::Blue,
        EventColor::Red,
        EventColor::Green,
        EventColor::Amber,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            EventColor::Blue => "#3B82F6",
            EventColor::Red => "#EF4444",
            EventColor::Green => "#10B981",
            EventColor::Amber => "#F59E0B",
        }
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

impl FromStr for EventColor {
    type Err = String;

    /// Hex values must match exactly, uppercase digits included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventColor::ALL
            .into_iter()
            .find(|c| c.hex() == s)
            .ok_or_else(|| {
                let allowed: Vec<_> = EventColor::ALL.iter().map(|c| c.hex()).collect();
                format!("must be one of {}", allowed.join(", "))
            })
    }
}

impl Serialize for EventColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

impl<'de> Deserialize<'de> for EventColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
