//! Transport modes for itinerary legs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a traveller moves between two consecutive stops.
///
/// The four built-in modes have their own pricing rules. Anything else the
/// client sends is kept, trimmed, as `Other` and priced at the fallback rate.
///
/// # Examples
///
/// ```
/// use trip_server::domain::TransportMode;
///
/// assert_eq!(TransportMode::parse("Flight"), TransportMode::Flight);
/// assert!(matches!(TransportMode::parse("ferry"), TransportMode::Other(_)));
/// assert_eq!(TransportMode::parse(" ferry ").as_str(), "ferry");
/// assert_eq!(TransportMode::Train.as_str(), "train");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
    Other(CustomMode),
}

/// Name of a mode without its own pricing rule.
///
/// Only [`TransportMode::parse`] creates one, so the name is trimmed and
/// never spells a built-in mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomMode(String);

impl CustomMode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TransportMode {
    /// The built-in modes, in picker order.
    pub const BUILT_IN: [TransportMode; 4] = [
        TransportMode::Flight,
        TransportMode::Train,
        TransportMode::Bus,
        TransportMode::Car,
    ];

    /// Parse a mode name, case-insensitively.
    ///
    /// Never fails: unrecognised names become `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "flight" => TransportMode::Flight,
            "train" => TransportMode::Train,
            "bus" => TransportMode::Bus,
            "car" => TransportMode::Car,
            _ => TransportMode::Other(CustomMode(s.trim().to_string())),
        }
    }

    /// Returns the wire name of this mode.
    pub fn as_str(&self) -> &str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
            TransportMode::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransportMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransportMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TransportMode::parse(&s))
    }
}
