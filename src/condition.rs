//! Physical card condition labels and their fixed ranking.
//!
//! The order is total, best to worst: Near Mint (0) < Slightly Played (1) <
//! Moderately Played (2) < Played (3) < Poor (4). A "minimum condition"
//! threshold accepts every label ranked at or below it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CardTraderError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    #[default]
    NearMint,
    SlightlyPlayed,
    ModeratelyPlayed,
    Played,
    Poor,
}

impl Condition {
    /// Every condition, best first.
    pub const ALL: [Condition; 5] = [
        Condition::NearMint,
        Condition::SlightlyPlayed,
        Condition::ModeratelyPlayed,
        Condition::Played,
        Condition::Poor,
    ];

    pub fn rank(self) -> u8 {
        match self {
            Condition::NearMint => 0,
            Condition::SlightlyPlayed => 1,
            Condition::ModeratelyPlayed => 2,
            Condition::Played => 3,
            Condition::Poor => 4,
        }
    }

    /// The marketplace label, e.g. `"Slightly Played"`.
    pub fn label(self) -> &'static str {
        match self {
            Condition::NearMint => "Near Mint",
            Condition::SlightlyPlayed => "Slightly Played",
            Condition::ModeratelyPlayed => "Moderately Played",
            Condition::Played => "Played",
            Condition::Poor => "Poor",
        }
    }

    /// Parse an exact marketplace label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// True if `self` is at least as good as the `min` threshold.
    pub fn is_acceptable(self, min: Condition) -> bool {
        self.rank() <= min.rank()
    }
}

/// All conditions ranked at or better than `min`, best first.
///
/// Always a prefix of [`Condition::ALL`].
pub fn acceptable_conditions(min: Condition) -> Vec<Condition> {
    Condition::ALL
        .into_iter()
        .filter(|c| c.is_acceptable(min))
        .collect()
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = CardTraderError;

    /// Accepts the exact label as well as case-insensitive, dash or
    /// underscore separated spellings (`near-mint`, `slightly_played`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(c) = Condition::from_label(s) {
            return Ok(c);
        }
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Condition::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == normalized)
            .ok_or_else(|| {
                CardTraderError::InvalidArgument(format!("unknown condition '{}'", s))
            })
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
