//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Stable region identifier, supplied by content
    RegionId
);
string_id!(
    /// Anchor identifier, unique within a campaign
    AnchorId
);
string_id!(QuestId);
string_id!(CardId);
string_id!(EndingId);

/// Campaign day counter
pub type Day = u32;

/// Lower bound of the tension and balance scales
pub const SCALE_MIN: i32 = 0;
/// Upper bound of the tension, balance and integrity scales
pub const SCALE_MAX: i32 = 100;

/// Reputation bounds for a region
pub const REPUTATION_MIN: i32 = -100;
pub const REPUTATION_MAX: i32 = 100;

/// Clamp a value onto the 0..=100 scale shared by tension, balance and integrity
pub fn clamp_scale(value: i32) -> i32 {
    value.clamp(SCALE_MIN, SCALE_MAX)
}

/// Influence alignment of an anchor or a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Light,
    #[default]
    Neutral,
    Dark,
}

/// Derived stability classification of a region
///
/// Ordered from best to worst so `tier > other` reads as "worse than".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityTier {
    Stable,
    Borderland,
    Breach,
}

impl StabilityTier {
    /// Integrity at or above which an anchor keeps its region stable
    pub const STABLE_THRESHOLD: i32 = 70;
    /// Integrity at or above which an anchor keeps its region out of breach
    pub const BORDERLAND_THRESHOLD: i32 = 30;

    /// Derive the tier from anchor integrity alone
    pub fn from_integrity(integrity: i32) -> Self {
        if integrity >= Self::STABLE_THRESHOLD {
            Self::Stable
        } else if integrity >= Self::BORDERLAND_THRESHOLD {
            Self::Borderland
        } else {
            Self::Breach
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Borderland => "borderland",
            Self::Breach => "breach",
        }
    }
}

impl fmt::Display for StabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
