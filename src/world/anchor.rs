//! Anchors - the stabilising structure a region depends on

use serde::{Deserialize, Serialize};

use crate::core::types::{clamp_scale, Alignment, AnchorId, StabilityTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorType {
    Shrine,
    Chapel,
    Monastery,
    StandingStone,
    Relic,
    Ward,
}

/// A stability-providing resource owned by exactly one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: AnchorId,
    pub anchor_type: AnchorType,
    integrity: i32,
    pub influence: Alignment,
    /// Informational weight, 1..=10
    power: u8,
}

impl Anchor {
    pub const MIN_POWER: u8 = 1;
    pub const MAX_POWER: u8 = 10;

    pub fn new(
        id: AnchorId,
        anchor_type: AnchorType,
        integrity: i32,
        influence: Alignment,
        power: u8,
    ) -> Self {
        Self {
            id,
            anchor_type,
            integrity: clamp_scale(integrity),
            influence,
            power: power.clamp(Self::MIN_POWER, Self::MAX_POWER),
        }
    }

    pub fn integrity(&self) -> i32 {
        self.integrity
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn tier(&self) -> StabilityTier {
        StabilityTier::from_integrity(self.integrity)
    }

    /// Apply a signed integrity change, clamped to 0..=100.
    ///
    /// Returns the change actually applied.
    pub(crate) fn adjust_integrity(&mut self, delta: i32) -> i32 {
        let before = self.integrity;
        self.integrity = clamp_scale(before.saturating_add(delta));
        self.integrity - before
    }
}
