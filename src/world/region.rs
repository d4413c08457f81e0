//! Region - a node of the world graph

use serde::{Deserialize, Serialize};

use crate::core::types::{Alignment, RegionId, StabilityTier, REPUTATION_MAX, REPUTATION_MIN};
use crate::world::anchor::Anchor;

/// Travel cost in days to an adjacent region
pub const NEIGHBOR_TRAVEL_DAYS: u32 = 1;
/// Travel cost in days to any non-adjacent region
pub const DISTANT_TRAVEL_DAYS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    Settlement,
    Village,
    Forest,
    Swamp,
    Mountain,
    Coast,
    Wasteland,
    Stronghold,
}

/// Tier transition produced by an integrity change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierChange {
    pub old: StabilityTier,
    pub new: StabilityTier,
    /// Integrity change actually applied after clamping
    pub applied: i32,
}

impl TierChange {
    pub fn changed(&self) -> bool {
        self.old != self.new
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    /// Display key, resolved by the presentation layer
    pub name: String,
    pub region_type: RegionType,
    /// Cached derivation of the anchor's integrity
    stability: StabilityTier,
    anchor: Option<Anchor>,
    reputation: i32,
    pub visited: bool,
    neighbors: Vec<RegionId>,
}

impl Region {
    pub fn new(id: RegionId, name: impl Into<String>, region_type: RegionType) -> Self {
        Self {
            id,
            name: name.into(),
            region_type,
            stability: StabilityTier::Breach,
            anchor: None,
            reputation: 0,
            visited: false,
            neighbors: Vec::new(),
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self.refresh_stability();
        self
    }

    pub fn with_reputation(mut self, reputation: i32) -> Self {
        self.reputation = reputation.clamp(REPUTATION_MIN, REPUTATION_MAX);
        self
    }

    pub fn stability(&self) -> StabilityTier {
        self.stability
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    pub fn neighbors(&self) -> &[RegionId] {
        &self.neighbors
    }

    pub fn is_neighbor(&self, other: &RegionId) -> bool {
        self.neighbors.contains(other)
    }

    /// Days needed to travel from this region to `destination`
    pub fn travel_cost(&self, destination: &RegionId) -> u32 {
        if self.is_neighbor(destination) {
            NEIGHBOR_TRAVEL_DAYS
        } else {
            DISTANT_TRAVEL_DAYS
        }
    }

    pub(crate) fn add_neighbor(&mut self, neighbor: RegionId) {
        if neighbor != self.id && !self.neighbors.contains(&neighbor) {
            self.neighbors.push(neighbor);
        }
    }

    /// Re-derive the cached tier; a region without an anchor is always in breach
    pub(crate) fn refresh_stability(&mut self) -> StabilityTier {
        self.stability = self
            .anchor
            .as_ref()
            .map(Anchor::tier)
            .unwrap_or(StabilityTier::Breach);
        self.stability
    }

    /// Apply an integrity change to the anchor and re-derive the tier.
    ///
    /// Returns `None` when the region has no anchor.
    pub(crate) fn adjust_anchor_integrity(&mut self, delta: i32) -> Option<TierChange> {
        let old = self.stability;
        let applied = self.anchor.as_mut()?.adjust_integrity(delta);
        let new = self.refresh_stability();
        Some(TierChange { old, new, applied })
    }

    /// Returns false when the region has no anchor
    pub(crate) fn set_anchor_influence(&mut self, influence: Alignment) -> bool {
        match self.anchor.as_mut() {
            Some(anchor) => {
                anchor.influence = influence;
                true
            }
            None => false,
        }
    }

    /// Apply a reputation change clamped to -100..=100; returns the new value
    pub(crate) fn adjust_reputation(&mut self, delta: i32) -> i32 {
        self.reputation = self
            .reputation
            .saturating_add(delta)
            .clamp(REPUTATION_MIN, REPUTATION_MAX);
        self.reputation
    }
}
