//! WorldState - the aggregate root of a campaign

use serde::{Deserialize, Serialize};

use crate::core::types::{clamp_scale, Day, QuestId, RegionId, StabilityTier};
use crate::quests::{PlayerGrant, Quest};
use crate::world::events::{EventLog, LogKind};
use crate::world::flags::FlagStore;
use crate::world::region::Region;

/// Starting balance: halfway between dark (0) and light (100)
pub const NEUTRAL_BALANCE: i32 = 50;

/// Everything a campaign accumulates during play.
///
/// Constructed once from content (see [`crate::content::WorldBuilder`]),
/// mutated by a [`crate::simulation::Campaign`], and serialised wholesale at
/// save points. Scalars are private so their clamping holds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    /// All regions, in content order (iteration order is part of determinism)
    pub regions: Vec<Region>,
    tension: i32,
    balance: i32,
    day: Day,
    pub flags: FlagStore,
    pub current_region: RegionId,
    /// Quests waiting for their unlock flag
    pub locked_quests: Vec<Quest>,
    pub active_quests: Vec<Quest>,
    pub completed_quests: Vec<Quest>,
    pub log: EventLog,
    fired_thresholds: Vec<i32>,
    pending_grants: Vec<PlayerGrant>,
}

impl WorldState {
    pub fn new(regions: Vec<Region>, current_region: RegionId) -> Self {
        Self {
            regions,
            tension: 0,
            balance: NEUTRAL_BALANCE,
            day: 0,
            flags: FlagStore::new(),
            current_region,
            locked_quests: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            log: EventLog::new(),
            fired_thresholds: Vec::new(),
            pending_grants: Vec::new(),
        }
    }

    pub fn with_tension(mut self, tension: i32) -> Self {
        self.tension = clamp_scale(tension);
        self
    }

    pub fn with_balance(mut self, balance: i32) -> Self {
        self.balance = clamp_scale(balance);
        self
    }

    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log = EventLog::with_capacity(capacity);
        self
    }

    // === SCALARS ===

    pub fn tension(&self) -> i32 {
        self.tension
    }

    pub fn balance(&self) -> i32 {
        self.balance
    }

    pub fn day(&self) -> Day {
        self.day
    }

    /// Store a clamped tension value; returns the stored value
    pub(crate) fn set_tension(&mut self, tension: i32) -> i32 {
        self.tension = clamp_scale(tension);
        self.tension
    }

    pub(crate) fn shift_balance(&mut self, delta: i32) -> i32 {
        self.balance = clamp_scale(self.balance.saturating_add(delta));
        self.balance
    }

    pub(crate) fn advance_day(&mut self) -> Day {
        self.day += 1;
        self.day
    }

    // === REGIONS ===

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| &r.id == id)
    }

    pub(crate) fn region_mut(&mut self, id: &RegionId) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| &r.id == id)
    }

    pub fn current(&self) -> Option<&Region> {
        self.region(&self.current_region)
    }

    /// Anchored regions currently in `tier`
    pub fn anchor_count(&self, tier: StabilityTier) -> usize {
        self.regions
            .iter()
            .filter_map(|r| r.anchor())
            .filter(|a| a.tier() == tier)
            .count()
    }

    pub fn stable_anchor_count(&self) -> usize {
        self.anchor_count(StabilityTier::Stable)
    }

    pub fn breach_anchor_count(&self) -> usize {
        self.anchor_count(StabilityTier::Breach)
    }

    // === QUESTS ===

    pub fn quest(&self, id: &QuestId) -> Option<&Quest> {
        self.active_quests
            .iter()
            .chain(&self.completed_quests)
            .chain(&self.locked_quests)
            .find(|q| &q.id == id)
    }

    pub fn is_quest_completed(&self, id: &QuestId) -> bool {
        self.completed_quests.iter().any(|q| &q.id == id)
    }

    // === THRESHOLDS & GRANTS ===

    pub fn threshold_fired(&self, threshold: i32) -> bool {
        self.fired_thresholds.contains(&threshold)
    }

    /// Returns false if the threshold had already fired
    pub(crate) fn mark_threshold(&mut self, threshold: i32) -> bool {
        if self.threshold_fired(threshold) {
            return false;
        }
        self.fired_thresholds.push(threshold);
        true
    }

    pub(crate) fn push_grant(&mut self, grant: PlayerGrant) {
        self.pending_grants.push(grant);
    }

    pub(crate) fn take_grants(&mut self) -> Vec<PlayerGrant> {
        std::mem::take(&mut self.pending_grants)
    }

    // === LOG ===

    /// Append a log entry stamped with the current day
    pub(crate) fn record(
        &mut self,
        kind: LogKind,
        region: Option<RegionId>,
        message: impl Into<String>,
    ) -> u64 {
        self.log.push(self.day, kind, region, message)
    }
}
