//! Campaign simulation
//!
//! [`Campaign`] owns the [`WorldState`], the random source and the rules,
//! and is the only writer of the world. Every public operation runs to
//! completion synchronously; hosts that share a campaign between threads
//! must serialise access themselves (`&mut self` enforces one writer).
//!
//! Reentrancy: a tension change made while a reactive band effect is
//! already running only clamps, and a quest evaluation requested during an
//! evaluation is folded into the running pass.

pub mod anchor_ops;
pub mod day_cycle;
pub mod degradation;
mod quest_triggers;
pub mod recovery;
pub mod tension;

use crate::cards::{self, Card};
use crate::core::error::Result;
use crate::core::rng::{RandomSource, SeededRandom};
use crate::core::types::{RegionId, StabilityTier};
use crate::endings::{self, EndingDefinition, EndingResolution};
use crate::quests::PlayerGrant;
use crate::rules::CampaignRules;
use crate::world::anchor::Anchor;
use crate::world::events::{LogEntry, LogKind};
use crate::world::flags::{breached_flag, defeated_flag, event_flag};
use crate::world::region::{Region, TierChange};
use crate::world::snapshot::CampaignSnapshot;
use crate::world::state::WorldState;

pub use degradation::DegradationOutcome;
pub use recovery::RecoveryOutcome;

/// Log a tier transition, if there was one
pub(crate) fn record_tier_change(world: &mut WorldState, region: &RegionId, change: TierChange) {
    if !change.changed() {
        return;
    }
    tracing::info!("{} moved from {} to {}", region, change.old, change.new);
    world.record(
        LogKind::StabilityChanged {
            old: change.old,
            new: change.new,
        },
        Some(region.clone()),
        format!("{} is now {} (was {})", region, change.new, change.old),
    );
}

/// A running campaign: world state, random source and rules
pub struct Campaign<R: RandomSource = SeededRandom> {
    world: WorldState,
    rng: R,
    rules: CampaignRules,
    in_tension_reaction: bool,
    evaluating_quests: bool,
    quests_dirty: bool,
}

impl<R: RandomSource> Campaign<R> {
    pub fn new(world: WorldState, rng: R, rules: CampaignRules) -> Self {
        let mut campaign = Self::from_parts(world, rng, rules);
        // Flags supplied with the world may already unlock or satisfy quests
        campaign.evaluate_quests();
        campaign
    }

    /// Wrap existing state without running any trigger
    fn from_parts(world: WorldState, rng: R, rules: CampaignRules) -> Self {
        Self {
            world,
            rng,
            rules,
            in_tension_reaction: false,
            evaluating_quests: false,
            quests_dirty: false,
        }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn rules(&self) -> &CampaignRules {
        &self.rules
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn tension(&self) -> i32 {
        self.world.tension()
    }

    pub fn balance(&self) -> i32 {
        self.world.balance()
    }

    pub fn day(&self) -> u32 {
        self.world.day()
    }

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.world.region(id)
    }

    pub fn anchor(&self, region: &RegionId) -> Option<&Anchor> {
        self.world.region(region).and_then(Region::anchor)
    }

    // === FLAGS ===

    /// Store a flag and re-run quest triggers.
    ///
    /// This is the only channel through which narrative consequences reach
    /// quest state.
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        let key = key.into();
        let previous = self.world.flags.set(key.clone(), value);
        if previous != value {
            tracing::debug!("Flag {} = {}", key, value);
        }
        self.evaluate_quests();
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.world.flags.get(key)
    }

    pub fn record_enemy_defeated(&mut self, enemy: &str) {
        self.set_flag(defeated_flag(enemy), true);
    }

    pub fn complete_event(&mut self, event: &str) {
        self.set_flag(event_flag(event), true);
    }

    // === REGION STATE ===

    /// Returns false for an unknown region
    pub fn adjust_reputation(&mut self, region: &RegionId, delta: i32) -> bool {
        match self.world.region_mut(region) {
            Some(r) => {
                r.adjust_reputation(delta);
                true
            }
            None => false,
        }
    }

    /// Move the light/dark balance; returns the clamped result
    pub fn shift_balance(&mut self, delta: i32) -> i32 {
        self.world.shift_balance(delta)
    }

    // === ENGINES ===

    /// Run one degradation pass; a region pushed into breach raises its flag
    pub fn run_degradation(&mut self) -> DegradationOutcome {
        let outcome = degradation::degrade(&mut self.world, &mut self.rng, &self.rules.degradation);
        if let DegradationOutcome::Degraded { region, change } = &outcome {
            self.flag_breach(region, *change);
        }
        outcome
    }

    pub fn run_recovery(&mut self) -> RecoveryOutcome {
        recovery::recover(&mut self.world, &mut self.rng, &self.rules.recovery)
    }

    pub(crate) fn flag_breach(&mut self, region: &RegionId, change: TierChange) {
        if change.changed() && change.new == StabilityTier::Breach {
            self.set_flag(breached_flag(region.as_str()), true);
        }
    }

    // === QUERIES ===

    /// The most recent `count` log entries (rules default when `None`), oldest first
    pub fn recent_events(&self, count: Option<usize>) -> Vec<&LogEntry> {
        let count = count.unwrap_or(self.rules.log.recent_default);
        self.world.log.recent(count).collect()
    }

    /// Hand queued card and currency rewards to the host
    pub fn take_grants(&mut self) -> Vec<PlayerGrant> {
        self.world.take_grants()
    }

    pub fn generate_market(
        &mut self,
        all_cards: &[Card],
        global_pool_size: usize,
        regional_pool_size: usize,
    ) -> Vec<Card> {
        cards::generate_market(
            &self.world,
            &mut self.rng,
            all_cards,
            global_pool_size,
            regional_pool_size,
        )
    }

    pub fn determine_ending<'e>(
        &self,
        player_deck: &[Card],
        all_endings: &'e [EndingDefinition],
    ) -> Option<EndingResolution<'e>> {
        endings::determine_ending(&self.world, player_deck, all_endings)
    }
}

impl Campaign<SeededRandom> {
    pub fn seeded(world: WorldState, seed: u64, rules: CampaignRules) -> Self {
        Self::new(world, SeededRandom::new(seed), rules)
    }

    pub fn snapshot(&self) -> CampaignSnapshot {
        CampaignSnapshot::new(self.world.clone(), self.rng.clone())
    }

    /// Resume a saved campaign exactly where it stopped.
    ///
    /// Quest triggers are not re-run: the saved world already reflects every
    /// evaluation the uninterrupted campaign performed.
    pub fn restore(snapshot: CampaignSnapshot, rules: CampaignRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self::from_parts(snapshot.world, snapshot.rng, rules))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::types::Alignment;
    use crate::world::anchor::AnchorType;
    use crate::world::region::RegionType;

    pub fn anchored(id: &str, integrity: i32) -> Region {
        Region::new(id.into(), id, RegionType::Village).with_anchor(Anchor::new(
            format!("{id}_anchor").into(),
            AnchorType::Shrine,
            integrity,
            Alignment::Neutral,
            5,
        ))
    }

    pub fn world(regions: Vec<Region>, tension: i32) -> WorldState {
        let start = regions[0].id.clone();
        WorldState::new(regions, start).with_tension(tension)
    }
}
