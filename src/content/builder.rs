//! Validate authored content into an initial world

use ahash::AHashSet;

use crate::content::{AnchorDef, CampaignContent, QuestDef, RegionDef};
use crate::core::error::{AnchorfallError, Result};
use crate::core::types::{QuestId, RegionId, StabilityTier};
use crate::quests::{Objective, Quest};
use crate::rules::CampaignRules;
use crate::world::anchor::Anchor;
use crate::world::flags::visited_flag;
use crate::world::region::Region;
use crate::world::state::{WorldState, NEUTRAL_BALANCE};

/// Integrity an anchor starts with when content only names a tier
fn integrity_for(tier: StabilityTier) -> i32 {
    match tier {
        StabilityTier::Stable => 85,
        StabilityTier::Borderland => 50,
        StabilityTier::Breach => 15,
    }
}

pub struct WorldBuilder<'c> {
    content: &'c CampaignContent,
    log_capacity: usize,
}

impl<'c> WorldBuilder<'c> {
    pub fn new(content: &'c CampaignContent, rules: &CampaignRules) -> Self {
        Self {
            content,
            log_capacity: rules.log.capacity,
        }
    }

    pub fn build(&self) -> Result<WorldState> {
        let mut regions = self.build_regions()?;
        self.link_neighbors(&mut regions)?;

        let start = &self.content.start_region;
        let start_region = regions
            .iter_mut()
            .find(|r| &r.id == start)
            .ok_or_else(|| AnchorfallError::UnknownStartRegion(start.clone()))?;
        start_region.visited = true;

        let (locked, active) = self.build_quests()?;

        let mut world = WorldState::new(regions, start.clone())
            .with_tension(self.content.initial_tension)
            .with_balance(self.content.initial_balance.unwrap_or(NEUTRAL_BALANCE))
            .with_log_capacity(self.log_capacity);
        world.locked_quests = locked;
        world.active_quests = active;
        world.flags.set(visited_flag(start.as_str()), true);
        for flag in &self.content.flags {
            world.flags.set(flag.clone(), true);
        }

        tracing::info!(
            "Built world: {} regions ({} stable, {} in breach), start {}",
            world.regions.len(),
            world.stable_anchor_count(),
            world.breach_anchor_count(),
            start
        );
        Ok(world)
    }

    fn build_regions(&self) -> Result<Vec<Region>> {
        let mut seen: AHashSet<&RegionId> = AHashSet::new();
        let mut regions = Vec::with_capacity(self.content.regions.len());

        for def in &self.content.regions {
            if !seen.insert(&def.id) {
                return Err(AnchorfallError::DuplicateRegion(def.id.clone()));
            }
            regions.push(build_region(def));
        }
        Ok(regions)
    }

    /// Adjacency is symmetric: listing B under A makes A a neighbor of B
    fn link_neighbors(&self, regions: &mut [Region]) -> Result<()> {
        for def in &self.content.regions {
            for neighbor in &def.neighbors {
                let target = regions
                    .iter_mut()
                    .find(|r| &r.id == neighbor)
                    .ok_or_else(|| AnchorfallError::UnknownNeighbor {
                        region: def.id.clone(),
                        neighbor: neighbor.clone(),
                    })?;
                target.add_neighbor(def.id.clone());
            }
            if let Some(source) = regions.iter_mut().find(|r| r.id == def.id) {
                for neighbor in &def.neighbors {
                    source.add_neighbor(neighbor.clone());
                }
            }
        }
        Ok(())
    }

    /// Split quests into (locked, active) by the presence of an unlock flag
    fn build_quests(&self) -> Result<(Vec<Quest>, Vec<Quest>)> {
        let mut seen: AHashSet<&QuestId> = AHashSet::new();
        let mut locked = Vec::new();
        let mut active = Vec::new();

        for def in &self.content.quests {
            if !seen.insert(&def.id) {
                return Err(AnchorfallError::DuplicateQuest(def.id.clone()));
            }
            let quest = build_quest(def);
            if quest.unlock_flag.is_some() {
                locked.push(quest);
            } else {
                active.push(quest);
            }
        }
        Ok((locked, active))
    }
}

fn build_anchor(def: &AnchorDef, tier: Option<StabilityTier>) -> Anchor {
    let integrity = def
        .integrity
        .unwrap_or_else(|| integrity_for(tier.unwrap_or(StabilityTier::Borderland)));
    Anchor::new(
        def.id.clone(),
        def.anchor_type,
        integrity,
        def.influence,
        def.power,
    )
}

fn build_region(def: &RegionDef) -> Region {
    let region = Region::new(def.id.clone(), def.name.clone(), def.region_type)
        .with_reputation(def.reputation);
    match &def.anchor {
        Some(anchor) => region.with_anchor(build_anchor(anchor, def.initial_stability)),
        None => {
            if matches!(
                def.initial_stability,
                Some(StabilityTier::Stable | StabilityTier::Borderland)
            ) {
                tracing::warn!(
                    "Region {} has no anchor; its {:?} initial stability is ignored",
                    def.id,
                    def.initial_stability
                );
            }
            region
        }
    }
}

fn build_quest(def: &QuestDef) -> Quest {
    let objectives = def
        .objectives
        .iter()
        .map(|o| Objective::new(o.id.clone(), o.description.clone(), o.condition.clone()))
        .collect();
    let quest = Quest::new(def.id.clone(), def.title.clone(), objectives)
        .with_reward(def.reward.clone());
    match &def.unlock_flag {
        Some(flag) => quest.with_unlock_flag(flag.clone()),
        None => quest,
    }
}
