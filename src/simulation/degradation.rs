//! Degradation engine
//!
//! Picks a non-stable region by cumulative weight, lets its anchor try to
//! resist, and otherwise wears the anchor down.

use crate::core::rng::RandomSource;
use crate::core::types::{RegionId, StabilityTier};
use crate::rules::DegradationRules;
use crate::simulation::record_tier_change;
use crate::world::events::LogKind;
use crate::world::region::TierChange;
use crate::world::state::WorldState;

#[derive(Clone, Debug, PartialEq)]
pub enum DegradationOutcome {
    /// Every region is stable; nothing was drawn
    NoCandidates,
    /// The selected region has no anchor left to damage
    Unanchored { region: RegionId },
    Resisted { region: RegionId, integrity: i32 },
    Degraded { region: RegionId, change: TierChange },
}

impl DegradationOutcome {
    pub fn region(&self) -> Option<&RegionId> {
        match self {
            Self::NoCandidates => None,
            Self::Unanchored { region }
            | Self::Resisted { region, .. }
            | Self::Degraded { region, .. } => Some(region),
        }
    }
}

fn tier_weight(rules: &DegradationRules, tier: StabilityTier) -> u32 {
    match tier {
        StabilityTier::Stable => rules.stable_weight,
        StabilityTier::Borderland => rules.borderland_weight,
        StabilityTier::Breach => rules.breach_weight,
    }
}

/// Weighted draw of the next degradation target, by index into `world.regions`.
///
/// Consumes one draw from `rng` when at least one candidate has weight;
/// consumes nothing otherwise.
pub fn select_target<R: RandomSource>(
    world: &WorldState,
    rng: &mut R,
    rules: &DegradationRules,
) -> Option<usize> {
    let weights: Vec<u32> = world
        .regions
        .iter()
        .map(|r| tier_weight(rules, r.stability()))
        .collect();
    rng.pick_weighted(&weights)
}

/// Run one degradation pass against the world
pub fn degrade<R: RandomSource>(
    world: &mut WorldState,
    rng: &mut R,
    rules: &DegradationRules,
) -> DegradationOutcome {
    let Some(idx) = select_target(world, rng, rules) else {
        tracing::debug!("Degradation skipped: every region is stable");
        return DegradationOutcome::NoCandidates;
    };

    let region = &world.regions[idx];
    let region_id = region.id.clone();
    let Some(integrity) = region.anchor().map(|a| a.integrity()) else {
        tracing::debug!("Degradation targeted {} but it has no anchor", region_id);
        return DegradationOutcome::Unanchored { region: region_id };
    };

    if rng.chance(rules.resistance_chance(integrity)) {
        tracing::debug!("Anchor in {} resists at integrity {}", region_id, integrity);
        world.record(
            LogKind::AnchorResisted { integrity },
            Some(region_id.clone()),
            format!("The anchor of {} resists the pressure", region_id),
        );
        return DegradationOutcome::Resisted {
            region: region_id,
            integrity,
        };
    }

    let Some(change) = world.regions[idx].adjust_anchor_integrity(-rules.amount) else {
        return DegradationOutcome::Unanchored { region: region_id };
    };
    tracing::debug!(
        "Anchor in {} degraded by {} (now {:?})",
        region_id,
        -change.applied,
        world.regions[idx].anchor().map(|a| a.integrity())
    );
    record_tier_change(world, &region_id, change);

    DegradationOutcome::Degraded {
        region: region_id,
        change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{ScriptedRandom, SeededRandom};
    use crate::core::types::Alignment;
    use crate::world::anchor::{Anchor, AnchorType};
    use crate::world::region::{Region, RegionType};

    fn region(id: &str, integrity: i32) -> Region {
        Region::new(id.into(), id, RegionType::Village).with_anchor(Anchor::new(
            format!("{id}_anchor").into(),
            AnchorType::Shrine,
            integrity,
            Alignment::Neutral,
            5,
        ))
    }

    fn three_tier_world() -> WorldState {
        WorldState::new(
            vec![region("stable", 90), region("border", 50), region("breach", 10)],
            "stable".into(),
        )
    }

    #[test]
    fn test_all_stable_draws_nothing() {
        let mut world = WorldState::new(vec![region("a", 80), region("b", 95)], "a".into());
        let mut rng = ScriptedRandom::always(false).with_draws([1]);
        let outcome = degrade(&mut world, &mut rng, &DegradationRules::default());
        assert_eq!(outcome, DegradationOutcome::NoCandidates);
        // the queued draw was not consumed
        assert_eq!(rng.below(10), 1);
    }

    #[test]
    fn test_selection_never_picks_stable() {
        let world = three_tier_world();
        let mut rng = SeededRandom::new(2024);
        let rules = DegradationRules::default();
        for _ in 0..1000 {
            assert_ne!(select_target(&world, &mut rng, &rules), Some(0));
        }
    }

    #[test]
    fn test_resisting_anchor_keeps_integrity() {
        let mut world = three_tier_world();
        let mut rng = ScriptedRandom::always(true);
        let outcome = degrade(&mut world, &mut rng, &DegradationRules::default());
        // draw 0 lands on the borderland region (weight 1 first)
        assert_eq!(
            outcome,
            DegradationOutcome::Resisted { region: "border".into(), integrity: 50 }
        );
        assert_eq!(world.regions[1].anchor().unwrap().integrity(), 50);
        assert!(matches!(
            world.log.iter().last().unwrap().kind,
            LogKind::AnchorResisted { integrity: 50 }
        ));
    }

    #[test]
    fn test_failed_resistance_applies_damage_and_logs_tier_change() {
        let mut world = WorldState::new(vec![region("edge", 35)], "edge".into());
        let mut rng = ScriptedRandom::always(false);
        let outcome = degrade(&mut world, &mut rng, &DegradationRules::default());

        let DegradationOutcome::Degraded { change, .. } = outcome else {
            panic!("expected degradation, got {outcome:?}");
        };
        assert_eq!(change.old, StabilityTier::Borderland);
        assert_eq!(change.new, StabilityTier::Breach);
        assert_eq!(world.regions[0].anchor().unwrap().integrity(), 25);
        assert!(matches!(
            world.log.iter().last().unwrap().kind,
            LogKind::StabilityChanged { old: StabilityTier::Borderland, new: StabilityTier::Breach }
        ));
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut world = WorldState::new(vec![region("ruin", 4)], "ruin".into());
        let mut rng = ScriptedRandom::always(false);
        degrade(&mut world, &mut rng, &DegradationRules::default());
        assert_eq!(world.regions[0].anchor().unwrap().integrity(), 0);
    }

    #[test]
    fn test_unanchored_breach_is_a_no_op() {
        let mut world = WorldState::new(
            vec![Region::new("void".into(), "void", RegionType::Wasteland)],
            "void".into(),
        );
        let mut rng = ScriptedRandom::always(false);
        let outcome = degrade(&mut world, &mut rng, &DegradationRules::default());
        assert_eq!(outcome, DegradationOutcome::Unanchored { region: "void".into() });
        assert!(world.log.is_empty());
    }
}
