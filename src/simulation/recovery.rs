//! Recovery engine: restores a damaged anchor while tension is low

use crate::core::rng::RandomSource;
use crate::core::types::{RegionId, StabilityTier};
use crate::rules::RecoveryRules;
use crate::simulation::record_tier_change;
use crate::world::events::LogKind;
use crate::world::region::TierChange;
use crate::world::state::WorldState;

#[derive(Clone, Debug, PartialEq)]
pub enum RecoveryOutcome {
    /// No anchored region is in breach or borderland
    NothingToRecover,
    Recovered { region: RegionId, change: TierChange },
}

/// Anchored regions in `tier`, by index
fn pool(world: &WorldState, tier: StabilityTier) -> Vec<usize> {
    world
        .regions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.has_anchor() && r.stability() == tier)
        .map(|(idx, _)| idx)
        .collect()
}

/// Restore one anchor, preferring breach regions over borderland ones.
///
/// The choice within the pool is uniform, not weighted.
pub fn recover<R: RandomSource>(
    world: &mut WorldState,
    rng: &mut R,
    rules: &RecoveryRules,
) -> RecoveryOutcome {
    let mut candidates = pool(world, StabilityTier::Breach);
    if candidates.is_empty() {
        candidates = pool(world, StabilityTier::Borderland);
    }
    let Some(&idx) = rng.choose(&candidates) else {
        return RecoveryOutcome::NothingToRecover;
    };

    let region_id = world.regions[idx].id.clone();
    let Some(change) = world.regions[idx].adjust_anchor_integrity(rules.amount) else {
        return RecoveryOutcome::NothingToRecover;
    };
    tracing::debug!("Anchor in {} recovered by {}", region_id, change.applied);

    world.record(
        LogKind::AnchorRecovered {
            amount: change.applied,
        },
        Some(region_id.clone()),
        format!("The anchor of {} mends", region_id),
    );
    record_tier_change(world, &region_id, change);

    RecoveryOutcome::Recovered {
        region: region_id,
        change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRandom;
    use crate::core::types::Alignment;
    use crate::world::anchor::{Anchor, AnchorType};
    use crate::world::region::{Region, RegionType};

    fn region(id: &str, integrity: i32) -> Region {
        Region::new(id.into(), id, RegionType::Forest).with_anchor(Anchor::new(
            format!("{id}_stone").into(),
            AnchorType::StandingStone,
            integrity,
            Alignment::Light,
            2,
        ))
    }

    #[test]
    fn test_breach_preferred_over_borderland() {
        let mut world = WorldState::new(
            vec![region("border", 60), region("breach_a", 10), region("breach_b", 20)],
            "border".into(),
        );
        let mut rng = ScriptedRandom::always(false).with_draws([1]);
        let outcome = recover(&mut world, &mut rng, &RecoveryRules::default());
        assert!(matches!(outcome, RecoveryOutcome::Recovered { ref region, .. } if region.as_str() == "breach_b"));
        assert_eq!(world.regions[2].anchor().unwrap().integrity(), 35);
        assert_eq!(world.regions[0].anchor().unwrap().integrity(), 60);
    }

    #[test]
    fn test_falls_back_to_borderland_and_clamps() {
        let mut world = WorldState::new(vec![region("top", 100), region("mid", 65)], "top".into());
        let mut rng = ScriptedRandom::always(false);
        let outcome = recover(&mut world, &mut rng, &RecoveryRules::default());
        let RecoveryOutcome::Recovered { change, .. } = outcome else {
            panic!("expected recovery");
        };
        assert_eq!(change.applied, 15);
        assert_eq!(change.new, StabilityTier::Stable);
        assert!(world
            .log
            .iter()
            .any(|e| matches!(e.kind, LogKind::StabilityChanged { new: StabilityTier::Stable, .. })));
    }

    #[test]
    fn test_nothing_to_recover() {
        let mut world = WorldState::new(
            vec![region("a", 90), Region::new("void".into(), "void", RegionType::Wasteland)],
            "a".into(),
        );
        let mut rng = ScriptedRandom::always(false);
        assert_eq!(
            recover(&mut world, &mut rng, &RecoveryRules::default()),
            RecoveryOutcome::NothingToRecover
        );
        assert!(world.log.is_empty());
    }
}
