//! Player-invoked anchor rituals
//!
//! Synchronous, non-probabilistic commands, distinct from the autonomous
//! degradation and recovery engines. Each returns false when the region is
//! unknown or has no anchor.

use crate::core::rng::RandomSource;
use crate::core::types::{Alignment, RegionId};
use crate::simulation::{record_tier_change, Campaign};
use crate::world::events::LogKind;

impl<R: RandomSource> Campaign<R> {
    /// Strengthen with the configured amount
    pub fn strengthen_anchor(&mut self, region: &RegionId) -> bool {
        self.strengthen_anchor_by(region, self.rules.anchors.strengthen_amount)
    }

    pub fn strengthen_anchor_by(&mut self, region: &RegionId, amount: i32) -> bool {
        let Some(change) = self
            .world
            .region_mut(region)
            .and_then(|r| r.adjust_anchor_integrity(amount.max(0)))
        else {
            return false;
        };

        self.world.record(
            LogKind::AnchorStrengthened {
                amount: change.applied,
            },
            Some(region.clone()),
            format!("The anchor of {} is reinforced", region),
        );
        record_tier_change(&mut self.world, region, change);
        true
    }

    /// Defile with the configured amount
    pub fn defile_anchor(&mut self, region: &RegionId) -> bool {
        self.defile_anchor_by(region, self.rules.anchors.defile_amount)
    }

    /// Damage the anchor, turn it dark, push balance toward dark and raise tension
    pub fn defile_anchor_by(&mut self, region: &RegionId, amount: i32) -> bool {
        let Some(target) = self.world.region_mut(region) else {
            return false;
        };
        let Some(change) = target.adjust_anchor_integrity(-amount.max(0)) else {
            return false;
        };
        target.set_anchor_influence(Alignment::Dark);

        tracing::info!("Anchor of {} defiled", region);
        self.world.record(
            LogKind::AnchorDefiled {
                amount: -change.applied,
            },
            Some(region.clone()),
            format!("The anchor of {} is defiled", region),
        );
        record_tier_change(&mut self.world, region, change);
        self.flag_breach(region, change);

        let anchors = self.rules.anchors.clone();
        self.world.shift_balance(-anchors.balance_shift);
        self.increase_tension(anchors.defile_tension);
        true
    }

    /// Turn the anchor light, push balance toward light and lower tension
    pub fn purify_anchor(&mut self, region: &RegionId) -> bool {
        let Some(target) = self.world.region_mut(region) else {
            return false;
        };
        if !target.set_anchor_influence(Alignment::Light) {
            return false;
        }
        target.refresh_stability();

        tracing::info!("Anchor of {} purified", region);
        self.world.record(
            LogKind::AnchorPurified,
            Some(region.clone()),
            format!("The anchor of {} is purified", region),
        );

        let anchors = self.rules.anchors.clone();
        self.world.shift_balance(anchors.balance_shift);
        self.decrease_tension(anchors.purify_tension);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::core::rng::ScriptedRandom;
    use crate::core::types::{Alignment, StabilityTier};
    use crate::rules::CampaignRules;
    use crate::simulation::test_support::*;
    use crate::simulation::Campaign;
    use crate::world::region::{Region, RegionType};

    fn campaign(integrity: i32, tension: i32) -> Campaign<ScriptedRandom> {
        let regions = vec![
            anchored("a", integrity),
            Region::new("bare".into(), "bare", RegionType::Wasteland),
        ];
        Campaign::new(
            world(regions, tension),
            ScriptedRandom::always(true),
            CampaignRules::default(),
        )
    }

    #[test]
    fn test_strengthen_clamps_and_changes_tier() {
        let mut c = campaign(60, 50);
        assert!(c.strengthen_anchor(&"a".into()));
        assert_eq!(c.anchor(&"a".into()).unwrap().integrity(), 80);
        assert_eq!(c.region(&"a".into()).unwrap().stability(), StabilityTier::Stable);
        assert!(c.strengthen_anchor_by(&"a".into(), 50));
        assert_eq!(c.anchor(&"a".into()).unwrap().integrity(), 100);
        assert_eq!(c.tension(), 50);
    }

    #[test]
    fn test_defile_side_effects() {
        let mut c = campaign(50, 40);
        assert!(c.defile_anchor(&"a".into()));
        let anchor = c.anchor(&"a".into()).unwrap();
        assert_eq!(anchor.integrity(), 20);
        assert_eq!(anchor.influence, Alignment::Dark);
        assert_eq!(c.tension(), 50);
        assert_eq!(c.balance(), 45);
        assert!(c.has_flag("breached:a"));
    }

    #[test]
    fn test_purify_side_effects() {
        let mut c = campaign(50, 40);
        assert!(c.purify_anchor(&"a".into()));
        assert_eq!(c.anchor(&"a".into()).unwrap().influence, Alignment::Light);
        assert_eq!(c.anchor(&"a".into()).unwrap().integrity(), 50);
        assert_eq!(c.tension(), 25);
        assert_eq!(c.balance(), 55);
    }

    #[test]
    fn test_rituals_fail_without_anchor() {
        let mut c = campaign(50, 40);
        assert!(!c.strengthen_anchor(&"bare".into()));
        assert!(!c.defile_anchor(&"bare".into()));
        assert!(!c.purify_anchor(&"bare".into()));
        assert!(!c.purify_anchor(&"unknown".into()));
        assert_eq!(c.tension(), 40);
        assert_eq!(c.balance(), 50);
    }
}
