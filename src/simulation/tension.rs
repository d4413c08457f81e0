//! Tension controller
//!
//! Tension is clamped to 0..=100. After every change the reactive bands are
//! re-checked: high tension degrades a region immediately, low tension runs
//! recovery immediately, whatever the source of the change.

use crate::core::rng::RandomSource;
use crate::simulation::Campaign;

impl<R: RandomSource> Campaign<R> {
    /// Raise tension; negative amounts are treated as zero.
    ///
    /// Returns the clamped tension.
    pub fn increase_tension(&mut self, amount: i32) -> i32 {
        self.change_tension(amount.max(0))
    }

    /// Lower tension; negative amounts are treated as zero.
    pub fn decrease_tension(&mut self, amount: i32) -> i32 {
        self.change_tension(-amount.max(0))
    }

    /// Signed change used by narrative consequences and quest rewards
    pub(crate) fn change_tension(&mut self, delta: i32) -> i32 {
        let old = self.world.tension();
        let new = self.world.set_tension(old.saturating_add(delta));
        if old != new {
            tracing::debug!("Tension {} -> {}", old, new);
        }
        self.apply_tension_bands();
        self.world.tension()
    }

    fn apply_tension_bands(&mut self) {
        if self.in_tension_reaction {
            tracing::debug!("Tension band check suppressed inside a running reaction");
            return;
        }

        let tension = self.world.tension();
        let bands = &self.rules.tension;
        let degrade = tension >= bands.degrade_band;
        let recover = tension <= bands.recover_band;
        if !degrade && !recover {
            return;
        }

        self.in_tension_reaction = true;
        if degrade {
            tracing::debug!("Tension {} in degrade band", tension);
            self.run_degradation();
        } else {
            tracing::debug!("Tension {} in recovery band", tension);
            self.run_recovery();
        }
        self.in_tension_reaction = false;
    }
}
