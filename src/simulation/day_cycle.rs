//! Day cycle scheduler and travel
//!
//! Days always advance one at a time. On every cadence day the day-start
//! pipeline runs in a fixed order:
//!
//! 1. tension escalation (`base + day / step`)
//! 2. degradation with probability `tension / 100`
//! 3. recovery if tension is at or below the recovery ceiling
//! 4. quest trigger re-evaluation
//! 5. one-shot tension threshold flags

use crate::core::rng::RandomSource;
use crate::core::types::{Day, RegionId};
use crate::simulation::Campaign;
use crate::world::events::LogKind;
use crate::world::flags::{threshold_flag, visited_flag};
use crate::world::region::DISTANT_TRAVEL_DAYS;

impl<R: RandomSource> Campaign<R> {
    /// Advance the calendar by `days`, one day at a time
    pub fn advance_time(&mut self, days: u32) {
        for _ in 0..days {
            let day = self.world.advance_day();
            if self.rules.tension.is_pipeline_day(day) {
                self.run_day_start(day);
            }
        }
    }

    /// Travel to `destination`, spending the travel cost in days.
    ///
    /// Costs 1 day to a neighbor and 2 otherwise; staying put costs nothing.
    /// Returns `None` for an unknown region.
    pub fn move_to_region(&mut self, destination: &RegionId) -> Option<u32> {
        self.world.region(destination)?;

        let from = self.world.current_region.clone();
        if &from == destination {
            return Some(0);
        }
        let cost = self
            .world
            .region(&from)
            .map(|r| r.travel_cost(destination))
            .unwrap_or(DISTANT_TRAVEL_DAYS);

        self.world.current_region = destination.clone();
        if let Some(region) = self.world.region_mut(destination) {
            region.visited = true;
        }
        tracing::info!("Travelling {} -> {} ({} days)", from, destination, cost);
        self.world.record(
            LogKind::Travel {
                from: from.clone(),
                days: cost,
            },
            Some(destination.clone()),
            format!("Set out from {} for {}", from, destination),
        );
        self.set_flag(visited_flag(destination.as_str()), true);

        self.advance_time(cost);
        Some(cost)
    }

    fn run_day_start(&mut self, day: Day) {
        let escalation = self.rules.tension.escalation(day);
        tracing::debug!("Day {} start: escalation {}", day, escalation);
        self.world.record(
            LogKind::DayStarted {
                escalation,
                tension: self.world.tension(),
            },
            None,
            format!("Day {} dawns; the pressure grows by {}", day, escalation),
        );

        self.increase_tension(escalation);

        let probability = self.world.tension() as f64 / 100.0;
        if self.rng.chance(probability) {
            self.run_degradation();
        }

        if self.world.tension() <= self.rules.recovery.tension_ceiling {
            self.run_recovery();
        }

        self.evaluate_quests();
        self.check_thresholds();
    }

    fn check_thresholds(&mut self) {
        let tension = self.world.tension();
        let thresholds = self.rules.tension.thresholds.clone();
        for threshold in thresholds {
            if tension >= threshold && self.world.mark_threshold(threshold) {
                tracing::info!("Tension crossed {}", threshold);
                self.world.record(
                    LogKind::ThresholdCrossed { threshold },
                    None,
                    format!("Tension has passed {}", threshold),
                );
                self.set_flag(threshold_flag(threshold), true);
            }
        }
    }
}
