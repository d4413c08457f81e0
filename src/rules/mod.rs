//! Tunable campaign rules
//!
//! All magic numbers of the world simulation are collected here. The
//! defaults reproduce the canonical campaign; any section can be overridden
//! from a TOML file (see [`loader`]).

mod loader;

use serde::{Deserialize, Serialize};

use crate::core::error::{AnchorfallError, Result};

pub use loader::load_rules;

/// Complete rule set consumed by a [`crate::simulation::Campaign`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignRules {
    pub tension: TensionRules,
    pub degradation: DegradationRules,
    pub recovery: RecoveryRules,
    pub anchors: AnchorRules,
    pub log: LogRules,
}

/// Tension escalation, reactive bands and narrative thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TensionRules {
    /// The day-start pipeline runs on days that are a multiple of this
    pub cadence_days: u32,

    /// Base tension added by each day-start pipeline
    pub escalation_base: i32,

    /// One extra point of escalation per this many elapsed days
    pub escalation_step_days: u32,

    /// Tension at or above which any increase immediately degrades a region
    pub degrade_band: i32,

    /// Tension at or below which any change immediately runs recovery
    pub recover_band: i32,

    /// One-shot narrative thresholds; each sets `tension_<n>` once
    pub thresholds: Vec<i32>,
}

impl Default for TensionRules {
    fn default() -> Self {
        Self {
            cadence_days: 3,
            escalation_base: 3,
            escalation_step_days: 10,
            degrade_band: 80,
            recover_band: 20,
            thresholds: vec![50, 75, 90],
        }
    }
}

impl TensionRules {
    /// Tension added by the day-start pipeline on `day`
    ///
    /// Step function: `base + floor(day / step)`.
    pub fn escalation(&self, day: u32) -> i32 {
        let steps = day / self.escalation_step_days.max(1);
        self.escalation_base + steps as i32
    }

    /// Whether the day-start pipeline runs on `day`
    pub fn is_pipeline_day(&self, day: u32) -> bool {
        day > 0 && day % self.cadence_days.max(1) == 0
    }
}

/// Degradation engine policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegradationRules {
    /// Integrity removed from an anchor that fails to resist
    pub amount: i32,

    /// Scales the resistance probability `integrity / 100`
    pub resistance_factor: f64,

    /// Candidate weight of a stable region (0 keeps stable regions untargeted)
    pub stable_weight: u32,
    pub borderland_weight: u32,
    pub breach_weight: u32,
}

impl Default for DegradationRules {
    fn default() -> Self {
        Self {
            amount: 10,
            resistance_factor: 1.0,
            stable_weight: 0,
            borderland_weight: 1,
            breach_weight: 2,
        }
    }
}

impl DegradationRules {
    /// Upper bound for any single tier weight
    pub const MAX_WEIGHT: u32 = 1_000;

    /// Probability that an anchor with `integrity` shrugs off degradation
    pub fn resistance_chance(&self, integrity: i32) -> f64 {
        (integrity as f64 / 100.0 * self.resistance_factor).clamp(0.0, 1.0)
    }
}

/// Recovery engine policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryRules {
    /// Integrity restored to the chosen anchor
    pub amount: i32,

    /// The day-start pipeline runs recovery at or below this tension
    pub tension_ceiling: i32,
}

impl Default for RecoveryRules {
    fn default() -> Self {
        Self {
            amount: 15,
            tension_ceiling: 20,
        }
    }
}

/// Player-invoked anchor rituals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorRules {
    pub strengthen_amount: i32,
    pub defile_amount: i32,
    pub defile_tension: i32,
    pub purify_tension: i32,
    /// Balance moved toward dark by defile and toward light by purify
    pub balance_shift: i32,
}

impl Default for AnchorRules {
    fn default() -> Self {
        Self {
            strengthen_amount: 20,
            defile_amount: 30,
            defile_tension: 10,
            purify_tension: 15,
            balance_shift: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogRules {
    /// Oldest entries are evicted beyond this many
    pub capacity: usize,
    /// Entries returned by a recent-events query with no explicit count
    pub recent_default: usize,
}

impl Default for LogRules {
    fn default() -> Self {
        Self {
            capacity: 100,
            recent_default: 10,
        }
    }
}

impl CampaignRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse rules from a TOML string; missing sections keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rules: CampaignRules = toml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Validate rules for internal consistency
    pub fn validate(&self) -> Result<()> {
        let t = &self.tension;
        if t.cadence_days == 0 {
            return Err(AnchorfallError::InvalidRules(
                "tension.cadence_days must be at least 1".into(),
            ));
        }
        if t.escalation_step_days == 0 {
            return Err(AnchorfallError::InvalidRules(
                "tension.escalation_step_days must be at least 1".into(),
            ));
        }
        if t.recover_band >= t.degrade_band {
            return Err(AnchorfallError::InvalidRules(format!(
                "tension.recover_band ({}) should be < tension.degrade_band ({})",
                t.recover_band, t.degrade_band
            )));
        }
        if t.thresholds.iter().any(|&th| !(0..=100).contains(&th)) {
            return Err(AnchorfallError::InvalidRules(
                "tension.thresholds must lie within 0..=100".into(),
            ));
        }

        let d = &self.degradation;
        if d.amount < 0 || self.recovery.amount < 0 {
            return Err(AnchorfallError::InvalidRules(
                "degradation and recovery amounts must be non-negative".into(),
            ));
        }
        let weights = [d.stable_weight, d.borderland_weight, d.breach_weight];
        if weights.iter().any(|&w| w > DegradationRules::MAX_WEIGHT) {
            return Err(AnchorfallError::InvalidRules(format!(
                "degradation weights {:?} must not exceed {}",
                weights,
                DegradationRules::MAX_WEIGHT
            )));
        }
        if !d.resistance_factor.is_finite() || d.resistance_factor < 0.0 {
            return Err(AnchorfallError::InvalidRules(format!(
                "degradation.resistance_factor ({}) must be a non-negative number",
                d.resistance_factor
            )));
        }

        if self.log.capacity == 0 {
            return Err(AnchorfallError::InvalidRules(
                "log.capacity must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
