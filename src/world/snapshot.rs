//! Versioned save document
//!
//! The save subsystem owns files and compatibility; this type only fixes the
//! shape of what it stores so a restored campaign resumes the same stream of
//! random draws.

use serde::{Deserialize, Serialize};

use crate::core::error::{AnchorfallError, Result};
use crate::core::rng::SeededRandom;
use crate::world::state::WorldState;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    pub version: u32,
    pub world: WorldState,
    pub rng: SeededRandom,
}

impl CampaignSnapshot {
    pub fn new(world: WorldState, rng: SeededRandom) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            world,
            rng,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: CampaignSnapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(AnchorfallError::UnsupportedSnapshotVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_future_version() {
        let mut snapshot =
            CampaignSnapshot::new(WorldState::new(vec![], "a".into()), SeededRandom::new(1));
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();
        let err = CampaignSnapshot::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            AnchorfallError::UnsupportedSnapshotVersion { found: 2, expected: 1 }
        ));
    }

    #[test]
    fn test_world_scalars_survive() {
        let world = WorldState::new(vec![], "a".into())
            .with_tension(42)
            .with_balance(61);
        let json = CampaignSnapshot::new(world, SeededRandom::new(3)).to_json().unwrap();
        let restored = CampaignSnapshot::from_json(&json).unwrap();
        assert_eq!(restored.world.tension(), 42);
        assert_eq!(restored.world.balance(), 61);
        assert_eq!(restored.rng.seed(), 3);
    }
}
