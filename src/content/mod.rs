//! Static campaign content
//!
//! Region graphs, quests, cards and endings are authored as JSON and
//! deserialised into the definitions below. [`WorldBuilder`] validates them
//! and produces the initial [`crate::world::WorldState`].

mod builder;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::error::Result;
use crate::core::types::{Alignment, AnchorId, QuestId, RegionId, StabilityTier};
use crate::endings::EndingDefinition;
use crate::quests::{ObjectiveCondition, QuestReward};
use crate::world::anchor::AnchorType;
use crate::world::region::RegionType;

pub use builder::WorldBuilder;

fn default_power() -> u8 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorDef {
    pub id: AnchorId,
    pub anchor_type: AnchorType,
    /// Derived from the region's initial stability when absent
    #[serde(default)]
    pub integrity: Option<i32>,
    #[serde(default)]
    pub influence: Alignment,
    #[serde(default = "default_power")]
    pub power: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDef {
    pub id: RegionId,
    /// Display key handed to the presentation layer
    pub name: String,
    pub region_type: RegionType,
    #[serde(default)]
    pub neighbors: Vec<RegionId>,
    #[serde(default)]
    pub initial_stability: Option<StabilityTier>,
    #[serde(default)]
    pub anchor: Option<AnchorDef>,
    #[serde(default)]
    pub reputation: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDef {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub condition: ObjectiveCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDef {
    pub id: QuestId,
    pub title: String,
    pub objectives: Vec<ObjectiveDef>,
    #[serde(default)]
    pub unlock_flag: Option<String>,
    #[serde(default)]
    pub reward: QuestReward,
}

/// A complete campaign as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignContent {
    pub start_region: RegionId,
    pub regions: Vec<RegionDef>,
    #[serde(default)]
    pub quests: Vec<QuestDef>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub endings: Vec<EndingDefinition>,
    #[serde(default)]
    pub initial_tension: i32,
    #[serde(default)]
    pub initial_balance: Option<i32>,
    /// Flags already true when the campaign begins
    #[serde(default)]
    pub flags: Vec<String>,
}

impl CampaignContent {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read and parse a content file
pub fn load_content(path: &Path) -> Result<CampaignContent> {
    let json = fs::read_to_string(path)?;
    let content = CampaignContent::from_json(&json)?;
    tracing::debug!(
        "Loaded {} regions, {} quests, {} cards, {} endings from {}",
        content.regions.len(),
        content.quests.len(),
        content.cards.len(),
        content.endings.len(),
        path.display()
    );
    Ok(content)
}
