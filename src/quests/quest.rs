//! Quest, objective and reward model

use serde::{Deserialize, Serialize};

use crate::core::types::{CardId, QuestId, RegionId};
use crate::world::flags::{defeated_flag, event_flag};
use crate::world::state::WorldState;

/// Completion predicate of a single objective
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectiveCondition {
    /// Every listed flag is true
    AllFlags { flags: Vec<String> },
    RegionVisited { region: RegionId },
    EnemyDefeated { enemy: String },
    EventCompleted { event: String },
    TensionAtLeast { value: i32 },
    TensionAtMost { value: i32 },
    BalanceAtLeast { value: i32 },
    BalanceAtMost { value: i32 },
}

impl ObjectiveCondition {
    pub fn is_met(&self, world: &WorldState) -> bool {
        match self {
            Self::AllFlags { flags } => world.flags.all(flags),
            Self::RegionVisited { region } => {
                world.region(region).map(|r| r.visited).unwrap_or(false)
            }
            Self::EnemyDefeated { enemy } => world.flags.get(&defeated_flag(enemy)),
            Self::EventCompleted { event } => world.flags.get(&event_flag(event)),
            Self::TensionAtLeast { value } => world.tension() >= *value,
            Self::TensionAtMost { value } => world.tension() <= *value,
            Self::BalanceAtLeast { value } => world.balance() >= *value,
            Self::BalanceAtMost { value } => world.balance() <= *value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub description: String,
    pub condition: ObjectiveCondition,
    completed: bool,
}

impl Objective {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        condition: ObjectiveCondition,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            condition,
            completed: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Completion is one-way; returns true only on the first call
    pub(crate) fn mark_complete(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReputationChange {
    pub region: RegionId,
    pub delta: i32,
}

/// Payload applied once when a quest completes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestReward {
    pub set_flags: Vec<String>,
    pub tension: i32,
    pub balance: i32,
    pub reputation: Vec<ReputationChange>,
    pub cards: Vec<CardId>,
    pub currency: u32,
}

/// Card and currency rewards waiting for the host to hand them to the player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerGrant {
    pub quest: QuestId,
    pub cards: Vec<CardId>,
    pub currency: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub objectives: Vec<Objective>,
    /// Number of completed objectives
    stage: usize,
    completed: bool,
    /// Quest stays locked until this flag becomes true
    pub unlock_flag: Option<String>,
    pub reward: QuestReward,
}

impl Quest {
    pub fn new(id: QuestId, title: impl Into<String>, objectives: Vec<Objective>) -> Self {
        Self {
            id,
            title: title.into(),
            objectives,
            stage: 0,
            completed: false,
            unlock_flag: None,
            reward: QuestReward::default(),
        }
    }

    pub fn with_reward(mut self, reward: QuestReward) -> Self {
        self.reward = reward;
        self
    }

    pub fn with_unlock_flag(mut self, flag: impl Into<String>) -> Self {
        self.unlock_flag = Some(flag.into());
        self
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn all_objectives_complete(&self) -> bool {
        self.objectives.iter().all(Objective::is_complete)
    }

    /// Complete every objective whose condition now holds.
    ///
    /// Returns the ids of newly completed objectives.
    pub(crate) fn advance(&mut self, world: &WorldState) -> Vec<String> {
        let mut newly = Vec::new();
        for objective in self.objectives.iter_mut().filter(|o| !o.is_complete()) {
            if objective.condition.is_met(world) && objective.mark_complete() {
                newly.push(objective.id.clone());
            }
        }
        self.stage = self.objectives.iter().filter(|o| o.is_complete()).count();
        newly
    }

    /// One-way transition to completed; true only on the first call
    pub(crate) fn mark_completed(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }
}
