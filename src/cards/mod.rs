//! Cards and the market generator

mod market;

use serde::{Deserialize, Serialize};

use crate::core::types::{Alignment, CardId};

pub use market::{generate_market, regional_roles};

/// Global pool size when the host does not choose one
pub const DEFAULT_GLOBAL_POOL: usize = 3;
/// Regional pool size when the host does not choose one
pub const DEFAULT_REGIONAL_POOL: usize = 2;

/// Market role a card fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardRole {
    Sustain,
    Utility,
    Control,
    Power,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub role: CardRole,
    #[serde(default)]
    pub alignment: Alignment,
    /// Story cards only appear once this flag is set
    #[serde(default)]
    pub unlock_flag: Option<String>,
}

impl Card {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, role: CardRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            alignment: Alignment::Neutral,
            unlock_flag: None,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_unlock_flag(mut self, flag: impl Into<String>) -> Self {
        self.unlock_flag = Some(flag.into());
        self
    }

    pub fn is_story(&self) -> bool {
        self.unlock_flag.is_some()
    }
}
