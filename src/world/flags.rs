//! Narrative flag store

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Named boolean facts; unknown keys read as false
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagStore {
    flags: AHashMap<String, bool>,
}

impl FlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Store a flag, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: bool) -> bool {
        self.flags.insert(key.into(), value).unwrap_or(false)
    }

    pub fn all(&self, keys: &[String]) -> bool {
        keys.iter().all(|key| self.get(key))
    }

    pub fn any(&self, keys: &[String]) -> bool {
        keys.iter().any(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Flag set when the player reaches a region
pub fn visited_flag(region: &str) -> String {
    format!("visited:{region}")
}

/// Flag set when a region falls into breach
pub fn breached_flag(region: &str) -> String {
    format!("breached:{region}")
}

pub fn defeated_flag(enemy: &str) -> String {
    format!("defeated:{enemy}")
}

pub fn event_flag(event: &str) -> String {
    format!("event:{event}")
}

pub fn threshold_flag(threshold: i32) -> String {
    format!("tension_{threshold}")
}
