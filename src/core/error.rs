use thiserror::Error;

use crate::core::types::{QuestId, RegionId};

#[derive(Error, Debug)]
pub enum AnchorfallError {
    #[error("Duplicate region id: {0}")]
    DuplicateRegion(RegionId),

    #[error("Region {region} lists unknown neighbor {neighbor}")]
    UnknownNeighbor { region: RegionId, neighbor: RegionId },

    #[error("Start region not found: {0}")]
    UnknownStartRegion(RegionId),

    #[error("Duplicate quest id: {0}")]
    DuplicateQuest(QuestId),

    #[error("Invalid rules: {0}")]
    InvalidRules(String),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshotVersion { found: u32, expected: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AnchorfallError>;
