//! World graph and campaign state
//!
//! Regions connected by undirected adjacency, each owning at most one
//! anchor, plus the aggregate [`WorldState`] that records everything the
//! campaign accumulates.

pub mod anchor;
pub mod events;
pub mod flags;
pub mod region;
pub mod snapshot;
pub mod state;

pub use anchor::{Anchor, AnchorType};
pub use events::{EventLog, LogEntry, LogKind};
pub use flags::FlagStore;
pub use region::{Region, RegionType, TierChange};
pub use snapshot::{CampaignSnapshot, SNAPSHOT_VERSION};
pub use state::WorldState;
