//! Anchorfall - Temporal World Simulation for a Narrative Campaign
//!
//! A deterministic, single-writer state advancer. Tension rises with the
//! calendar and wears down the anchors that hold each region together;
//! flags drive quests, and the final world state resolves into an ending.

pub mod cards;
pub mod content;
pub mod core;
pub mod endings;
pub mod quests;
pub mod rules;
pub mod simulation;
pub mod world;

pub use crate::core::error::{AnchorfallError, Result};
pub use crate::simulation::Campaign;
