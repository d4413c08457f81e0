//! Quest, objective and reward model
//!
//! The flag-driven trigger propagator lives with the campaign in
//! [`crate::simulation`].

pub mod quest;

pub use quest::{
    Objective, ObjectiveCondition, PlayerGrant, Quest, QuestReward, ReputationChange,
};
