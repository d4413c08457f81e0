//! Campaign ending resolution
//!
//! Endings are scanned in list order; the first whose every present
//! condition holds wins. When nothing matches, the first ending in the list
//! is returned as a fallback and flagged as unmatched so content authors can
//! see that no rule covered the final state.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::types::{Alignment, EndingId};
use crate::world::state::WorldState;

/// Classification of the player's deck by alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckPath {
    Light,
    Dark,
    Balanced,
}

impl DeckPath {
    /// Light or dark when strictly more than half the deck shares that
    /// alignment; balanced otherwise, including for an empty deck
    pub fn of(deck: &[Card]) -> Self {
        let total = deck.len();
        if total == 0 {
            return Self::Balanced;
        }
        let count = |alignment| deck.iter().filter(|c| c.alignment == alignment).count();
        if count(Alignment::Light) * 2 > total {
            Self::Light
        } else if count(Alignment::Dark) * 2 > total {
            Self::Dark
        } else {
            Self::Balanced
        }
    }
}

/// Conjunction of optional conditions; an absent condition always holds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndingConditions {
    pub min_tension: Option<i32>,
    pub max_tension: Option<i32>,
    pub required_flags: Vec<String>,
    pub forbidden_flags: Vec<String>,
    pub deck_path: Option<DeckPath>,
    pub min_stable_anchors: Option<usize>,
    pub max_breach_anchors: Option<usize>,
    pub min_balance: Option<i32>,
    pub max_balance: Option<i32>,
}

impl EndingConditions {
    pub fn matches(&self, world: &WorldState, path: DeckPath) -> bool {
        let tension = world.tension();
        let balance = world.balance();

        self.min_tension.map_or(true, |min| tension >= min)
            && self.max_tension.map_or(true, |max| tension <= max)
            && world.flags.all(&self.required_flags)
            && !world.flags.any(&self.forbidden_flags)
            && self.deck_path.map_or(true, |wanted| wanted == path)
            && self
                .min_stable_anchors
                .map_or(true, |min| world.stable_anchor_count() >= min)
            && self
                .max_breach_anchors
                .map_or(true, |max| world.breach_anchor_count() <= max)
            && self.min_balance.map_or(true, |min| balance >= min)
            && self.max_balance.map_or(true, |max| balance <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndingDefinition {
    pub id: EndingId,
    pub title: String,
    /// Narrative payload handed to the presentation layer
    #[serde(default)]
    pub epilogue: Vec<String>,
    #[serde(default)]
    pub conditions: EndingConditions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndingResolution<'e> {
    pub ending: &'e EndingDefinition,
    pub deck_path: DeckPath,
    /// False when no ending matched and the fallback was used
    pub matched: bool,
}

/// Resolve the ending for the final world state.
///
/// Returns `None` only when `all_endings` is empty.
pub fn determine_ending<'e>(
    world: &WorldState,
    player_deck: &[Card],
    all_endings: &'e [EndingDefinition],
) -> Option<EndingResolution<'e>> {
    let deck_path = DeckPath::of(player_deck);

    if let Some(ending) = all_endings
        .iter()
        .find(|e| e.conditions.matches(world, deck_path))
    {
        tracing::info!("Ending resolved: {}", ending.id);
        return Some(EndingResolution {
            ending,
            deck_path,
            matched: true,
        });
    }

    let fallback = all_endings.first()?;
    tracing::warn!(
        "No ending matched (tension {}, balance {}, deck {:?}); falling back to {}",
        world.tension(),
        world.balance(),
        deck_path,
        fallback.id
    );
    Some(EndingResolution {
        ending: fallback,
        deck_path,
        matched: false,
    })
}
