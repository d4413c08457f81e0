//! Market generator
//!
//! Offers are three independently sampled pools, concatenated in order:
//! global (sustain/utility), regional (depends on the current region's
//! tier), then at most one unlocked story card. Each pool samples without
//! replacement; the pools do not exclude each other's picks.

use crate::cards::{Card, CardRole};
use crate::core::rng::RandomSource;
use crate::core::types::StabilityTier;
use crate::world::state::WorldState;

const GLOBAL_ROLES: &[CardRole] = &[CardRole::Sustain, CardRole::Utility];

/// Roles the regional pool draws from for a region in `tier`
pub fn regional_roles(tier: StabilityTier) -> &'static [CardRole] {
    match tier {
        StabilityTier::Stable => &[CardRole::Sustain, CardRole::Control],
        StabilityTier::Borderland => &[CardRole::Utility, CardRole::Power],
        StabilityTier::Breach => &[CardRole::Power],
    }
}

fn shuffle_and_take<R: RandomSource>(
    rng: &mut R,
    mut pool: Vec<&Card>,
    count: usize,
) -> Vec<Card> {
    rng.shuffle(&mut pool);
    pool.into_iter().take(count).cloned().collect()
}

pub fn generate_market<R: RandomSource>(
    world: &WorldState,
    rng: &mut R,
    all_cards: &[Card],
    global_pool_size: usize,
    regional_pool_size: usize,
) -> Vec<Card> {
    let general = || all_cards.iter().filter(|c| !c.is_story());

    let global: Vec<&Card> = general()
        .filter(|c| GLOBAL_ROLES.contains(&c.role))
        .collect();
    let mut offers = shuffle_and_take(rng, global, global_pool_size);

    // An unknown current region counts as the worst tier
    let tier = world
        .current()
        .map(|r| r.stability())
        .unwrap_or(StabilityTier::Breach);
    let roles = regional_roles(tier);
    let regional: Vec<&Card> = general().filter(|c| roles.contains(&c.role)).collect();
    offers.extend(shuffle_and_take(rng, regional, regional_pool_size));

    let story: Vec<&Card> = all_cards
        .iter()
        .filter(|c| {
            c.unlock_flag
                .as_deref()
                .map(|flag| world.flags.get(flag))
                .unwrap_or(false)
        })
        .collect();
    if let Some(card) = rng.choose(&story) {
        offers.push((*card).clone());
    }

    tracing::debug!("Market for {} region: {} offers", tier, offers.len());
    offers
}
