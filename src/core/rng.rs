//! Deterministic random source
//!
//! Every stochastic decision in the engine draws from a single
//! [`RandomSource`] passed in by the owner of the campaign. The production
//! source is a seeded ChaCha8 stream whose position is serialisable, so a
//! restored save continues the exact same sequence of draws.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of uniform draws, probability checks, shuffles and weighted picks
pub trait RandomSource {
    /// Uniform integer in `[0, upper)`. `upper` must be non-zero.
    fn below(&mut self, upper: u32) -> u32;

    /// Returns true with the given probability (clamped to 0.0..=1.0)
    fn chance(&mut self, probability: f64) -> bool;

    /// Fisher-Yates shuffle driven by [`RandomSource::below`], so scripted
    /// sources control the permutation
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }

    /// Uniformly pick one element
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let idx = self.below(items.len() as u32) as usize;
        items.get(idx)
    }

    /// Cumulative-weight selection over integer weights.
    ///
    /// Draws `r` in `[0, total)` and walks the weights subtracting each one;
    /// the index at which `r` goes negative is returned. Zero-weight entries
    /// can never be selected. Returns `None` when every weight is zero.
    fn pick_weighted(&mut self, weights: &[u32]) -> Option<usize>
    where
        Self: Sized,
    {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }
        let total = u32::try_from(total).ok()?;
        let mut roll = self.below(total) as i64;
        for (idx, &weight) in weights.iter().enumerate() {
            roll -= weight as i64;
            if roll < 0 {
                return Some(idx);
            }
        }
        None
    }
}

/// Seeded ChaCha8 stream, the engine's production random source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed the stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Position within the stream, in 32-bit words
    pub fn word_pos(&self) -> u128 {
        self.rng.get_word_pos()
    }
}

impl RandomSource for SeededRandom {
    fn below(&mut self, upper: u32) -> u32 {
        debug_assert!(upper > 0, "below() requires a non-zero bound");
        self.rng.gen_range(0..upper.max(1))
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability.clamp(0.0, 1.0)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

/// Replays a fixed script of draws.
///
/// Queued values are consumed first. Once the queues run dry, draws return 0
/// and probability checks return the fallback outcome. Useful for hosts that
/// need to force an outcome, e.g. an anchor that always resists.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<u32>,
    chances: VecDeque<bool>,
    fallback_chance: bool,
}

impl ScriptedRandom {
    /// Every probability check returns `outcome`; every draw returns 0
    pub fn always(outcome: bool) -> Self {
        Self {
            fallback_chance: outcome,
            ..Self::default()
        }
    }

    pub fn with_draws(mut self, draws: impl IntoIterator<Item = u32>) -> Self {
        self.draws.extend(draws);
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: u32) -> u32 {
        let draw = self.draws.pop_front().unwrap_or(0);
        draw % upper.max(1)
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(self.fallback_chance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..100 {
            assert_eq!(a.below(1000), b.below(1000));
            assert_eq!(a.chance(0.5), b.chance(0.5));
        }
    }

    #[test]
    fn test_below_stays_in_bounds() {
        let mut rng = SeededRandom::new(1);
        for _ in 0..1000 {
            assert!(rng.below(3) < 3);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = SeededRandom::new(3);
        for _ in 0..200 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_pick_weighted_skips_zero_weights() {
        let mut rng = SeededRandom::new(11);
        for _ in 0..500 {
            let idx = rng.pick_weighted(&[0, 1, 2]).unwrap();
            assert_ne!(idx, 0);
        }
        assert_eq!(rng.pick_weighted(&[0, 0]), None);
        assert_eq!(rng.pick_weighted(&[]), None);
    }

    #[test]
    fn test_pick_weighted_walks_cumulative() {
        // weights [1, 2]: roll 0 -> first, rolls 1 and 2 -> second
        let mut rng = ScriptedRandom::always(false).with_draws([0, 1, 2]);
        assert_eq!(rng.pick_weighted(&[1, 2]), Some(0));
        assert_eq!(rng.pick_weighted(&[1, 2]), Some(1));
        assert_eq!(rng.pick_weighted(&[1, 2]), Some(1));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SeededRandom::new(5);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_serialized_stream_resumes() {
        let mut rng = SeededRandom::new(99);
        for _ in 0..17 {
            rng.below(50);
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: SeededRandom = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.word_pos(), rng.word_pos());
        for _ in 0..50 {
            assert_eq!(rng.below(1000), restored.below(1000));
        }
    }

    #[test]
    fn test_scripted_queue_then_fallback() {
        let mut rng = ScriptedRandom::always(true).with_chances([false]);
        assert!(!rng.chance(0.9));
        assert!(rng.chance(0.0));
        assert!(rng.chance(0.0));
    }

    #[test]
    fn test_pick_weighted_oversized_total_is_none() {
        let mut rng = SeededRandom::new(2);
        assert_eq!(rng.pick_weighted(&[u32::MAX, u32::MAX]), None);
        assert_eq!(rng.pick_weighted(&[u32::MAX - 1, 1]).map(|i| i < 2), Some(true));
    }

    #[test]
    fn test_seeded_choose_and_shuffle_are_reproducible() {
        let items: Vec<u32> = (0..10).collect();
        let mut a = SeededRandom::new(40);
        let mut b = SeededRandom::new(40);
        assert_eq!(a.choose(&items), b.choose(&items));
        let (mut x, mut y) = (items.clone(), items.clone());
        a.shuffle(&mut x);
        b.shuffle(&mut y);
        assert_eq!(x, y);
        assert_eq!(a.choose::<u32>(&[]), None);
    }
}
