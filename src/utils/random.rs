//! # Random Sources
//!
//! Every random decision the generator makes goes through [`RandomSource`].
//! Production code uses a seeded [`StdRng`]; tests can swap in
//! [`FirstChoiceRng`] or [`ScriptedRng`] to pin the walk to a known shape.

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::VecDeque;

/// Injectable source of randomness for floor generation.
///
/// Only [`RandomSource::gen_index`] is required. The provided methods are
/// built on it so a deterministic source stays consistent across every
/// kind of decision.
pub trait RandomSource {
    /// Returns an integer uniformly distributed in `[low, high)`.
    ///
    /// Returns `low` when the range is empty.
    fn gen_index(&mut self, low: usize, high: usize) -> usize;

    /// Picks one element uniformly, or `None` for an empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.gen_index(0, items.len()))
        }
    }

    /// Picks `amount` distinct elements, in selection order.
    ///
    /// Asking for more elements than the slice holds returns all of them.
    fn sample_distinct<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        let mut pool: Vec<T> = items.to_vec();
        let amount = amount.min(pool.len());
        let mut picked = Vec::with_capacity(amount);
        for _ in 0..amount {
            let idx = self.gen_index(0, pool.len());
            picked.push(pool.remove(idx));
        }
        picked
    }

    /// Shuffles the slice in place.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(0, i + 1);
            items.swap(i, j);
        }
    }

    /// Draws a 64-bit seed for a child generator.
    fn gen_seed(&mut self) -> u64 {
        (0..4).fold(0, |seed, _| (seed << 16) | self.gen_index(0, 1 << 16) as u64)
    }
}

impl RandomSource for StdRng {
    fn gen_index(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.gen_range(low..high)
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        SliceRandom::choose(items, self)
    }

    fn sample_distinct<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        let amount = amount.min(items.len());
        index::sample(self, items.len(), amount)
            .into_iter()
            .map(|i| items[i].clone())
            .collect()
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        SliceRandom::shuffle(items, self)
    }

    fn gen_seed(&mut self) -> u64 {
        self.gen()
    }
}

/// Deterministic source that always takes the lowest option.
///
/// Ranges yield their lower bound, choices yield the first element,
/// samples keep declaration order and shuffles leave the slice untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoiceRng;

impl FirstChoiceRng {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for FirstChoiceRng {
    fn gen_index(&mut self, low: usize, _high: usize) -> usize {
        low
    }

    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

/// Deterministic source that replays a fixed list of offsets.
///
/// Each call to [`RandomSource::gen_index`] consumes the next scripted value
/// as an offset from `low`, clamped into the requested range. Once the
/// script runs out every call yields `low`.
///
/// # Examples
///
/// ```
/// use dungen::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new(vec![2, 9]);
/// assert_eq!(rng.gen_index(1, 4), 3);
/// assert_eq!(rng.gen_index(0, 3), 2); // clamped
/// assert_eq!(rng.gen_index(5, 8), 5); // script exhausted
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    script: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRng {
    fn gen_index(&mut self, low: usize, high: usize) -> usize {
        let offset = self.script.pop_front().unwrap_or(0);
        if high <= low {
            return low;
        }
        low + offset.min(high - low - 1)
    }
}
