//! Random sources for interval and message selection.
//!
//! The scheduler never touches `rand` directly; it asks a [`RandomSource`]
//! so tests can substitute a fixed sequence.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Uniform integer and index selection.
pub trait RandomSource {
    /// Uniform integer in `[low, high]`, both inclusive. Requires `low <= high`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index in `[0, len)`. Requires `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Pick one item uniformly. Returns `None` only for an empty slice.
pub fn choose<'a, T, R>(random: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(random.pick_index(items.len()))
}

/// Non-cryptographic PCG generator, seeded from entropy or a fixed seed.
#[derive(Debug, Clone)]
pub struct PcgRandom {
    rng: Mcg128Xsl64,
}

impl PcgRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    /// Reproducible generator; the same seed yields the same reminders.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgRandom {
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of raw values, cycling when exhausted.
///
/// Each draw folds the next raw value into the requested range, so
/// `FixedSequence::new([0])` always yields the lower bound / first item.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<u64>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        let mut values: Vec<u64> = values.into_iter().collect();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, cursor: 0 }
    }

    fn next_raw(&mut self) -> u64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}

impl RandomSource for FixedSequence {
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        let raw = self.next_raw();
        if low >= high {
            return low;
        }
        let span = u64::from(high - low) + 1;
        low + (raw % span) as u32
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let raw = self.next_raw();
        if len == 0 {
            return 0;
        }
        (raw % len as u64) as usize
    }
}
