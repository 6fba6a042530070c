//! Deterministic RNG for procedural shapes.
//!
//! Wraps `ChaCha8Rng` so the same seed string yields the same stream on
//! every platform. The generator draws all of its randomness from here.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use xxhash_rust::xxh64::xxh64;

/// Hash seed for turning seed strings into `u64` seeds. Changing it changes
/// every generated goal shape.
const SEED_HASH_SALT: u64 = 0x5348_4150_4553;

// ---------------------------------------------------------------------------
// ShapeRng
// ---------------------------------------------------------------------------

pub struct ShapeRng(pub ChaCha8Rng);

impl ShapeRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seed from an arbitrary string, e.g. `"<world seed>/<level>"`.
    pub fn from_seed_str(seed: &str) -> Self {
        Self::from_seed_u64(xxh64(seed.as_bytes(), SEED_HASH_SALT))
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.0.gen::<f32>()
    }

    /// True with probability `1 - threshold`, i.e. when a roll lands above it.
    pub fn roll_above(&mut self, threshold: f32) -> bool {
        self.next_f32() > threshold
    }

    /// Uniform integer in `[low, high]`.
    pub fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..=high)
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }

    /// Pick an item with probability proportional to its weight. Items with
    /// zero weight are never picked; returns `None` when all weights are zero.
    pub fn choose_weighted<'a, T>(&mut self, items: &'a [(T, f32)]) -> Option<&'a T> {
        let total: f32 = items.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.next_f32() * total;
        for (item, weight) in items {
            let weight = weight.max(0.0);
            if weight > 0.0 && roll < weight {
                return Some(item);
            }
            roll -= weight;
        }
        items.iter().rev().find(|(_, w)| *w > 0.0).map(|(item, _)| item)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
