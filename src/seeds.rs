//! Seed management for map generation
//!
//! A map is fully determined by its config and one seed. The seed drives a
//! single ChaCha stream that every pass draws from in a fixed order.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeds are kept within 31 bits so they survive being typed into tools
/// that store them as signed 32-bit integers.
pub const SEED_MASK: u64 = i32::MAX as u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapSeed(u64);

impl MapSeed {
    pub fn new(seed: u64) -> Self {
        Self(seed & SEED_MASK)
    }

    /// Use `seed` when `use_fixed` is set, otherwise draw a fresh seed from
    /// entropy mixed with the wall clock.
    pub fn resolve(use_fixed: bool, seed: u64) -> Self {
        if use_fixed {
            return Self::new(seed);
        }
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(rand::random::<u64>() ^ nanos)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The generator stream for this seed.
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl std::fmt::Display for MapSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_fixed_seed_is_kept() {
        assert_eq!(MapSeed::resolve(true, 42).value(), 42);
        assert_eq!(MapSeed::resolve(true, u64::MAX).value(), SEED_MASK);
    }

    #[test]
    fn test_random_seed_fits_mask() {
        for _ in 0..10 {
            assert!(MapSeed::resolve(false, 42).value() <= SEED_MASK);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<u32> = MapSeed::new(7).rng().sample_iter(rand::distributions::Standard).take(4).collect();
        let b: Vec<u32> = MapSeed::new(7).rng().sample_iter(rand::distributions::Standard).take(4).collect();
        assert_eq!(a, b);
    }
}
