// crates/contract-runner/src/runtime/fixtures.rs
// ============================================================================
// Module: Seeded Fixtures
// Description: Deterministic fixture generator backed by a seeded RNG.
// Purpose: Produce varied test data that can be replayed from a seed.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! [`SeededFixtures`] wraps a `StdRng`. Two generators built from the same
//! seed produce the same sequence, so a failing run can be replayed by
//! passing its recorded seed back in.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::interfaces::FixtureGenerator;

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Seeded fixture generator.
#[derive(Debug, Clone)]
pub struct SeededFixtures {
    /// Seed the generator was created from.
    seed: u64,
    /// Random source.
    rng: StdRng,
}

impl SeededFixtures {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator from a random seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Returns the seed, for recording in reports.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl FixtureGenerator for SeededFixtures {
    fn pick(&mut self, pool: &[&str]) -> String {
        pool.choose(&mut self.rng).map_or_else(String::new, |entry| (*entry).to_string())
    }

    fn token(&mut self, len: usize) -> String {
        (0 .. len)
            .map(|_| char::from_digit(self.rng.gen_range(0 .. 16), 16).unwrap_or('0'))
            .collect()
    }
}
