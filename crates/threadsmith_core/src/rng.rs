//! Seeded randomness.
//!
//! Library code never reads ambient randomness — every stochastic function
//! takes `&mut StdRng` so tests can fix the seed and assert exact output.
//! The CLI owns the seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic generator for a fixed seed.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// OS-entropy generator for normal runs.
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}
