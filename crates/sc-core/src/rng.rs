//! Seeded randomness for traffic generation.
//!
//! The engine is deterministic; randomness only enters through drivers that
//! pick origin/destination pairs, ship speeds and release offsets.  They all
//! draw from a `SimRng` rooted at `SimConfig::seed`, so a fleet is
//! reproducible.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Spreads sibling offsets across the seed space.
const SIBLING_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Reproducible random stream.
///
/// A driver on its own thread takes a [`child`](SimRng::child) stream rather
/// than sharing the root.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off an independent stream.  Siblings taken from the same parent
    /// are told apart by `offset`.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ offset.wrapping_mul(SIBLING_SPREAD);
        SimRng::new(seed)
    }

    /// A value drawn uniformly from `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
