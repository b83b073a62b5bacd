//! Deterministic random number generation.
//!
//! Every estimator run owns a [`SampleRng`] seeded explicitly by the caller.
//! There is no process-wide generator: two runs can only share a stream if
//! the caller hands them the same instance.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, all random number sequences will be
//! bitwise-identical across:
//! - Different runs
//! - Different platforms
//! - Different thread counts (via partitioning)

use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment used to spread partition seeds.
const STREAM_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic, reproducible random number generator.
///
/// Based on PCG (Permuted Congruential Generator) which provides:
/// - Excellent statistical properties
/// - Fast generation
/// - Predictable sequences from seed
/// - Independent streams via partitioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Current stream index for partitioning.
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SampleRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            stream: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get current stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Create partitioned RNGs for independent estimator runs.
    ///
    /// Each partition gets an independent stream derived from the master seed,
    /// so runs on separate threads never draw correlated samples.
    ///
    /// # Example
    ///
    /// ```rust
    /// use estimar::engine::rng::SampleRng;
    ///
    /// let mut rng = SampleRng::new(42);
    /// let partitions = rng.partition(4);
    /// assert_eq!(partitions.len(), 4);
    /// ```
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions: Vec<Self> = (0..n)
            .map(|i| {
                let stream = self.stream + i as u64 + 1;
                let seed = self
                    .master_seed
                    .wrapping_add(stream.wrapping_mul(STREAM_SPREAD));
                Self {
                    master_seed: self.master_seed,
                    stream,
                    rng: Pcg64::seed_from_u64(seed),
                }
            })
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 uniformly in `[min, max)`.
    ///
    /// Callers validate `min < max` up front; with equal bounds the
    /// result is always `min`.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.gen_f64()
    }
}
