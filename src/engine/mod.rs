//! Sampling engine primitives.
//!
//! - Deterministic RNG (PCG with partitioned seeds)
//! - Validated sample counts

pub mod rng;
pub mod sample_count;

pub use rng::SampleRng;
pub use sample_count::SampleCount;
