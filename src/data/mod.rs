//! Data utilities consumed before trainer construction
//!
//! - explicit seed control ([`seeded_rng`], [`shuffle_batches`])
//! - dataset inspection ([`inspect_dataset`])
//! - normalization ([`normalize`], [`scale_y`])
//!
//! The trainer itself only sees loaders: any `Fn() -> IntoIterator<Item =
//! Batch>` acts as a restartable, finite sequence of batches per epoch.

mod batch;
mod stats;

pub use batch::Batch;
pub use stats::{
    inspect_dataset, normalize, scale_y, unscale_y, DatasetStats, FeatureStats, NormalizeMode,
};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Deterministic RNG from an explicit seed.
///
/// Seed control is threaded through loader/model construction rather than
/// hidden in process-global state.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Shuffle a batch list in place, e.g. once per epoch during loader setup.
pub fn shuffle_batches(batches: &mut [Batch], rng: &mut StdRng) {
    batches.shuffle(rng);
}
