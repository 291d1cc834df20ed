//! Deterministic RNG hierarchy.
//!
//! Every simulated game gets its own `StdRng`. Its seed is the BLAKE3 hash of
//! the batch seed, the strategy label and the trial index, so a trial replays
//! the same game no matter which worker runs it or in what order.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Per-trial seed source for one batch. Streams are strategy labels.
#[derive(Debug, Clone)]
pub struct RngHierarchy {
    master_seed: u64,
}

impl RngHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Seed for trial `trial` of `stream`: the first eight bytes of the hash.
    pub fn sub_seed(&self, stream: &str, trial: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(stream.as_bytes());
        hasher.update(&trial.to_le_bytes());
        let digest = hasher.finalize();
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(seed)
    }

    pub fn rng_for(&self, stream: &str, trial: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(stream, trial))
    }
}
