//! Design generation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_N_SAMPLES_PER_FACTOR, DEFAULT_RANDOM_SEED, DEFAULT_SAMPLER};

/// Defaults applied when a caller leaves sampler parameters unset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesignConfig {
    /// Sampler used when none is requested. Default: "lhs".
    pub default_sampler: Option<String>,
    /// Samples per sampled factor for `lhs` and `mc`. Default: 10.
    pub n_samples_per_factor: Option<usize>,
    /// Seed for `lhs` and `mc`. Default: 1234.
    pub random_seed: Option<u64>,
}

impl DesignConfig {
    pub fn effective_sampler(&self) -> &str {
        self.default_sampler.as_deref().unwrap_or(DEFAULT_SAMPLER)
    }

    pub fn effective_n_samples_per_factor(&self) -> usize {
        self.n_samples_per_factor.unwrap_or(DEFAULT_N_SAMPLES_PER_FACTOR)
    }

    pub fn effective_random_seed(&self) -> u64 {
        self.random_seed.unwrap_or(DEFAULT_RANDOM_SEED)
    }
}
