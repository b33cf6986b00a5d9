//! Sampler inputs and outputs.

use explore_core::constants::{DEFAULT_N_SAMPLES_PER_FACTOR, DEFAULT_RANDOM_SEED};
use explore_core::FactorValue;

/// Parameters of the random samplers. Ignored by `uni`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerParams {
    pub n_samples_per_factor: usize,
    pub random_seed: u64,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            n_samples_per_factor: DEFAULT_N_SAMPLES_PER_FACTOR,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }
}

/// Raw sampler output: one row per experiment, one column per factor.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleMatrix {
    /// Draws in `[0, 1)` still to be mapped through each distribution.
    Unit(Vec<Vec<f64>>),
    /// Values already in each factor's native domain.
    Native(Vec<Vec<FactorValue>>),
}

impl SampleMatrix {
    pub fn n_rows(&self) -> usize {
        match self {
            Self::Unit(rows) => rows.len(),
            Self::Native(rows) => rows.len(),
        }
    }

    /// Column `j` of a unit matrix; `None` for native matrices.
    pub fn unit_column(&self, j: usize) -> Option<Vec<f64>> {
        match self {
            Self::Unit(rows) => rows.iter().map(|r| r.get(j).copied()).collect(),
            Self::Native(_) => None,
        }
    }
}
