//! Sampler strategies, dispatched through a closed enum.
//!
//! - `lhs`: Latin Hypercube, one draw per stratum per factor.
//! - `mc`: independent uniform draws.
//! - `uni`: one-factor-at-a-time perturbations around the defaults.
//!
//! `lhs` and `mc` emit unit-interval draws that the generator maps through
//! each factor's distribution; `uni` emits native values directly.

pub mod lhs;
pub mod mc;
pub mod types;
pub mod uni;

use std::fmt;
use std::str::FromStr;

use explore_core::errors::DesignError;
use explore_core::Scope;

pub use types::{SampleMatrix, SamplerParams};

/// The available sampling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sampler {
    LatinHypercube,
    MonteCarlo,
    OneFactorAtATime,
}

impl Sampler {
    /// Parse a sampler name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Result<Self, DesignError> {
        match name {
            "lhs" => Ok(Self::LatinHypercube),
            "mc" => Ok(Self::MonteCarlo),
            "uni" => Ok(Self::OneFactorAtATime),
            other => Err(DesignError::UnknownSampler(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::LatinHypercube => "lhs",
            Self::MonteCarlo => "mc",
            Self::OneFactorAtATime => "uni",
        }
    }

    /// Whether the strategy consumes `n_samples_per_factor` and a seed.
    pub fn is_random(self) -> bool {
        !matches!(self, Self::OneFactorAtATime)
    }

    /// Number of rows this strategy produces for `scope`.
    pub fn row_count(self, scope: &Scope, params: &SamplerParams) -> usize {
        match self {
            Self::LatinHypercube | Self::MonteCarlo => {
                params.n_samples_per_factor * scope.n_sample_factors()
            }
            Self::OneFactorAtATime => uni::row_count(scope),
        }
    }

    /// Run the strategy. Columns follow the scope's declaration order.
    pub fn generate(self, scope: &Scope, params: &SamplerParams) -> SampleMatrix {
        match self {
            Self::LatinHypercube => SampleMatrix::Unit(lhs::generate(scope, params)),
            Self::MonteCarlo => SampleMatrix::Unit(mc::generate(scope, params)),
            Self::OneFactorAtATime => SampleMatrix::Native(uni::generate(scope)),
        }
    }
}

impl FromStr for Sampler {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-factor seed: the global seed offset by the factor's position.
pub(crate) fn factor_seed(seed: u64, factor_index: usize) -> u64 {
    seed.wrapping_add(factor_index as u64)
}
