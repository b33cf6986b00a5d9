//! Monte Carlo sampling: independent uniform draws, no stratification.
//!
//! Uses the same per-factor ChaCha8 streams as the Latin Hypercube so the
//! two samplers share a seeding rule.

use explore_core::Scope;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{factor_seed, SamplerParams};

/// Unit-interval design matrix, rows × factors.
pub fn generate(scope: &Scope, params: &SamplerParams) -> Vec<Vec<f64>> {
    let n = params.n_samples_per_factor * scope.n_sample_factors();
    let n_factors = scope.factors().len();
    let mut rows = vec![vec![0.0; n_factors]; n];

    for j in 0..n_factors {
        let mut rng = ChaCha8Rng::seed_from_u64(factor_seed(params.random_seed, j));
        for row in rows.iter_mut() {
            row[j] = rng.gen::<f64>();
        }
    }

    tracing::debug!(rows = n, factors = n_factors, "monte carlo drawn");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use explore_core::{Distribution, Factor};

    fn scope() -> Scope {
        Scope::builder("mc")
            .uncertainty(Factor::continuous(
                "x",
                Distribution::Uniform { min: 0.0, max: 1.0 },
                0.5,
            ))
            .uncertainty(Factor::continuous(
                "y",
                Distribution::Uniform { min: 0.0, max: 1.0 },
                0.5,
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_shape_and_range() {
        let params = SamplerParams {
            n_samples_per_factor: 25,
            random_seed: 3,
        };
        let rows = generate(&scope(), &params);
        assert_eq!(rows.len(), 50);
        assert!(rows.iter().flatten().all(|u| (0.0..1.0).contains(u)));
    }

    #[test]
    fn test_columns_use_distinct_streams() {
        let rows = generate(&scope(), &SamplerParams::default());
        let x: Vec<f64> = rows.iter().map(|r| r[0]).collect();
        let y: Vec<f64> = rows.iter().map(|r| r[1]).collect();
        assert_ne!(x, y);
    }

    #[test]
    fn test_reproducible() {
        let params = SamplerParams::default();
        assert_eq!(generate(&scope(), &params), generate(&scope(), &params));
    }
}
