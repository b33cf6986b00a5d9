//! Latin Hypercube sampling.
//!
//! With `n = n_samples_per_factor * n_sample_factors` rows, each factor's
//! column splits `[0, 1)` into `n` equal strata, draws one point inside
//! every stratum, then shuffles the column. Each factor uses its own
//! ChaCha8 stream seeded with `seed + factor_index`, so columns are
//! independent permutations and results are bit-reproducible.

use explore_core::Scope;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{factor_seed, SamplerParams};

/// Unit-interval design matrix, rows × factors.
pub fn generate(scope: &Scope, params: &SamplerParams) -> Vec<Vec<f64>> {
    let n = params.n_samples_per_factor * scope.n_sample_factors();
    let n_factors = scope.factors().len();
    let mut rows = vec![vec![0.0; n_factors]; n];

    for j in 0..n_factors {
        let column = stratified_column(n, factor_seed(params.random_seed, j));
        for (row, u) in rows.iter_mut().zip(column) {
            row[j] = u;
        }
    }

    tracing::debug!(rows = n, factors = n_factors, "latin hypercube drawn");
    rows
}

/// One shuffled column holding exactly one point per stratum.
pub fn stratified_column(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut column: Vec<f64> = (0..n)
        .map(|i| stratum_point(i, n, rng.gen::<f64>()))
        .collect();
    column.shuffle(&mut rng);
    column
}

/// Point at relative offset `r` in stratum `i` of `n`.
fn stratum_point(i: usize, n: usize, r: f64) -> f64 {
    let nf = n as f64;
    let u = (i as f64 + r) / nf;
    // Rounding can land exactly on the upper edge; fall back to the midpoint.
    if (u * nf).floor() as usize == i {
        u
    } else {
        (i as f64 + 0.5) / nf
    }
}
