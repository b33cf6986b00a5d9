//! Design generator: sampler dispatch, domain mapping, id assignment and
//! optional persistence.

use explore_core::config::DesignConfig;
use explore_core::constants::{DEFAULT_N_SAMPLES_PER_FACTOR, DEFAULT_RANDOM_SEED};
use explore_core::errors::{DesignError, StorageError};
use explore_core::traits::IDesignStore;
use explore_core::{Design, FactorValue, Scope};

use crate::sampler::{SampleMatrix, Sampler, SamplerParams};
use crate::transform;

/// What to generate and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignRequest {
    /// One of `lhs`, `mc`, `uni`.
    pub sampler: String,
    /// Samples per sampled factor. Default: 10. Ignored by `uni`.
    pub n_samples_per_factor: Option<usize>,
    /// Default: 1234. Ignored by `uni`.
    pub random_seed: Option<u64>,
    /// Store key of the design. Defaults to the sampler name.
    pub design_name: Option<String>,
    /// Replace previously stored rows instead of appending to them.
    pub replace_existing: bool,
}

impl DesignRequest {
    pub fn new(sampler: impl Into<String>) -> Self {
        Self {
            sampler: sampler.into(),
            n_samples_per_factor: None,
            random_seed: None,
            design_name: None,
            replace_existing: false,
        }
    }

    /// A request carrying the configured defaults.
    pub fn from_config(config: &DesignConfig) -> Self {
        Self {
            sampler: config.effective_sampler().to_string(),
            n_samples_per_factor: Some(config.effective_n_samples_per_factor()),
            random_seed: Some(config.effective_random_seed()),
            design_name: None,
            replace_existing: false,
        }
    }

    pub fn n_samples_per_factor(mut self, n: usize) -> Self {
        self.n_samples_per_factor = Some(n);
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn design_name(mut self, name: impl Into<String>) -> Self {
        self.design_name = Some(name.into());
        self
    }

    pub fn replace_existing(mut self, replace: bool) -> Self {
        self.replace_existing = replace;
        self
    }

    fn params(&self) -> SamplerParams {
        SamplerParams {
            n_samples_per_factor: self
                .n_samples_per_factor
                .unwrap_or(DEFAULT_N_SAMPLES_PER_FACTOR),
            random_seed: self.random_seed.unwrap_or(DEFAULT_RANDOM_SEED),
        }
    }
}

/// Generate a design for `scope` and, if a store is given, persist it
/// under `(scope.name(), design_name)`.
///
/// Experiment ids are 0-based positions unless the store already holds
/// rows for the pair, in which case the returned design carries the ids
/// the store assigned. A failed store write yields
/// [`DesignError::StoreWrite`], which still owns the generated design and
/// carries the storage error unmodified as its source. A write to a scope
/// that was never stored reports the `UNKNOWN_SCOPE` code.
pub fn design_experiments(
    scope: &Scope,
    request: &DesignRequest,
    store: Option<&dyn IDesignStore>,
) -> Result<Design, DesignError> {
    let sampler = Sampler::from_name(&request.sampler)?;
    let params = request.params();
    if sampler.is_random() && params.n_samples_per_factor == 0 {
        return Err(DesignError::InvalidParameter {
            field: "n_samples_per_factor".to_string(),
            message: "must be greater than 0".to_string(),
        });
    }
    let design_name = request
        .design_name
        .clone()
        .unwrap_or_else(|| sampler.name().to_string());

    let matrix = sampler.generate(scope, &params);
    let mut design = Design::for_scope(scope, design_name, sampler.name());
    match matrix {
        SampleMatrix::Unit(rows) => {
            for row in rows {
                let values = scope
                    .factors()
                    .iter()
                    .zip(row)
                    .map(|(factor, u)| transform::to_native(factor, u))
                    .collect::<Result<Vec<FactorValue>, _>>()?;
                design.push_row(values);
            }
        }
        SampleMatrix::Native(rows) => {
            for row in rows {
                design.push_row(row);
            }
        }
    }

    tracing::info!(
        scope = scope.name(),
        sampler = sampler.name(),
        design = %design.design_name,
        rows = design.len(),
        "generated design"
    );

    if let Some(store) = store {
        let written = if request.replace_existing {
            store.replace_experiment_parameters(scope.name(), &design.design_name, &design)
        } else {
            store.write_experiment_parameters(scope.name(), &design.design_name, &design)
        };
        let rows = design.len();
        let written = written.and_then(|ids| {
            if design.assign_ids(&ids) {
                Ok(ids)
            } else {
                Err(StorageError::CorruptRow {
                    message: format!("store returned {} ids for {rows} rows", ids.len()),
                })
            }
        });
        match written {
            Ok(ids) => {
                tracing::debug!(
                    first_id = ids.first().copied(),
                    last_id = ids.last().copied(),
                    "design persisted"
                );
            }
            Err(source) => {
                tracing::warn!(
                    scope = scope.name(),
                    design = %design.design_name,
                    error = %source,
                    "design store write failed"
                );
                return Err(DesignError::StoreWrite {
                    design: Box::new(design),
                    source,
                });
            }
        }
    }

    Ok(design)
}

/// Method-call form of [`design_experiments`] on a scope.
pub trait ScopeDesignExt {
    fn design_experiments(
        &self,
        request: &DesignRequest,
        store: Option<&dyn IDesignStore>,
    ) -> Result<Design, DesignError>;
}

impl ScopeDesignExt for Scope {
    fn design_experiments(
        &self,
        request: &DesignRequest,
        store: Option<&dyn IDesignStore>,
    ) -> Result<Design, DesignError> {
        design_experiments(self, request, store)
    }
}
