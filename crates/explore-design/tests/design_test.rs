//! End-to-end design generation on the road_test scope, with and without
//! a store.

use explore_core::errors::{DesignError, ExploreErrorCode, StorageError};
use explore_core::traits::IDesignStore;
use explore_core::{Design, Distribution, ExperimentId, Factor, FactorValue, Scope};
use explore_design::{design_experiments, DesignRequest, ScopeDesignExt};
use explore_storage::SqliteDesignStore;

fn road_test_scope() -> Scope {
    Scope::builder("road_test")
        .constant(Factor::constant("TestRiskVar", 1.0))
        .uncertainty(Factor::continuous(
            "Land Use - CBD Focus",
            Distribution::pert(0.82, 1.0, 1.37),
            1.0,
        ))
        .uncertainty(Factor::continuous(
            "Freeway Capacity",
            Distribution::Uniform { min: 1.0, max: 2.0 },
            1.0,
        ))
        .uncertainty(Factor::continuous(
            "Auto IVTT Sensitivity",
            Distribution::Uniform { min: 0.75, max: 1.0 },
            1.0,
        ))
        .lever(Factor::integer("Shared Mobility", 0, 1, 0))
        .lever(Factor::boolean("Kensington Decommissioning", false))
        .lever(Factor::boolean("LRT Extension", false))
        .measure("Region-wide VMT")
        .measure("Total Transit Boardings")
        .build()
        .unwrap()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn baseline() -> Vec<FactorValue> {
    vec![
        FactorValue::Real(1.0),
        FactorValue::Real(1.0),
        FactorValue::Real(1.0),
        FactorValue::Real(1.0),
        FactorValue::Integer(0),
        FactorValue::Boolean(false),
        FactorValue::Boolean(false),
    ]
}

#[test]
fn test_uni_design_of_road_test() {
    let design = design_experiments(&road_test_scope(), &DesignRequest::new("uni"), None).unwrap();
    assert_eq!(design.len(), 8);

    let mut expected = vec![baseline()];
    for (j, value) in [
        (1, FactorValue::Real(0.82)),
        (1, FactorValue::Real(1.37)),
        (2, FactorValue::Real(2.0)),
        (3, FactorValue::Real(0.75)),
        (4, FactorValue::Integer(1)),
        (5, FactorValue::Boolean(true)),
        (6, FactorValue::Boolean(true)),
    ] {
        let mut row = baseline();
        row[j] = value;
        expected.push(row);
    }
    let actual: Vec<Vec<FactorValue>> = design.rows.iter().map(|r| r.values.clone()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_lhs_row_count_and_columns() {
    let scope = road_test_scope();
    let design = design_experiments(&scope, &DesignRequest::new("lhs"), None).unwrap();
    assert_eq!(design.len(), 10 * scope.n_sample_factors());
    assert_eq!(design.column_names(), scope.factor_names());
    assert_eq!(design.scope_name, "road_test");
}

#[test]
fn test_constant_column_fixed_for_every_sampler() {
    let scope = road_test_scope();
    for sampler in ["lhs", "mc", "uni"] {
        let design = design_experiments(&scope, &DesignRequest::new(sampler), None).unwrap();
        let risk = design.column_f64("TestRiskVar").unwrap();
        assert!(!risk.is_empty());
        assert!(risk.iter().all(|&v| v == 1.0), "sampler {sampler}");
    }
}

#[test]
fn test_lhs_means_match_distributions() {
    let design =
        design_experiments(&road_test_scope(), &DesignRequest::new("lhs"), None).unwrap();

    let freeway = design.column_f64("Freeway Capacity").unwrap();
    assert!((mean(&freeway) - 1.5).abs() < 0.01, "{}", mean(&freeway));
    assert!(freeway.iter().all(|v| (1.0..=2.0).contains(v)));

    let ivtt = design.column_f64("Auto IVTT Sensitivity").unwrap();
    assert!((mean(&ivtt) - 0.875).abs() < 0.005, "{}", mean(&ivtt));

    let land_use = design.column_f64("Land Use - CBD Focus").unwrap();
    let pert_mean = Distribution::pert(0.82, 1.0, 1.37).mean().unwrap();
    assert!((mean(&land_use) - pert_mean).abs() < 0.01, "{}", mean(&land_use));
    assert!(land_use.iter().all(|v| (0.82..=1.37).contains(v)));
}

#[test]
fn test_mc_mean_tightens_with_sample_count() {
    let scope = road_test_scope();
    // Uniform(1, 2): sd of one draw is 1/sqrt(12). Allow four standard errors.
    let sd = 1.0 / 12f64.sqrt();
    let mut previous_tolerance = f64::INFINITY;
    for k in [10, 100, 1000] {
        let design = design_experiments(
            &scope,
            &DesignRequest::new("mc").n_samples_per_factor(k),
            None,
        )
        .unwrap();
        let freeway = design.column_f64("Freeway Capacity").unwrap();
        let tolerance = 4.0 * sd / (freeway.len() as f64).sqrt();
        assert!(tolerance < previous_tolerance);
        assert!(
            (mean(&freeway) - 1.5).abs() < tolerance,
            "k={k}: mean {} outside ±{tolerance}",
            mean(&freeway)
        );
        previous_tolerance = tolerance;
    }
}

#[test]
fn test_mc_values_within_bounds() {
    let design = design_experiments(
        &road_test_scope(),
        &DesignRequest::new("mc").n_samples_per_factor(250),
        None,
    )
    .unwrap();
    assert_eq!(design.len(), 1000);

    let freeway = design.column_f64("Freeway Capacity").unwrap();
    assert!(freeway.iter().all(|v| (1.0..=2.0).contains(v)));
    assert!((mean(&freeway) - 1.5).abs() < 0.05);

    let shared = design.column("Shared Mobility").unwrap();
    assert!(shared
        .iter()
        .all(|v| matches!(v, FactorValue::Integer(0) | FactorValue::Integer(1))));
}

#[test]
fn test_same_seed_reproduces_design() {
    let scope = road_test_scope();
    for sampler in ["lhs", "mc"] {
        let request = DesignRequest::new(sampler).random_seed(99);
        let a = design_experiments(&scope, &request, None).unwrap();
        let b = design_experiments(&scope, &request, None).unwrap();
        assert_eq!(a, b, "sampler {sampler}");

        let c = design_experiments(&scope, &DesignRequest::new(sampler).random_seed(100), None)
            .unwrap();
        assert_ne!(
            a.column_f64("Freeway Capacity"),
            c.column_f64("Freeway Capacity")
        );
    }
}

#[test]
fn test_unknown_sampler_rejected() {
    let err = design_experiments(&road_test_scope(), &DesignRequest::new("LHS"), None).unwrap_err();
    assert!(matches!(err, DesignError::UnknownSampler(ref name) if name == "LHS"));
    assert_eq!(err.error_code(), "UNKNOWN_SAMPLER");
}

#[test]
fn test_store_round_trip() {
    let scope = road_test_scope();
    let store = SqliteDesignStore::open_in_memory().unwrap();
    store.store_scope(&scope).unwrap();

    let design = scope
        .design_experiments(&DesignRequest::new("lhs"), Some(&store))
        .unwrap();
    let read = store.read_experiment_parameters("road_test", "lhs").unwrap();
    assert_eq!(read, design);
    assert_eq!(store.read_design_names("road_test").unwrap(), vec!["lhs".to_string()]);
}

#[test]
fn test_store_round_trip_every_sampler() {
    let scope = road_test_scope();
    let store = SqliteDesignStore::open_in_memory().unwrap();
    store.store_scope(&scope).unwrap();

    for sampler in ["lhs", "mc", "uni"] {
        let design =
            design_experiments(&scope, &DesignRequest::new(sampler), Some(&store)).unwrap();
        let read = store.read_experiment_parameters("road_test", sampler).unwrap();
        assert_eq!(read, design, "sampler {sampler}");
        assert_eq!(read.sampler, sampler);
    }
    assert_eq!(
        store.read_design_names("road_test").unwrap(),
        vec!["lhs".to_string(), "mc".to_string(), "uni".to_string()]
    );
}

#[test]
fn test_store_round_trip_of_empty_design() {
    let scope = Scope::builder("levers_only")
        .lever(Factor::boolean("x", false))
        .build()
        .unwrap();
    let store = SqliteDesignStore::open_in_memory().unwrap();
    store.store_scope(&scope).unwrap();

    let design = design_experiments(&scope, &DesignRequest::new("lhs"), Some(&store)).unwrap();
    assert!(design.is_empty());
    assert_eq!(design.column_names(), vec!["x"]);

    let read = store.read_experiment_parameters("levers_only", "lhs").unwrap();
    assert_eq!(read, design);
}

#[test]
fn test_store_append_and_replace() {
    let scope = road_test_scope();
    let store = SqliteDesignStore::open_in_memory().unwrap();
    store.store_scope(&scope).unwrap();

    let first = design_experiments(&scope, &DesignRequest::new("uni"), Some(&store)).unwrap();
    assert_eq!(first.experiment_ids(), (0..8).collect::<Vec<ExperimentId>>());

    let second = design_experiments(&scope, &DesignRequest::new("uni"), Some(&store)).unwrap();
    assert_eq!(second.experiment_ids(), (8..16).collect::<Vec<ExperimentId>>());
    assert_eq!(store.read_experiment_parameters("road_test", "uni").unwrap().len(), 16);

    let replaced = design_experiments(
        &scope,
        &DesignRequest::new("uni").replace_existing(true),
        Some(&store),
    )
    .unwrap();
    assert_eq!(replaced.experiment_ids(), (0..8).collect::<Vec<ExperimentId>>());
    assert_eq!(store.read_experiment_parameters("road_test", "uni").unwrap().len(), 8);
}

#[test]
fn test_store_write_without_scope_keeps_design() {
    let store = SqliteDesignStore::open_in_memory().unwrap();
    let err = design_experiments(&road_test_scope(), &DesignRequest::new("uni"), Some(&store))
        .unwrap_err();
    assert!(matches!(
        err,
        DesignError::StoreWrite {
            source: StorageError::UnknownScope { .. },
            ..
        }
    ));
    assert_eq!(err.error_code(), "UNKNOWN_SCOPE");
    let design = err.into_design().unwrap();
    assert_eq!(design.len(), 8);
}

/// Accepts scopes, refuses every design write.
struct RefusingStore;

impl IDesignStore for RefusingStore {
    fn store_scope(&self, _scope: &Scope) -> Result<(), StorageError> {
        Ok(())
    }

    fn read_scope(&self, _name: &str) -> Result<Option<Scope>, StorageError> {
        Ok(None)
    }

    fn read_scope_names(&self) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }

    fn write_experiment_parameters(
        &self,
        _scope_name: &str,
        _design_name: &str,
        _design: &Design,
    ) -> Result<Vec<ExperimentId>, StorageError> {
        Err(StorageError::DbBusy)
    }

    fn replace_experiment_parameters(
        &self,
        _scope_name: &str,
        _design_name: &str,
        _design: &Design,
    ) -> Result<Vec<ExperimentId>, StorageError> {
        Err(StorageError::DbBusy)
    }

    fn read_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
    ) -> Result<Design, StorageError> {
        Ok(Design::empty(scope_name, design_name))
    }

    fn read_design_names(&self, _scope_name: &str) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }

    fn delete_experiment_parameters(
        &self,
        _scope_name: &str,
        _design_name: &str,
    ) -> Result<usize, StorageError> {
        Ok(0)
    }
}

#[test]
fn test_failed_write_surfaces_error_and_design() {
    let scope = road_test_scope();
    let expected = design_experiments(&scope, &DesignRequest::new("lhs"), None).unwrap();

    let err = design_experiments(&scope, &DesignRequest::new("lhs"), Some(&RefusingStore))
        .unwrap_err();
    assert_eq!(err.error_code(), "STORE_WRITE_FAILED");
    assert!(err.to_string().contains("road_test"));
    assert_eq!(err.into_design(), Some(expected));
}
