//! Experiment parameter persistence: typed round trip, ordering, append
//! id continuation, replace, delete, and concurrent writers.

use std::sync::{Arc, Barrier};
use std::thread;

use explore_core::errors::StorageError;
use explore_core::traits::IDesignStore;
use explore_core::{Design, Distribution, Factor, FactorValue, Scope};
use explore_storage::SqliteDesignStore;
use tempfile::TempDir;

fn scope() -> Scope {
    Scope::builder("road_test")
        .constant(Factor::constant("risk", 1.0))
        .uncertainty(Factor::continuous(
            "ivtt",
            Distribution::Uniform { min: 0.75, max: 1.0 },
            1.0,
        ))
        .lever(Factor::integer("lanes", 0, 4, 2))
        .lever(Factor::boolean("lrt", false))
        .lever(Factor::categorical("toll", ["none", "peak", "flat"], "none"))
        .build()
        .unwrap()
}

fn design(name: &str, rows: usize) -> Design {
    let scope = scope();
    let mut design = Design::for_scope(&scope, name, "lhs");
    for i in 0..rows {
        design.push_row(vec![
            FactorValue::Real(1.0),
            FactorValue::Real(0.75 + 0.1 / (i as f64 + 3.0)),
            FactorValue::Integer(i as i64 % 5),
            FactorValue::Boolean(i % 2 == 0),
            FactorValue::Category(["none", "peak", "flat"][i % 3].to_string()),
        ]);
    }
    design
}

fn store_with_scope() -> SqliteDesignStore {
    let store = SqliteDesignStore::open_in_memory().unwrap();
    store.store_scope(&scope()).unwrap();
    store
}

#[test]
fn test_round_trip_is_exact_and_typed() {
    let store = store_with_scope();
    let written = design("lhs", 7);
    let ids = store
        .write_experiment_parameters("road_test", "lhs", &written)
        .unwrap();
    assert_eq!(ids, (0..7).collect::<Vec<i64>>());

    let read = store.read_experiment_parameters("road_test", "lhs").unwrap();
    assert_eq!(read, written);
    // Bit-exact reals.
    for (a, b) in read.rows.iter().zip(&written.rows) {
        let (FactorValue::Real(x), FactorValue::Real(y)) = (&a.values[1], &b.values[1]) else {
            panic!("ivtt column must be real");
        };
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

#[test]
fn test_read_never_written_pair_is_empty() {
    let store = store_with_scope();
    let read = store
        .read_experiment_parameters("road_test", "nothing")
        .unwrap();
    assert!(read.is_empty());
    assert!(read.columns.is_empty());

    let unknown = store.read_experiment_parameters("no_scope", "lhs").unwrap();
    assert!(unknown.is_empty());
}

#[test]
fn test_write_unknown_scope_fails() {
    let store = SqliteDesignStore::open_in_memory().unwrap();
    let err = store
        .write_experiment_parameters("road_test", "lhs", &design("lhs", 2))
        .unwrap_err();
    assert!(matches!(err, StorageError::UnknownScope { ref scope } if scope == "road_test"));
}

#[test]
fn test_append_continues_ids() {
    let store = store_with_scope();
    store
        .write_experiment_parameters("road_test", "lhs", &design("lhs", 4))
        .unwrap();
    let ids = store
        .write_experiment_parameters("road_test", "lhs", &design("lhs", 3))
        .unwrap();
    assert_eq!(ids, vec![4, 5, 6]);

    let read = store.read_experiment_parameters("road_test", "lhs").unwrap();
    assert_eq!(read.experiment_ids(), (0..7).collect::<Vec<i64>>());
}

#[test]
fn test_replace_discards_previous_rows() {
    let store = store_with_scope();
    store
        .write_experiment_parameters("road_test", "lhs", &design("lhs", 10))
        .unwrap();
    let ids = store
        .replace_experiment_parameters("road_test", "lhs", &design("lhs", 2))
        .unwrap();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(
        store
            .read_experiment_parameters("road_test", "lhs")
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_rows_ordered_by_experiment_id() {
    let store = store_with_scope();
    let mut written = design("custom", 3);
    assert!(written.assign_ids(&[30, 10, 20]));
    store
        .write_experiment_parameters("road_test", "custom", &written)
        .unwrap();

    let read = store
        .read_experiment_parameters("road_test", "custom")
        .unwrap();
    assert_eq!(read.experiment_ids(), vec![10, 20, 30]);
    assert_eq!(read.rows[0].values, written.rows[1].values);
}

#[test]
fn test_design_names_and_delete() {
    let store = store_with_scope();
    store
        .write_experiment_parameters("road_test", "uni", &design("uni", 2))
        .unwrap();
    store
        .write_experiment_parameters("road_test", "lhs", &design("lhs", 5))
        .unwrap();
    assert_eq!(
        store.read_design_names("road_test").unwrap(),
        vec!["lhs".to_string(), "uni".to_string()]
    );

    assert_eq!(
        store
            .delete_experiment_parameters("road_test", "lhs")
            .unwrap(),
        5
    );
    assert_eq!(
        store.read_design_names("road_test").unwrap(),
        vec!["uni".to_string()]
    );
    assert!(store
        .read_experiment_parameters("road_test", "lhs")
        .unwrap()
        .is_empty());
    assert_eq!(
        store
            .delete_experiment_parameters("road_test", "lhs")
            .unwrap(),
        0
    );
}

#[test]
fn test_projected_design_round_trips_its_columns() {
    let store = store_with_scope();
    let projected = design("proj", 3).project(&["ivtt", "toll"]).unwrap();
    store
        .write_experiment_parameters("road_test", "proj", &projected)
        .unwrap();
    let read = store
        .read_experiment_parameters("road_test", "proj")
        .unwrap();
    assert_eq!(read.column_names(), vec!["ivtt", "toll"]);
    assert_eq!(read, projected);
}

#[test]
fn test_mismatched_design_rejected() {
    let store = store_with_scope();
    let mut bad = design("bad", 1);
    bad.rows[0].values[2] = FactorValue::Real(2.0);
    let err = store
        .write_experiment_parameters("road_test", "bad", &bad)
        .unwrap_err();
    assert!(matches!(err, StorageError::SchemaMismatch { .. }));
    assert!(store
        .read_design_names("road_test")
        .unwrap()
        .is_empty());
}

#[test]
fn test_concurrent_writers_never_interleave_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("concurrent.db");
    SqliteDesignStore::open(&path)
        .unwrap()
        .store_scope(&scope())
        .unwrap();

    // Separate stores stand in for separate processes.
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let store = SqliteDesignStore::open(&path).unwrap();
                barrier.wait();
                store
                    .write_experiment_parameters("road_test", "lhs", &design("lhs", 5))
                    .unwrap()
            })
        })
        .collect();

    let mut all_ids: Vec<i64> = Vec::new();
    for h in handles {
        let ids = h.join().unwrap();
        // Each batch is contiguous.
        assert!(ids.windows(2).all(|w| w[1] == w[0] + 1));
        all_ids.extend(ids);
    }
    all_ids.sort_unstable();
    assert_eq!(all_ids, (0..20).collect::<Vec<i64>>());

    let store = SqliteDesignStore::open(&path).unwrap();
    assert_eq!(
        store
            .read_experiment_parameters("road_test", "lhs")
            .unwrap()
            .len(),
        20
    );
}

#[test]
fn test_append_with_other_columns_rejected() {
    let store = store_with_scope();
    store
        .write_experiment_parameters("road_test", "uni", &design("uni", 5))
        .unwrap();

    let projected = design("uni", 5).project(&["ivtt"]).unwrap();
    let err = store
        .write_experiment_parameters("road_test", "uni", &projected)
        .unwrap_err();
    assert!(matches!(err, StorageError::SchemaMismatch { .. }), "{err}");

    // The stored pair is untouched and still readable.
    let read = store.read_experiment_parameters("road_test", "uni").unwrap();
    assert_eq!(read, design("uni", 5));
}

#[test]
fn test_replace_may_change_columns() {
    let store = store_with_scope();
    store
        .write_experiment_parameters("road_test", "uni", &design("uni", 5))
        .unwrap();

    let projected = design("uni", 2).project(&["lanes", "lrt"]).unwrap();
    store
        .replace_experiment_parameters("road_test", "uni", &projected)
        .unwrap();
    let read = store.read_experiment_parameters("road_test", "uni").unwrap();
    assert_eq!(read, projected);
}

#[test]
fn test_append_with_other_sampler_rejected() {
    let store = store_with_scope();
    let mut mc = design("pilot", 3);
    mc.sampler = "mc".to_string();
    store
        .write_experiment_parameters("road_test", "pilot", &mc)
        .unwrap();

    let lhs = design("pilot", 2);
    let err = store
        .write_experiment_parameters("road_test", "pilot", &lhs)
        .unwrap_err();
    assert!(matches!(err, StorageError::SchemaMismatch { .. }), "{err}");

    let read = store.read_experiment_parameters("road_test", "pilot").unwrap();
    assert_eq!(read.sampler, "mc");
    assert_eq!(read, mc);
}

#[test]
fn test_empty_design_keeps_columns() {
    let store = store_with_scope();
    let empty = design("lhs", 0);
    let ids = store
        .write_experiment_parameters("road_test", "lhs", &empty)
        .unwrap();
    assert!(ids.is_empty());

    let read = store.read_experiment_parameters("road_test", "lhs").unwrap();
    assert!(read.is_empty());
    assert_eq!(read.column_names(), scope().factor_names());
    assert_eq!(read, empty);

    // Rows appended later land under the same columns.
    store
        .write_experiment_parameters("road_test", "lhs", &design("lhs", 2))
        .unwrap();
    assert_eq!(
        store
            .read_experiment_parameters("road_test", "lhs")
            .unwrap()
            .experiment_ids(),
        vec![0, 1]
    );
}
