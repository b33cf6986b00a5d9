//! IDesignStore trait: the persistence contract for scopes and designs.
//!
//! The generator only sees this trait. The SQLite implementation lives in
//! `explore-storage`; tests may supply their own.

use crate::errors::StorageError;
use crate::types::{Design, ExperimentId, Scope};

/// Scope metadata + keyed design tables.
///
/// Designs are keyed by `(scope_name, design_name)`. The design name
/// defaults to the sampler name, so `(scope, "lhs")` holds the Latin
/// Hypercube design of that scope.
pub trait IDesignStore: Send + Sync {
    // --- Scopes ---

    /// Persist scope metadata. Re-storing identical metadata is a no-op;
    /// different metadata under an existing name fails with `DuplicateScope`.
    fn store_scope(&self, scope: &Scope) -> Result<(), StorageError>;

    fn read_scope(&self, name: &str) -> Result<Option<Scope>, StorageError>;

    fn read_scope_names(&self) -> Result<Vec<String>, StorageError>;

    // --- Designs ---

    /// Append the rows of `design`. Ids continue after the largest id
    /// already stored for the pair, so a first write keeps the design's own
    /// ids. Returns the persisted ids in row order. Fails with
    /// `UnknownScope` if the scope was never stored, and with
    /// `SchemaMismatch` if the pair already holds a design with another
    /// sampler tag or column list.
    fn write_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
        design: &Design,
    ) -> Result<Vec<ExperimentId>, StorageError>;

    /// Delete any stored rows for the pair and write `design` in the same
    /// transaction. The sampler tag and columns may change.
    fn replace_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
        design: &Design,
    ) -> Result<Vec<ExperimentId>, StorageError>;

    /// Stored rows in generation order. An empty design if nothing was
    /// ever written for the pair.
    fn read_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
    ) -> Result<Design, StorageError>;

    fn read_design_names(&self, scope_name: &str) -> Result<Vec<String>, StorageError>;

    /// Delete all rows of a design. Returns the number of experiments removed.
    fn delete_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
    ) -> Result<usize, StorageError>;
}
