//! SqliteDesignStore: the SQLite implementation of `IDesignStore`.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use explore_core::config::StorageConfig;
use explore_core::errors::StorageError;
use explore_core::traits::IDesignStore;
use explore_core::{Column, Design, ExperimentId, Scope};
use rusqlite::Connection;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::experiments::{self, StoredDesign};
use crate::queries::scopes;

/// Persists scopes and their designs in a SQLite database.
///
/// Writes run in BEGIN IMMEDIATE transactions on the serialized writer,
/// so concurrent writers of the same `(scope, design)` pair never
/// interleave ids, in-process or across processes.
pub struct SqliteDesignStore {
    db: DatabaseManager,
}

impl SqliteDesignStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::from_config(config)?,
        })
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    fn write(
        &self,
        scope_name: &str,
        design_name: &str,
        design: &Design,
        replace: bool,
    ) -> Result<Vec<ExperimentId>, StorageError> {
        let ids = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                check_design_fits(tx, scope_name, design)?;
                match experiments::get_design(tx, scope_name, design_name)? {
                    Some(stored) if !replace => {
                        check_append_fits(scope_name, design_name, &stored, design)?;
                    }
                    Some(_) => {
                        experiments::delete_design(tx, scope_name, design_name)?;
                        experiments::insert_design(tx, scope_name, design_name, design, now())?;
                    }
                    None => {
                        experiments::insert_design(tx, scope_name, design_name, design, now())?;
                    }
                }
                let ids = match experiments::max_experiment_id(tx, scope_name, design_name)? {
                    None => design.experiment_ids(),
                    Some(max) => (max + 1..).take(design.len()).collect(),
                };
                experiments::insert_rows(tx, scope_name, design_name, design, &ids)?;
                Ok(ids)
            })
        })?;
        tracing::debug!(
            scope = scope_name,
            design = design_name,
            rows = ids.len(),
            replace,
            "wrote experiment parameters"
        );
        Ok(ids)
    }
}

/// Every design column must be a factor of the scope with the same kind,
/// and every value must match its column.
fn check_design_fits(conn: &Connection, scope_name: &str, design: &Design) -> Result<(), StorageError> {
    if !scopes::exists(conn, scope_name)? {
        return Err(StorageError::UnknownScope {
            scope: scope_name.to_string(),
        });
    }
    let mismatch = |message: String| StorageError::SchemaMismatch {
        scope: scope_name.to_string(),
        message,
    };
    let factors = scopes::factor_columns(conn, scope_name)?;
    for column in &design.columns {
        match factors.iter().find(|f| f.name == column.name) {
            Some(f) if f.kind == column.kind => {}
            Some(f) => {
                return Err(mismatch(format!(
                    "column '{}' is {}, factor is {}",
                    column.name, column.kind, f.kind
                )))
            }
            None => return Err(mismatch(format!("no factor named '{}'", column.name))),
        }
    }
    for row in &design.rows {
        if row.values.len() != design.columns.len() {
            return Err(mismatch(format!(
                "experiment {} has {} values for {} columns",
                row.id,
                row.values.len(),
                design.columns.len()
            )));
        }
        if let Some((column, value)) = design
            .columns
            .iter()
            .zip(&row.values)
            .find(|(c, v)| v.kind() != c.kind)
        {
            return Err(mismatch(format!(
                "experiment {} value {value} does not fit {} column '{}'",
                row.id, column.kind, column.name
            )));
        }
    }
    Ok(())
}

/// An append must keep the sampler tag and column list of the stored
/// design; only a replace may change them.
fn check_append_fits(
    scope_name: &str,
    design_name: &str,
    stored: &StoredDesign,
    design: &Design,
) -> Result<(), StorageError> {
    if stored.sampler != design.sampler {
        return Err(StorageError::SchemaMismatch {
            scope: scope_name.to_string(),
            message: format!(
                "design '{design_name}' holds '{}' rows, cannot append '{}' rows",
                stored.sampler, design.sampler
            ),
        });
    }
    if stored.columns != design.columns {
        let names = |columns: &[Column]| {
            columns
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        return Err(StorageError::SchemaMismatch {
            scope: scope_name.to_string(),
            message: format!(
                "design '{design_name}' has columns [{}], cannot append columns [{}]",
                names(&stored.columns),
                names(&design.columns)
            ),
        });
    }
    Ok(())
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl IDesignStore for SqliteDesignStore {
    fn store_scope(&self, scope: &Scope) -> Result<(), StorageError> {
        let metadata = scope.to_json().map_err(|e| StorageError::CorruptRow {
            message: e.to_string(),
        })?;
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| match scopes::get_metadata(tx, scope.name())? {
                Some(existing) if existing == metadata => Ok(()),
                Some(_) => Err(StorageError::DuplicateScope {
                    scope: scope.name().to_string(),
                }),
                None => {
                    scopes::insert(tx, scope, &metadata, now())?;
                    tracing::info!(scope = scope.name(), "stored scope");
                    Ok(())
                }
            })
        })
    }

    fn read_scope(&self, name: &str) -> Result<Option<Scope>, StorageError> {
        let Some(metadata) = self.db.with_reader(|conn| scopes::get_metadata(conn, name))? else {
            return Ok(None);
        };
        Scope::from_json(&metadata)
            .map(Some)
            .map_err(|e| StorageError::CorruptRow {
                message: format!("scope '{name}': {e}"),
            })
    }

    fn read_scope_names(&self) -> Result<Vec<String>, StorageError> {
        self.db.with_reader(scopes::list_names)
    }

    fn write_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
        design: &Design,
    ) -> Result<Vec<ExperimentId>, StorageError> {
        self.write(scope_name, design_name, design, false)
    }

    fn replace_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
        design: &Design,
    ) -> Result<Vec<ExperimentId>, StorageError> {
        self.write(scope_name, design_name, design, true)
    }

    fn read_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
    ) -> Result<Design, StorageError> {
        self.db.with_reader(|conn| {
            let Some(stored) = experiments::get_design(conn, scope_name, design_name)? else {
                return Ok(Design::empty(scope_name, design_name));
            };
            let rows = experiments::read_rows(conn, scope_name, design_name, &stored.columns)?;
            Ok(Design {
                scope_name: scope_name.to_string(),
                design_name: design_name.to_string(),
                sampler: stored.sampler,
                columns: stored.columns,
                rows,
            })
        })
    }

    fn read_design_names(&self, scope_name: &str) -> Result<Vec<String>, StorageError> {
        self.db
            .with_reader(|conn| experiments::list_design_names(conn, scope_name))
    }

    fn delete_experiment_parameters(
        &self,
        scope_name: &str,
        design_name: &str,
    ) -> Result<usize, StorageError> {
        let removed = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                experiments::delete_design(tx, scope_name, design_name)
            })
        })?;
        tracing::debug!(scope = scope_name, design = design_name, removed, "deleted design");
        Ok(removed)
    }
}
