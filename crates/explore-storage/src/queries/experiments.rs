//! Queries for the designs, experiments and experiment_values tables.
//!
//! Values are stored in a typed column chosen by the factor kind:
//! continuous in `value_real`, integer and boolean in `value_int`,
//! categorical in `value_text`. Reals round-trip bit-exactly.

use std::collections::HashMap;

use explore_core::errors::StorageError;
use explore_core::{Column, Design, Experiment, ExperimentId, FactorKind, FactorValue};
use rusqlite::{params, Connection, OptionalExtension};

/// A stored design header: its sampler tag and column list.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDesign {
    pub sampler: String,
    pub columns: Vec<Column>,
}

/// Create the design row and its column list. The caller owns the
/// transaction and has checked the columns against the scope.
pub fn insert_design(
    conn: &Connection,
    scope: &str,
    design_name: &str,
    design: &Design,
    created_at: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO designs (scope, name, sampler, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![scope, design_name, design.sampler, created_at],
    )
    .map_err(StorageError::sqlite)?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO design_columns (scope, design, ordinal, factor) VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(StorageError::sqlite)?;
    for (ordinal, column) in design.columns.iter().enumerate() {
        stmt.execute(params![scope, design_name, ordinal as i64, column.name])
            .map_err(StorageError::sqlite)?;
    }
    Ok(())
}

/// Header of a stored design. Column kinds come from the scope's factors.
pub fn get_design(
    conn: &Connection,
    scope: &str,
    design: &str,
) -> Result<Option<StoredDesign>, StorageError> {
    let sampler: Option<String> = conn
        .query_row(
            "SELECT sampler FROM designs WHERE scope = ?1 AND name = ?2",
            params![scope, design],
            |row| row.get(0),
        )
        .optional()
        .map_err(StorageError::sqlite)?;
    let Some(sampler) = sampler else {
        return Ok(None);
    };

    let mut stmt = conn
        .prepare_cached(
            "SELECT c.factor, f.kind FROM design_columns c
             LEFT JOIN scope_factors f ON f.scope = c.scope AND f.name = c.factor
             WHERE c.scope = ?1 AND c.design = ?2
             ORDER BY c.ordinal",
        )
        .map_err(StorageError::sqlite)?;
    let rows = stmt
        .query_map(params![scope, design], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .map_err(StorageError::sqlite)?;

    let mut columns = Vec::new();
    for row in rows {
        let (name, kind) = row.map_err(StorageError::sqlite)?;
        let kind = kind
            .as_deref()
            .and_then(FactorKind::from_name)
            .ok_or_else(|| StorageError::CorruptRow {
                message: format!("design '{design}' column '{name}' has no factor kind in scope '{scope}'"),
            })?;
        columns.push(Column { name, kind });
    }
    Ok(Some(StoredDesign { sampler, columns }))
}

/// Design names of a scope, sorted.
pub fn list_design_names(conn: &Connection, scope: &str) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT name FROM designs WHERE scope = ?1 ORDER BY name")
        .map_err(StorageError::sqlite)?;
    let rows = stmt
        .query_map(params![scope], |row| row.get(0))
        .map_err(StorageError::sqlite)?;
    rows.collect::<Result<Vec<String>, _>>()
        .map_err(StorageError::sqlite)
}

/// Largest stored experiment id for the pair, if any rows exist.
pub fn max_experiment_id(
    conn: &Connection,
    scope: &str,
    design: &str,
) -> Result<Option<ExperimentId>, StorageError> {
    conn.query_row(
        "SELECT MAX(experiment_id) FROM experiments WHERE scope = ?1 AND design = ?2",
        params![scope, design],
        |row| row.get(0),
    )
    .map_err(StorageError::sqlite)
}

/// Insert the rows of `design` under the given ids. The caller owns the
/// transaction and guarantees `ids.len() == design.len()`.
pub fn insert_rows(
    conn: &Connection,
    scope: &str,
    design_name: &str,
    design: &Design,
    ids: &[ExperimentId],
) -> Result<(), StorageError> {
    let mut experiment_stmt = conn
        .prepare_cached(
            "INSERT INTO experiments (scope, design, experiment_id) VALUES (?1, ?2, ?3)",
        )
        .map_err(StorageError::sqlite)?;
    let mut value_stmt = conn
        .prepare_cached(
            "INSERT INTO experiment_values
                (scope, design, experiment_id, factor, value_real, value_int, value_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(StorageError::sqlite)?;

    for (row, id) in design.rows.iter().zip(ids) {
        experiment_stmt
            .execute(params![scope, design_name, id])
            .map_err(StorageError::sqlite)?;
        for (column, value) in design.columns.iter().zip(&row.values) {
            let (real, int, text) = encode(value);
            value_stmt
                .execute(params![scope, design_name, id, column.name, real, int, text])
                .map_err(StorageError::sqlite)?;
        }
    }
    Ok(())
}

/// Delete every experiment of the pair. Returns the number of experiments
/// removed.
fn delete_rows(conn: &Connection, scope: &str, design: &str) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM experiment_values WHERE scope = ?1 AND design = ?2",
        params![scope, design],
    )
    .map_err(StorageError::sqlite)?;
    conn.execute(
        "DELETE FROM experiments WHERE scope = ?1 AND design = ?2",
        params![scope, design],
    )
    .map_err(StorageError::sqlite)
}

/// Delete a design with its columns and experiments. Returns the number of
/// experiments removed; 0 if the design did not exist.
pub fn delete_design(conn: &Connection, scope: &str, design: &str) -> Result<usize, StorageError> {
    let removed = delete_rows(conn, scope, design)?;
    conn.execute(
        "DELETE FROM design_columns WHERE scope = ?1 AND design = ?2",
        params![scope, design],
    )
    .map_err(StorageError::sqlite)?;
    conn.execute(
        "DELETE FROM designs WHERE scope = ?1 AND name = ?2",
        params![scope, design],
    )
    .map_err(StorageError::sqlite)?;
    Ok(removed)
}

/// Read the stored experiments of the pair, ordered by experiment id,
/// with one value per entry of `columns`.
pub fn read_rows(
    conn: &Connection,
    scope: &str,
    design: &str,
    columns: &[Column],
) -> Result<Vec<Experiment>, StorageError> {
    let column_index: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    let ids = experiment_ids(conn, scope, design)?;
    let row_index: HashMap<ExperimentId, usize> =
        ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut cells: Vec<Vec<Option<FactorValue>>> = vec![vec![None; columns.len()]; ids.len()];

    let mut stmt = conn
        .prepare_cached(
            "SELECT experiment_id, factor, value_real, value_int, value_text
             FROM experiment_values WHERE scope = ?1 AND design = ?2
             ORDER BY experiment_id",
        )
        .map_err(StorageError::sqlite)?;
    let rows = stmt
        .query_map(params![scope, design], |row| {
            Ok((
                row.get::<_, ExperimentId>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<i64>>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })
        .map_err(StorageError::sqlite)?;

    for row in rows {
        let (id, factor, real, int, text) = row.map_err(StorageError::sqlite)?;
        let (Some(&r), Some(&c)) = (row_index.get(&id), column_index.get(factor.as_str())) else {
            return Err(StorageError::CorruptRow {
                message: format!("orphan value for experiment {id}, factor '{factor}'"),
            });
        };
        cells[r][c] = Some(decode(columns[c].kind, &factor, real, int, text)?);
    }

    let experiments = ids
        .into_iter()
        .zip(cells)
        .map(|(id, values)| {
            let values = values
                .into_iter()
                .zip(columns)
                .map(|(value, column)| {
                    value.ok_or_else(|| StorageError::CorruptRow {
                        message: format!("experiment {id} has no value for '{}'", column.name),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Experiment { id, values })
        })
        .collect::<Result<Vec<_>, StorageError>>()?;

    Ok(experiments)
}

fn experiment_ids(conn: &Connection, scope: &str, design: &str) -> Result<Vec<ExperimentId>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT experiment_id FROM experiments WHERE scope = ?1 AND design = ?2
             ORDER BY experiment_id",
        )
        .map_err(StorageError::sqlite)?;
    let rows = stmt
        .query_map(params![scope, design], |row| row.get(0))
        .map_err(StorageError::sqlite)?;
    rows.collect::<Result<Vec<ExperimentId>, _>>()
        .map_err(StorageError::sqlite)
}

fn encode(value: &FactorValue) -> (Option<f64>, Option<i64>, Option<&str>) {
    match value {
        FactorValue::Real(v) => (Some(*v), None, None),
        FactorValue::Integer(v) => (None, Some(*v), None),
        FactorValue::Boolean(v) => (None, Some(i64::from(*v)), None),
        FactorValue::Category(v) => (None, None, Some(v.as_str())),
    }
}

fn decode(
    kind: FactorKind,
    factor: &str,
    real: Option<f64>,
    int: Option<i64>,
    text: Option<String>,
) -> Result<FactorValue, StorageError> {
    let value = match kind {
        FactorKind::Continuous => real.map(FactorValue::Real),
        FactorKind::Integer => int.map(FactorValue::Integer),
        FactorKind::Boolean => match int {
            Some(0) => Some(FactorValue::Boolean(false)),
            Some(1) => Some(FactorValue::Boolean(true)),
            _ => None,
        },
        FactorKind::Categorical => text.map(FactorValue::Category),
    };
    value.ok_or_else(|| StorageError::CorruptRow {
        message: format!("value of '{factor}' does not fit kind {kind}"),
    })
}
