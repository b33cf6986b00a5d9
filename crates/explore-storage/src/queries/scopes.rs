//! Queries for the scopes, scope_factors and scope_measures tables.

use explore_core::errors::StorageError;
use explore_core::{FactorKind, Scope};
use rusqlite::{params, Connection, OptionalExtension};

/// A stored factor column: name and kind, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorColumnRow {
    pub name: String,
    pub kind: FactorKind,
}

/// Canonical JSON metadata of a stored scope.
pub fn get_metadata(conn: &Connection, name: &str) -> Result<Option<String>, StorageError> {
    conn.query_row(
        "SELECT metadata_json FROM scopes WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
    .optional()
    .map_err(StorageError::sqlite)
}

pub fn exists(conn: &Connection, name: &str) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM scopes WHERE name = ?1)",
        params![name],
        |row| row.get(0),
    )
    .map_err(StorageError::sqlite)
}

/// Insert a scope with its factors and measures. The caller owns the
/// transaction.
pub fn insert(
    conn: &Connection,
    scope: &Scope,
    metadata_json: &str,
    created_at: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO scopes (name, description, metadata_json, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![scope.name(), scope.description(), metadata_json, created_at],
    )
    .map_err(StorageError::sqlite)?;

    let mut factor_stmt = conn
        .prepare_cached(
            "INSERT INTO scope_factors (scope, ordinal, name, kind, role)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(StorageError::sqlite)?;
    for (ordinal, factor) in scope.factors().iter().enumerate() {
        factor_stmt
            .execute(params![
                scope.name(),
                ordinal as i64,
                factor.name,
                factor.kind.name(),
                factor.role.name(),
            ])
            .map_err(StorageError::sqlite)?;
    }

    let mut measure_stmt = conn
        .prepare_cached(
            "INSERT INTO scope_measures (scope, ordinal, name) VALUES (?1, ?2, ?3)",
        )
        .map_err(StorageError::sqlite)?;
    for (ordinal, measure) in scope.measures().iter().enumerate() {
        measure_stmt
            .execute(params![scope.name(), ordinal as i64, measure])
            .map_err(StorageError::sqlite)?;
    }
    Ok(())
}

/// All scope names, sorted.
pub fn list_names(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT name FROM scopes ORDER BY name")
        .map_err(StorageError::sqlite)?;
    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(StorageError::sqlite)?;
    rows.collect::<Result<Vec<String>, _>>()
        .map_err(StorageError::sqlite)
}

/// Factor columns of a scope in declaration order.
pub fn factor_columns(conn: &Connection, scope: &str) -> Result<Vec<FactorColumnRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT name, kind FROM scope_factors WHERE scope = ?1 ORDER BY ordinal",
        )
        .map_err(StorageError::sqlite)?;
    let rows = stmt
        .query_map(params![scope], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(StorageError::sqlite)?;

    let mut columns = Vec::new();
    for row in rows {
        let (name, kind) = row.map_err(StorageError::sqlite)?;
        let kind = FactorKind::from_name(&kind).ok_or_else(|| StorageError::CorruptRow {
            message: format!("factor '{name}' of scope '{scope}' has unknown kind '{kind}'"),
        })?;
        columns.push(FactorColumnRow { name, kind });
    }
    Ok(columns)
}
