//! V001: scope metadata.
//! scopes, scope_factors, scope_measures.

pub const MIGRATION_SQL: &str = r#"
-- One row per scope. metadata_json is the canonical JSON form of the
-- scope and is what re-store compatibility is checked against.
CREATE TABLE IF NOT EXISTS scopes (
    name TEXT PRIMARY KEY,
    description TEXT,
    metadata_json TEXT NOT NULL,
    created_at INTEGER NOT NULL
) STRICT;

-- Factors in declaration order. kind selects the typed value column
-- used by experiment_values.
CREATE TABLE IF NOT EXISTS scope_factors (
    scope TEXT NOT NULL REFERENCES scopes(name) ON DELETE CASCADE,
    ordinal INTEGER NOT NULL,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    role TEXT NOT NULL,
    PRIMARY KEY (scope, name),
    UNIQUE (scope, ordinal)
) STRICT;

CREATE TABLE IF NOT EXISTS scope_measures (
    scope TEXT NOT NULL REFERENCES scopes(name) ON DELETE CASCADE,
    ordinal INTEGER NOT NULL,
    name TEXT NOT NULL,
    PRIMARY KEY (scope, name)
) STRICT;
"#;
