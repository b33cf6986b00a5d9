//! V003: the column list of each design, so that empty designs keep their
//! columns and appends can be checked against what is already stored.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS design_columns (
    scope TEXT NOT NULL,
    design TEXT NOT NULL,
    ordinal INTEGER NOT NULL,
    factor TEXT NOT NULL,
    PRIMARY KEY (scope, design, ordinal),
    UNIQUE (scope, design, factor),
    FOREIGN KEY (scope, design) REFERENCES designs(scope, name) ON DELETE CASCADE
) STRICT;

-- Backfill designs written before this version from their stored values,
-- in scope declaration order.
INSERT OR IGNORE INTO design_columns (scope, design, ordinal, factor)
SELECT DISTINCT v.scope, v.design, f.ordinal, v.factor
FROM experiment_values v
JOIN scope_factors f ON f.scope = v.scope AND f.name = v.factor;
"#;
