//! V002: designs and experiment parameters.
//! designs, experiments, experiment_values.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS designs (
    scope TEXT NOT NULL REFERENCES scopes(name) ON DELETE CASCADE,
    name TEXT NOT NULL,
    sampler TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (scope, name)
) STRICT;

-- experiment_id is unique within (scope, design); reads order by it.
CREATE TABLE IF NOT EXISTS experiments (
    scope TEXT NOT NULL,
    design TEXT NOT NULL,
    experiment_id INTEGER NOT NULL,
    PRIMARY KEY (scope, design, experiment_id),
    FOREIGN KEY (scope, design) REFERENCES designs(scope, name) ON DELETE CASCADE
) STRICT;

-- Exactly one of value_real / value_int / value_text is set, chosen by
-- the factor kind. Booleans are stored in value_int as 0/1.
CREATE TABLE IF NOT EXISTS experiment_values (
    scope TEXT NOT NULL,
    design TEXT NOT NULL,
    experiment_id INTEGER NOT NULL,
    factor TEXT NOT NULL,
    value_real REAL,
    value_int INTEGER,
    value_text TEXT,
    PRIMARY KEY (scope, design, experiment_id, factor),
    FOREIGN KEY (scope, design, experiment_id)
        REFERENCES experiments(scope, design, experiment_id) ON DELETE CASCADE
) STRICT;

CREATE INDEX IF NOT EXISTS idx_experiment_values_factor
    ON experiment_values(scope, design, factor);
"#;
