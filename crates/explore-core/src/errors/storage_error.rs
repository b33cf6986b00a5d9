//! Storage errors.

use super::error_code::{self, ExploreErrorCode};

/// Errors raised at the design-store boundary. They are surfaced to the
/// caller unmodified and never retried here.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database busy")]
    DbBusy,

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Unknown scope '{scope}': store the scope before writing designs")]
    UnknownScope { scope: String },

    #[error("Scope '{scope}' already stored with different metadata")]
    DuplicateScope { scope: String },

    #[error("Design does not match scope '{scope}': {message}")]
    SchemaMismatch { scope: String, message: String },

    #[error("Corrupt stored row: {message}")]
    CorruptRow { message: String },
}

impl StorageError {
    /// Wrap any displayable backend error as a `SqliteError`.
    pub fn sqlite(e: impl std::fmt::Display) -> Self {
        Self::SqliteError {
            message: e.to_string(),
        }
    }
}

impl ExploreErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::UnknownScope { .. } => error_code::UNKNOWN_SCOPE,
            Self::DuplicateScope { .. } => error_code::DUPLICATE_SCOPE,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
