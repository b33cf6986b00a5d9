//! Design generation errors.

use super::error_code::{self, ExploreErrorCode};
use super::{ScopeError, StorageError};
use crate::types::Design;

/// Errors that can occur while generating (and optionally persisting) a design.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("Unknown sampler '{0}': expected one of lhs, mc, uni")]
    UnknownSampler(String),

    #[error("Invalid design parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    #[error("Cannot map sample for factor '{factor}': {message}")]
    Transform { factor: String, message: String },

    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    /// The design was generated but persisting it failed. The design is
    /// still valid and can be recovered with [`DesignError::into_design`].
    #[error("Failed to write design '{}' for scope '{}': {source}", .design.design_name, .design.scope_name)]
    StoreWrite {
        design: Box<Design>,
        source: StorageError,
    },
}

impl DesignError {
    /// Recover the generated design from a failed store write.
    pub fn into_design(self) -> Option<Design> {
        match self {
            Self::StoreWrite { design, .. } => Some(*design),
            _ => None,
        }
    }

    /// The storage error behind a failed store write.
    pub fn storage_source(&self) -> Option<&StorageError> {
        match self {
            Self::StoreWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ExploreErrorCode for DesignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSampler(_) => error_code::UNKNOWN_SAMPLER,
            Self::InvalidParameter { .. } => error_code::INVALID_PARAMETER,
            Self::Transform { .. } => error_code::TRANSFORM_ERROR,
            Self::Scope(e) => e.error_code(),
            // Writes to a never-stored scope keep the storage code.
            Self::StoreWrite {
                source: StorageError::UnknownScope { .. },
                ..
            } => error_code::UNKNOWN_SCOPE,
            Self::StoreWrite { .. } => error_code::STORE_WRITE_FAILED,
        }
    }
}
