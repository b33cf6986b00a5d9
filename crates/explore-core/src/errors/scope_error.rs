//! Scope and factor validation errors.

use super::error_code::{self, ExploreErrorCode};

/// Errors raised while building or validating a scope. These fire before
/// any sampling runs, so a bad factor never yields a partial design.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScopeError {
    #[error("Invalid distribution for factor '{factor}': {message}")]
    InvalidFactorDistribution { factor: String, message: String },

    #[error("Duplicate factor name '{name}' in scope")]
    DuplicateFactor { name: String },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Scope '{0}' has no factors")]
    EmptyScope(String),

    #[error("Scope parse error: {0}")]
    Parse(String),
}

impl ScopeError {
    pub(crate) fn distribution(factor: &str, message: impl Into<String>) -> Self {
        Self::InvalidFactorDistribution {
            factor: factor.to_string(),
            message: message.into(),
        }
    }
}

impl ExploreErrorCode for ScopeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFactorDistribution { .. } => error_code::INVALID_FACTOR_DISTRIBUTION,
            _ => error_code::SCOPE_ERROR,
        }
    }
}
