//! ExploreErrorCode trait for boundary conversion.

/// Trait for converting engine errors to stable error code strings.
/// Every error enum implements this so callers on the other side of a
/// process or language boundary can match on a code instead of a message.
pub trait ExploreErrorCode {
    /// Returns the error code string (e.g., "UNKNOWN_SAMPLER").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const UNKNOWN_SAMPLER: &str = "UNKNOWN_SAMPLER";
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const INVALID_FACTOR_DISTRIBUTION: &str = "INVALID_FACTOR_DISTRIBUTION";
pub const SCOPE_ERROR: &str = "SCOPE_ERROR";
pub const TRANSFORM_ERROR: &str = "TRANSFORM_ERROR";
pub const STORE_WRITE_FAILED: &str = "STORE_WRITE_FAILED";
pub const UNKNOWN_SCOPE: &str = "UNKNOWN_SCOPE";
pub const DUPLICATE_SCOPE: &str = "DUPLICATE_SCOPE";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
