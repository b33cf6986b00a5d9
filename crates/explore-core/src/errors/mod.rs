//! Error handling for the design engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod design_error;
pub mod error_code;
pub mod scope_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use design_error::DesignError;
pub use error_code::ExploreErrorCode;
pub use scope_error::ScopeError;
pub use storage_error::StorageError;
