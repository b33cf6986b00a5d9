//! Logging for the design engine: `tracing` events filtered per crate
//! through `EXPLORE_LOG`.

pub mod setup;

pub use setup::{build_filter, init_tracing, DEFAULT_DIRECTIVES, LOG_ENV_VAR};
