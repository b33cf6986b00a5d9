//! # explore-core
//!
//! Foundation crate for the exploratory design engine: the factor model,
//! scopes, design tables, the design-store contract, errors, configuration
//! and tracing setup. Everything else in the workspace depends on this crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;
pub mod tracing;
pub mod types;

pub use types::{
    Column, Design, Distribution, Experiment, ExperimentId, Factor, FactorKind, FactorRole,
    FactorValue, Scope, ScopeBuilder,
};
