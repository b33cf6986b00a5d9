//! Data model: factor values, factors, scopes and design tables.

pub mod design;
pub mod factor;
pub mod scope;
pub mod value;

pub use design::{Column, Design, Experiment, ExperimentId};
pub use factor::{Distribution, Factor, FactorRole};
pub use scope::{Scope, ScopeBuilder};
pub use value::{FactorKind, FactorValue};
