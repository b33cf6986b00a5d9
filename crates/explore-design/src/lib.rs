//! # explore-design
//!
//! Turns a scope's factor definitions into concrete experiment designs.
//! Provides the unit-to-native distribution transforms, the three sampler
//! strategies and the generator that ties them to an optional design store.

pub mod generator;
pub mod sampler;
pub mod transform;

pub use generator::{design_experiments, DesignRequest, ScopeDesignExt};
pub use sampler::{SampleMatrix, Sampler, SamplerParams};
