//! Query modules, one per table group.

pub mod experiments;
pub mod scopes;
