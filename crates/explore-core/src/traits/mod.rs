//! Trait seams between the engine and its collaborators.

pub mod design_store;

pub use design_store::IDesignStore;
