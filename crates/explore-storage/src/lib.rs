//! # explore-storage
//!
//! SQLite persistence for scopes and experiment designs: a serialized
//! writer plus pooled readers, versioned migrations, typed value columns
//! and the [`SqliteDesignStore`] implementation of `IDesignStore`.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use connection::DatabaseManager;
pub use store::SqliteDesignStore;
