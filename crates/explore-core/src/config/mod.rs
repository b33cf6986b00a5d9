//! Configuration system.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod design_config;
pub mod explore_config;
pub mod storage_config;

pub use design_config::DesignConfig;
pub use explore_config::{CliOverrides, ExploreConfig};
pub use storage_config::StorageConfig;
