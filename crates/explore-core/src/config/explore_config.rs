//! Top-level configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DesignConfig, StorageConfig};
use crate::constants::{MAX_READ_POOL_SIZE, SAMPLER_NAMES};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "explore.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`EXPLORE_*`)
/// 3. Project config (`explore.toml` in project root)
/// 4. User config (`~/.explore/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExploreConfig {
    pub design: DesignConfig,
    pub storage: StorageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub sampler: Option<String>,
    pub n_samples_per_factor: Option<usize>,
    pub random_seed: Option<u64>,
    pub database_path: Option<PathBuf>,
}

impl ExploreConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ExploreConfig) -> Result<(), ConfigError> {
        if let Some(ref sampler) = config.design.default_sampler {
            if !SAMPLER_NAMES.contains(&sampler.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "design.default_sampler".to_string(),
                    message: format!("must be one of {}", SAMPLER_NAMES.join(", ")),
                });
            }
        }
        if config.design.n_samples_per_factor == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "design.n_samples_per_factor".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(size) = config.storage.read_pool_size {
            if !(1..=MAX_READ_POOL_SIZE).contains(&size) {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
                });
            }
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".explore").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut ExploreConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ExploreConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `Some` values in `other` win.
    fn merge(base: &mut ExploreConfig, other: &ExploreConfig) {
        if other.design.default_sampler.is_some() {
            base.design.default_sampler = other.design.default_sampler.clone();
        }
        if other.design.n_samples_per_factor.is_some() {
            base.design.n_samples_per_factor = other.design.n_samples_per_factor;
        }
        if other.design.random_seed.is_some() {
            base.design.random_seed = other.design.random_seed;
        }

        if other.storage.database_path.is_some() {
            base.storage.database_path = other.storage.database_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
        if other.storage.busy_timeout_ms.is_some() {
            base.storage.busy_timeout_ms = other.storage.busy_timeout_ms;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `EXPLORE_DESIGN_SAMPLER`, `EXPLORE_DESIGN_RANDOM_SEED`, etc.
    fn apply_env_overrides(config: &mut ExploreConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("EXPLORE_DESIGN_SAMPLER") {
            config.design.default_sampler = Some(val);
        }
        if let Some(v) = parse_env("EXPLORE_DESIGN_N_SAMPLES_PER_FACTOR")? {
            config.design.n_samples_per_factor = Some(v);
        }
        if let Some(v) = parse_env("EXPLORE_DESIGN_RANDOM_SEED")? {
            config.design.random_seed = Some(v);
        }
        if let Ok(val) = std::env::var("EXPLORE_STORAGE_DATABASE_PATH") {
            config.storage.database_path = Some(PathBuf::from(val));
        }
        if let Some(v) = parse_env("EXPLORE_STORAGE_READ_POOL_SIZE")? {
            config.storage.read_pool_size = Some(v);
        }
        if let Some(v) = parse_env("EXPLORE_STORAGE_BUSY_TIMEOUT_MS")? {
            config.storage.busy_timeout_ms = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ExploreConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.sampler {
            config.design.default_sampler = Some(v.clone());
        }
        if let Some(v) = cli.n_samples_per_factor {
            config.design.n_samples_per_factor = Some(v);
        }
        if let Some(v) = cli.random_seed {
            config.design.random_seed = Some(v);
        }
        if let Some(ref v) = cli.database_path {
            config.storage.database_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Parse a numeric env var. Unset is `None`; a malformed value is an error.
fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val.parse::<T>().map(Some).map_err(|e| ConfigError::InvalidValue {
            field: key.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Ok(None),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
