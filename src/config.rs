//! Configuration management for fatstore
//!
//! Settings are layered: built-in defaults, then an optional `fatstore.toml`
//! in the working directory, then `FATSTORE_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_FILE: &str = "fatstore";
const ENV_PREFIX: &str = "FATSTORE";

/// Complete store configuration, loaded once at startup
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory holding the `fat/` and `blocks/` collections
    pub storage_root: String,

    /// Number of characters stored per block
    pub block_size: usize,

    /// Maximum attempts for a record deletion hitting OS permission errors
    pub max_retries: usize,

    /// Upper bound for file and user names accepted by the shell
    pub max_name_length: usize,

    /// Acting user when none is entered at the prompt
    pub default_user: String,

    /// Sweep unreachable blocks before the shell starts
    pub reclaim_on_startup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_root: "db".to_string(),
            block_size: 20,
            max_retries: 3,
            max_name_length: 255,
            default_user: "usuario".to_string(),
            reclaim_on_startup: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from defaults, `fatstore.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("storage_root", defaults.storage_root)?
            .set_default("block_size", defaults.block_size as u64)?
            .set_default("max_retries", defaults.max_retries as u64)?
            .set_default("max_name_length", defaults.max_name_length as u64)?
            .set_default("default_user", defaults.default_user)?
            .set_default("reclaim_on_startup", defaults.reclaim_on_startup)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: StoreConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.block_size == 0 {
            return Err(config::ConfigError::Message(
                "block_size must be greater than 0".into(),
            ));
        }

        if self.storage_root.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "storage_root cannot be empty".into(),
            ));
        }

        if self.max_name_length == 0 {
            return Err(config::ConfigError::Message(
                "max_name_length must be greater than 0".into(),
            ));
        }

        if self.default_user.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "default_user cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get storage root as PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_size, 20);
        assert_eq!(config.storage_root_path(), PathBuf::from("db"));
    }

    #[test]
    fn test_rejects_zero_block_size() {
        let config = StoreConfig {
            block_size: 0,
            ..StoreConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_storage_root() {
        let config = StoreConfig {
            storage_root: "  ".into(),
            ..StoreConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
