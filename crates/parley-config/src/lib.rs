//! # parley-config
//!
//! Layered configuration loading for Parley using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PARLEY_*` prefix, `__` as separator)
//! 2. Project-level `.parley/config.toml`
//! 3. User-level `~/.config/parley/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PARLEY_INGEST__BODY_MAX_CHARS` -> `ingest.body_max_chars`,
//! `PARLEY_TAXONOMY__INDUSTRY` -> `taxonomy.industry`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use parley_config::ParleyConfig;
//!
//! let config = ParleyConfig::load_with_dotenv().expect("config");
//! println!("industry: {}", config.taxonomy.industry);
//! ```

mod error;
mod general;
mod ingest;
mod insights;
mod taxonomy;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use ingest::IngestConfig;
pub use insights::InsightsConfig;
pub use taxonomy::TaxonomyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ParleyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".parley/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PARLEY_").split("__"))
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ingest.validate()?;
        if self.insights.default_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "insights.default_days".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("parley").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = ParleyConfig::default();
        assert_eq!(config.ingest.body_max_chars, 1000);
        assert_eq!(config.taxonomy.industry, "default");
        assert_eq!(config.insights.default_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = ParleyConfig::figment();
        let config: ParleyConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.ingest.fallback_line_limit, 50);
    }

    #[test]
    fn zero_day_window_is_rejected() {
        let mut config = ParleyConfig::default();
        config.insights.default_days = 0;
        assert!(config.validate().is_err());
    }
}
