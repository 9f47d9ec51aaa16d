//! # obe-config
//!
//! Layered configuration loading for OBE attainment tooling using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`OBE_*` prefix, `__` as separator)
//! 2. Project-level `.obe/config.toml`
//! 3. User-level `~/.config/obe/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `OBE_GENERAL__DATASET` -> `general.dataset`,
//! `OBE_ATTAINMENT__TARGET_PERCENTAGE` -> `attainment.target_percentage`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use obe_config::ObeConfig;
//!
//! let config = ObeConfig::load_with_dotenv().expect("config");
//! let defaults = config.attainment.schema_defaults();
//! assert!(defaults.target_percentage > 0.0);
//! ```

mod attainment;
mod error;
mod general;
mod survey;

pub use attainment::AttainmentDefaults;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use survey::SurveyDefaults;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ObeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub attainment: AttainmentDefaults,
    #[serde(default)]
    pub survey: SurveyDefaults,
}

impl ObeConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
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
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".obe/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("OBE_").split("__"))
    }

    /// Range checks that figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.attainment.validate()?;
        self.survey.validate()
    }

    /// Dataset path from config, if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `general.dataset` is empty.
    pub fn dataset_path(&self) -> Result<PathBuf, ConfigError> {
        if self.general.has_dataset() {
            Ok(PathBuf::from(self.general.dataset.trim()))
        } else {
            Err(ConfigError::NotConfigured {
                field: "general.dataset".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("obe").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current
    /// directory. Silently does nothing if no `.env` is found.
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
        let config = ObeConfig::default();
        assert!(!config.general.has_dataset());
        assert!(config.survey.fallback_rating.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_dataset_is_not_configured() {
        let config = ObeConfig::default();
        assert!(matches!(
            config.dataset_path(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
