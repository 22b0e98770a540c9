//! Configuration file support for the body-shape analyzer.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bodyshape/config.toml`.

use crate::{Error, Result, ValidationLimits};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub validation: ValidationLimits,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Workout catalog source
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// TOML file replacing the built-in workout plans
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn home_fallback(relative: &str) -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(relative))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_fallback(".local/share"));
    base.join("bodyshape")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.check()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_fallback(".config"));
        base.join("bodyshape").join("config.toml")
    }

    /// Path of the JSONL record store
    pub fn records_path(&self) -> PathBuf {
        self.data.data_dir.join("analyses.jsonl")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject limits that would refuse every measurement
    fn check(&self) -> Result<()> {
        let v = &self.validation;
        if v.min_age > v.max_age {
            return Err(Error::Config(format!(
                "validation.min_age {} exceeds max_age {}",
                v.min_age, v.max_age
            )));
        }
        for (name, max) in [
            ("max_weight_kg", v.max_weight_kg),
            ("max_height_cm", v.max_height_cm),
            ("max_girth_cm", v.max_girth_cm),
        ] {
            if !max.is_finite() || max <= 0.0 {
                return Err(Error::Config(format!(
                    "validation.{} must be positive, got {}",
                    name, max
                )));
            }
        }
        Ok(())
    }
}
