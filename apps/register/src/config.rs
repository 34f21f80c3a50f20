//! # Register Configuration
//!
//! Where the register reads its stores from and writes snapshots to.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    RegisterConfig::load(file)                           │
//! │                                                                         │
//! │  1. Defaults           fixtures/db/*.csv, out/updated_*.csv             │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  2. TOML file          [data] / [output] (only if --config is given)    │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  3. SCANLANE_* env     highest priority                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example file
//! ```toml
//! [data]
//! inventory = "db/inventory.csv"
//! memberships = "db/memberships.csv"
//! coupons = "db/coupons.csv"
//!
//! [output]
//! inventory = "out/updated_inventory.csv"
//! memberships = "out/updated_memberships.csv"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {0}: must not be empty")]
    InvalidValue(String),
}

// =============================================================================
// Sections
// =============================================================================

/// Input store paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_inventory")]
    pub inventory: PathBuf,

    #[serde(default = "default_memberships")]
    pub memberships: PathBuf,

    #[serde(default = "default_coupons")]
    pub coupons: PathBuf,
}

fn default_inventory() -> PathBuf {
    PathBuf::from("fixtures/db/inventory.csv")
}

fn default_memberships() -> PathBuf {
    PathBuf::from("fixtures/db/memberships.csv")
}

fn default_coupons() -> PathBuf {
    PathBuf::from("fixtures/db/coupons.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            inventory: default_inventory(),
            memberships: default_memberships(),
            coupons: default_coupons(),
        }
    }
}

/// Snapshot paths written at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_inventory_out")]
    pub inventory: PathBuf,

    #[serde(default = "default_memberships_out")]
    pub memberships: PathBuf,
}

fn default_inventory_out() -> PathBuf {
    PathBuf::from("out/updated_inventory.csv")
}

fn default_memberships_out() -> PathBuf {
    PathBuf::from("out/updated_memberships.csv")
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            inventory: default_inventory_out(),
            memberships: default_memberships_out(),
        }
    }
}

// =============================================================================
// Register Config
// =============================================================================

/// Full register configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl RegisterConfig {
    /// Builds the configuration from defaults, an optional file and the
    /// process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => RegisterConfig::from_file(path)?,
            None => RegisterConfig::default(),
        };
        config.apply_env_from(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a TOML file. Missing sections and keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = RegisterConfig::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Overrides paths from `SCANLANE_*` variables returned by `lookup`.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut PathBuf); 5] = [
            ("SCANLANE_INVENTORY", &mut self.data.inventory),
            ("SCANLANE_MEMBERSHIPS", &mut self.data.memberships),
            ("SCANLANE_COUPONS", &mut self.data.coupons),
            ("SCANLANE_INVENTORY_OUT", &mut self.output.inventory),
            ("SCANLANE_MEMBERSHIPS_OUT", &mut self.output.memberships),
        ];

        for (key, target) in targets {
            if let Some(value) = lookup(key) {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue(key.to_string()));
                }
                debug!(key, value = %value, "Config override from environment");
                *target = PathBuf::from(value);
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
