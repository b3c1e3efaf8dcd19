//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstree/bstree.toml`
//! 3. Explicit config file: `--config <FILE>`
//! 4. Environment variables: `BSTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{BstError, BstResult};

/// Settings for the demonstration driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Number of random values drawn for the initial tree
    pub sample_size: usize,
    /// Smallest value that can be drawn (inclusive)
    pub min_value: i64,
    /// Largest value that can be drawn (inclusive)
    pub max_value: i64,
    /// How many values above `max_value` are inserted to unbalance the tree
    pub unbalance_count: usize,
    /// Distance between consecutive unbalancing values
    pub unbalance_step: i64,
    /// Fixed RNG seed for reproducible samples
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_size: 15,
            min_value: 1,
            max_value: 100,
            unbalance_count: 3,
            unbalance_step: 5,
            seed: None,
        }
    }
}

/// Raw settings for intermediate parsing; `None` means "not specified".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub sample_size: Option<usize>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub unbalance_count: Option<usize>,
    pub unbalance_step: Option<i64>,
    pub seed: Option<u64>,
}

/// Get the XDG config directory for bstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstree.toml"))
}

/// Environment source for `BSTREE_*` overrides.
pub fn env_source() -> Environment {
    Environment::with_prefix("BSTREE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> BstResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| BstError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| BstError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Look up one key, treating "not set" as `None` and anything else as an error.
fn lookup<T: DeserializeOwned>(config: &Config, key: &str) -> BstResult<Option<T>> {
    match config.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            sample_size: overlay.sample_size.unwrap_or(self.sample_size),
            min_value: overlay.min_value.unwrap_or(self.min_value),
            max_value: overlay.max_value.unwrap_or(self.max_value),
            unbalance_count: overlay.unbalance_count.unwrap_or(self.unbalance_count),
            unbalance_step: overlay.unbalance_step.unwrap_or(self.unbalance_step),
            seed: overlay.seed.or(self.seed),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; unlike the global
    ///   file it must exist
    pub fn load(config_file: Option<&Path>) -> BstResult<Self> {
        Self::load_from(global_config_path().as_deref(), config_file, env_source())
    }

    /// Load settings from explicit sources. `load` wires in the real ones.
    #[instrument(level = "debug", skip(env))]
    pub fn load_from(
        global: Option<&Path>,
        config_file: Option<&Path>,
        env: Environment,
    ) -> BstResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, optional
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file, required
        if let Some(path) = config_file {
            debug!("loading config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply BSTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self, env: Environment) -> BstResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        let overlay = RawSettings {
            sample_size: lookup(&config, "sample_size")?,
            min_value: lookup(&config, "min_value")?,
            max_value: lookup(&config, "max_value")?,
            unbalance_count: lookup(&config, "unbalance_count")?,
            unbalance_step: lookup(&config, "unbalance_step")?,
            seed: lookup(&config, "seed")?,
        };

        Ok(settings.merge_with(&overlay))
    }

    /// Reject settings the driver cannot sample from.
    pub fn validate(&self) -> BstResult<()> {
        if self.sample_size == 0 {
            return Err(BstError::InvalidSampleSize(self.sample_size));
        }
        if self.min_value > self.max_value {
            return Err(BstError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.unbalance_step < 1 {
            return Err(BstError::Config {
                message: format!("unbalance_step must be positive, got {}", self.unbalance_step),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> BstResult<String> {
        toml::to_string_pretty(self).map_err(|e| BstError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bstree/bstree.toml
#   File:   bstree --config <FILE>
#   Env:    BSTREE_* environment variables, e.g. BSTREE_SAMPLE_SIZE=31

# Number of random values drawn for the demo tree
# sample_size = 15

# Inclusive range the values are drawn from
# min_value = 1
# max_value = 100

# Values inserted above max_value to unbalance the tree: max_value + k * step
# unbalance_count = 3
# unbalance_step = 5

# Fixed seed for reproducible runs
# seed = 42
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> BstError {
    BstError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_sources_when_loading_then_uses_defaults() {
        let env = Environment::with_prefix("BSTREE").source(Some(Default::default()));
        let settings = Settings::load_from(None, None, env).expect("load defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let overlay = RawSettings {
            max_value: Some(500),
            seed: Some(7),
            ..Default::default()
        };

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.max_value, 500);
        assert_eq!(merged.seed, Some(7));
        assert_eq!(merged.sample_size, 15);
        assert_eq!(merged.min_value, 1);
    }

    #[test]
    fn given_inverted_range_when_validating_then_rejects() {
        let settings = Settings {
            min_value: 10,
            max_value: 1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(BstError::InvalidRange { min: 10, max: 1 })
        ));
    }

    #[test]
    fn given_zero_sample_size_when_validating_then_rejects() {
        let settings = Settings {
            sample_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(BstError::InvalidSampleSize(0))
        ));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("parse template");
        assert!(raw.sample_size.is_none());
    }

    #[test]
    fn given_defaults_when_serialized_then_round_trips() {
        let text = Settings::default().to_toml().expect("serialize");
        let raw: RawSettings = toml::from_str(&text).expect("parse");
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }
}
