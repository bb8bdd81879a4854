//! Configuration file loading
//!
//! An optional TOML file supplies default encoder options and batch settings.
//! Precedence is: command-line flag, then config file, then built-in default.

use imgconv_image::ConversionOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unknown keys
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    /// Encoder option defaults
    #[serde(default)]
    pub defaults: ConversionOptions,

    /// Batch settings
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Batch conversion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Convert files on all cores
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn default_true() -> bool {
    true
}

/// Loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, the first file found in the
    /// standard locations, or defaults when neither exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Resolve encoder options: flags override the file, the file overrides defaults.
    pub fn options(&self, quality: Option<i32>, icon_size: Option<i32>) -> ConversionOptions {
        let defaults = self.schema.defaults;
        ConversionOptions {
            quality: quality.unwrap_or(defaults.quality),
            icon_size: icon_size.unwrap_or(defaults.icon_size),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".imgconv.toml", "imgconv.toml", ".config/imgconv.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
