//! YAML Configuration File Support for trajmeet
//!
//! One YAML file holds everything a run needs besides the data file and the
//! two identifiers: how to read the CSV, which algorithm to use and with
//! which thresholds, and how to log.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # trajmeet run configuration
//! version: "1.0"
//!
//! ingest:
//!   version: 1
//!   delimiter: ","
//!   trim_fields: true
//!   skip_invalid_records: false
//!
//! matcher:
//!   algorithm: "gabriel"
//!   spatial_epsilon: 3.7
//!   temporal_epsilon: 30
//!   max_spatial_epsilon: 10.0
//!   max_temporal_epsilon: 60
//!   use_parallel: false
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::Path;

use ingest::IngestConfig;
use matcher::MatchThresholds;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for one trajmeet run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunConfig {
    /// Configuration format version
    pub version: String,

    /// CSV ingestion settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Algorithm and thresholds
    #[serde(default)]
    pub matcher: MatcherYamlConfig,

    /// Log filter and output format for the binary
    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl RunConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.ingest
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("ingest: {err}")))?;
        self.matcher.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            ingest: IngestConfig::default(),
            matcher: MatcherYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

/// Matcher YAML configuration
///
/// The `max_*` fields cap what `spatial_epsilon` and `temporal_epsilon` may be
/// set to, here or through command-line overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherYamlConfig {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_spatial_epsilon")]
    pub spatial_epsilon: f64,

    #[serde(default = "default_temporal_epsilon")]
    pub temporal_epsilon: u64,

    #[serde(default = "default_max_spatial_epsilon")]
    pub max_spatial_epsilon: f64,

    #[serde(default = "default_max_temporal_epsilon")]
    pub max_temporal_epsilon: u64,

    #[serde(default)]
    pub use_parallel: bool,
}

impl MatcherYamlConfig {
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.algorithm.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "matcher.algorithm must not be empty".to_string(),
            ));
        }
        if !(self.max_spatial_epsilon.is_finite() && self.max_spatial_epsilon > 0.0) {
            return Err(ConfigLoadError::Validation(
                "matcher.max_spatial_epsilon must be a positive number".to_string(),
            ));
        }
        if !(self.spatial_epsilon > 0.0 && self.spatial_epsilon <= self.max_spatial_epsilon) {
            return Err(ConfigLoadError::Validation(format!(
                "matcher.spatial_epsilon must be in (0, {}], got {}",
                self.max_spatial_epsilon, self.spatial_epsilon
            )));
        }
        if self.temporal_epsilon > self.max_temporal_epsilon {
            return Err(ConfigLoadError::Validation(format!(
                "matcher.temporal_epsilon must be in [0, {}], got {}",
                self.max_temporal_epsilon, self.temporal_epsilon
            )));
        }
        Ok(())
    }

    /// Validated thresholds for the matcher.
    pub fn thresholds(&self) -> Result<MatchThresholds, ConfigLoadError> {
        self.validate()?;
        MatchThresholds::new(self.spatial_epsilon, self.temporal_epsilon)
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }
}

impl Default for MatcherYamlConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            spatial_epsilon: default_spatial_epsilon(),
            temporal_epsilon: default_temporal_epsilon(),
            max_spatial_epsilon: default_max_spatial_epsilon(),
            max_temporal_epsilon: default_max_temporal_epsilon(),
            use_parallel: false,
        }
    }
}

/// Logging YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingYamlConfig {
    /// `EnvFilter` directive, e.g. `info` or `matcher=debug,warn`.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl LoggingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_algorithm() -> String {
    "brute".to_string()
}
fn default_spatial_epsilon() -> f64 {
    1.0
}
fn default_temporal_epsilon() -> u64 {
    30
}
fn default_max_spatial_epsilon() -> f64 {
    10.0
}
fn default_max_temporal_epsilon() -> u64 {
    60
}
fn default_log_level() -> String {
    "info".to_string()
}
