//! Configuration types for trajectory ingestion.
//!
//! [`IngestConfig`] controls how CSV input is read and how strictly bad rows
//! are treated. It is cheap to clone and deserializes from JSON or YAML, so it
//! can be embedded in the top-level run configuration.
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig {
//!     delimiter: ';',
//!     skip_invalid_records: true,
//!     ..Default::default()
//! };
//! config.validate().expect("valid ingest config");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for CSV ingestion.
///
/// The expected header is `timestamp,x,y,floor,uid`; columns may appear in
/// any order and extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Configuration schema version.
    ///
    /// Default: `1`
    pub version: u32,

    /// Field delimiter. Must be a single ASCII character other than a quote
    /// or line break.
    ///
    /// Default: `','`
    pub delimiter: char,

    /// Trim surrounding whitespace from every field before decoding.
    ///
    /// Default: `true`
    pub trim_fields: bool,

    /// Log and skip records with an unparsable timestamp, non-finite
    /// coordinate, empty uid or mistyped field instead of failing the load.
    /// Structural CSV errors still abort.
    ///
    /// Default: `false`
    pub skip_invalid_records: bool,

    /// Maximum number of accepted records. Loading fails with
    /// [`IngestError::TooManyRecords`](crate::IngestError::TooManyRecords)
    /// when exceeded.
    ///
    /// Default: `None` (unlimited)
    pub max_records: Option<usize>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            delimiter: ',',
            trim_fields: true,
            skip_invalid_records: false,
            max_records: None,
        }
    }
}

impl IngestConfig {
    /// Check internal consistency. Call once at start-up.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion);
        }
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        if self.max_records == Some(0) {
            return Err(ConfigError::ZeroMaxRecords);
        }
        Ok(())
    }

    pub(crate) fn delimiter_byte(&self) -> u8 {
        // validate() guarantees an ASCII delimiter
        self.delimiter as u8
    }
}

/// Errors that can occur when validating an [`IngestConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("version must be >= 1")]
    InvalidVersion,

    #[error("delimiter {0:?} must be a single ASCII character other than a quote or line break")]
    InvalidDelimiter(char),

    #[error("max_records must be greater than zero when set")]
    ZeroMaxRecords,
}
