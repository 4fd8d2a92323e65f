//! Error types produced by the ingest crate.
//!
//! All errors are typed, cloneable, and comparable so callers can match on
//! them and tests can assert on exact variants. Row-level variants carry the
//! 1-based line number of the offending CSV record.
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`Io`](IngestError::Io) | The source could not be opened or read |
//! | [`Csv`](IngestError::Csv) | Structural CSV problem or a field of the wrong type |
//! | [`InvalidTimestamp`](IngestError::InvalidTimestamp) | Timestamp is not ISO-8601 with an offset |
//! | [`InvalidCoordinate`](IngestError::InvalidCoordinate) | `x` or `y` is NaN or infinite |
//! | [`EmptyIdentifier`](IngestError::EmptyIdentifier) | `uid` column is blank |
//! | [`TooManyRecords`](IngestError::TooManyRecords) | `max_records` exceeded |
//! | [`InvalidConfig`](IngestError::InvalidConfig) | [`IngestConfig`](crate::IngestConfig) failed validation |
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while loading trajectories.
///
/// The enum is `#[non_exhaustive]`; include a catch-all arm when matching.
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::EmptyIdentifier { line: 7 };
/// assert_eq!(err.to_string(), "line 7: uid must not be empty");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// Opening or reading the underlying source failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// The CSV reader rejected a record, or a field could not be decoded
    /// into its column type (e.g. `floor` is not an integer).
    #[error("line {line}: malformed record: {message}")]
    Csv { line: u64, message: String },

    /// The timestamp is not ISO-8601 / RFC 3339 with an explicit offset.
    #[error("line {line}: invalid timestamp {value:?}: {message}")]
    InvalidTimestamp {
        line: u64,
        value: String,
        message: String,
    },

    /// A coordinate is NaN or infinite.
    #[error("line {line}: non-finite coordinate ({x}, {y})")]
    InvalidCoordinate { line: u64, x: String, y: String },

    /// The `uid` column is empty after trimming.
    #[error("line {line}: uid must not be empty")]
    EmptyIdentifier { line: u64 },

    /// More records than `max_records` allows.
    #[error("input exceeds max_records limit of {limit}")]
    TooManyRecords { limit: usize },

    /// The ingest configuration is inconsistent.
    #[error("invalid ingest config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl IngestError {
    /// Line number of the offending record for row-level errors.
    pub fn line(&self) -> Option<u64> {
        match self {
            IngestError::Csv { line, .. }
            | IngestError::InvalidTimestamp { line, .. }
            | IngestError::InvalidCoordinate { line, .. }
            | IngestError::EmptyIdentifier { line } => Some(*line),
            _ => None,
        }
    }

    /// Whether the error concerns a single record and the rest of the input
    /// can still be read (these are the ones `skip_invalid_records` skips).
    pub fn is_record_level(&self) -> bool {
        self.line().is_some()
    }
}

impl From<std::io::Error> for IngestError {
    fn from(value: std::io::Error) -> Self {
        IngestError::Io(value.to_string())
    }
}
