//! Core data model: timestamped floor-plan positions.
//!
//! ```text
//! CSV row (timestamp,x,y,floor,uid)
//!        │  parse + validate
//!        ▼
//! SpacetimePoint { identifier, timestamp (with offset), x, y, floor }
//!        │  group by identifier, file order kept
//!        ▼
//! TrajectoryStore { uid → [SpacetimePoint] }
//! ```
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// One recorded position of one identifier.
///
/// Fields are private: a point is complete from construction and never
/// changes afterwards.
///
/// ```rust
/// use chrono::DateTime;
/// use ingest::SpacetimePoint;
///
/// let t0 = DateTime::parse_from_rfc3339("2017-07-18T09:00:00+03:00").unwrap();
/// let t1 = DateTime::parse_from_rfc3339("2017-07-18T06:00:20Z").unwrap();
/// let a = SpacetimePoint::new("a", t0, 0.0, 0.0, 1);
/// let b = SpacetimePoint::new("b", t1, 3.0, 0.0, 1);
///
/// // Offsets are honoured: the instants are 20 seconds apart.
/// assert_eq!(a.seconds_until(&b), 20);
/// assert_eq!(b.abs_seconds_between(&a), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacetimePoint {
    identifier: String,
    timestamp: DateTime<FixedOffset>,
    x: f64,
    y: f64,
    floor: i32,
}

impl SpacetimePoint {
    pub fn new(
        identifier: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        x: f64,
        y: f64,
        floor: i32,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            timestamp,
            x,
            y,
            floor,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn floor(&self) -> i32 {
        self.floor
    }

    /// Signed whole seconds from `self` to `other`, truncated toward zero.
    pub fn seconds_until(&self, other: &SpacetimePoint) -> i64 {
        (other.timestamp - self.timestamp).num_seconds()
    }

    /// Absolute whole seconds between the two instants.
    pub fn abs_seconds_between(&self, other: &SpacetimePoint) -> u64 {
        self.seconds_until(other).unsigned_abs()
    }
}

impl fmt::Display for SpacetimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}] floor {} at {}",
            self.identifier,
            self.x,
            self.y,
            self.floor,
            self.timestamp.to_rfc3339()
        )
    }
}

/// Raw CSV row as decoded by serde; header names match field names.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CsvRecord {
    timestamp: String,
    x: f64,
    y: f64,
    floor: i32,
    uid: String,
}

impl CsvRecord {
    pub(crate) fn into_point(self, line: u64) -> Result<SpacetimePoint, IngestError> {
        let uid = self.uid.trim();
        if uid.is_empty() {
            return Err(IngestError::EmptyIdentifier { line });
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(IngestError::InvalidCoordinate {
                line,
                x: self.x.to_string(),
                y: self.y.to_string(),
            });
        }
        let timestamp =
            parse_timestamp(&self.timestamp).map_err(|message| IngestError::InvalidTimestamp {
                line,
                value: self.timestamp.clone(),
                message,
            })?;

        Ok(SpacetimePoint::new(uid, timestamp, self.x, self.y, self.floor))
    }
}

/// Parse an ISO-8601 timestamp with offset.
///
/// Accepts RFC 3339 (`2017-07-18T09:09:20.234+03:00`, `...Z`), minute
/// precision (`2017-07-18T09:09+03:00`), and a trailing region id in
/// brackets (`...+03:00[Europe/Athens]`), which is dropped; the numeric
/// offset is what gets stored.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    let trimmed = raw.trim();
    let without_zone = match trimmed.find('[') {
        Some(idx) if trimmed.ends_with(']') => &trimmed[..idx],
        _ => trimmed,
    };

    let normalized = match without_zone
        .strip_suffix('Z')
        .or_else(|| without_zone.strip_suffix('z'))
    {
        Some(head) => format!("{head}+00:00"),
        None => without_zone.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalized)
        .or_else(|_| DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z"))
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_fraction_and_offset() {
        let t = parse_timestamp("2017-07-18T09:09:20.234+03:00").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(t.timestamp_subsec_millis(), 234);
    }

    #[test]
    fn parses_bracketed_zone_suffix() {
        let t = parse_timestamp("2017-07-18T09:09:20+03:00[Europe/Athens]").unwrap();
        assert_eq!(t, ts("2017-07-18T09:09:20+03:00"));
    }

    #[test]
    fn parses_minute_precision() {
        assert_eq!(
            parse_timestamp("2017-07-18T09:09+03:00").unwrap(),
            ts("2017-07-18T09:09:00+03:00")
        );
        assert_eq!(
            parse_timestamp("2017-07-18T09:09Z").unwrap(),
            ts("2017-07-18T09:09:00Z")
        );
    }

    #[test]
    fn rejects_timestamp_without_offset() {
        assert!(parse_timestamp("2017-07-18T09:09:20").is_err());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn seconds_truncate_toward_zero() {
        let a = SpacetimePoint::new("a", ts("2020-01-01T00:00:00Z"), 0.0, 0.0, 0);
        let b = SpacetimePoint::new("b", ts("2020-01-01T00:00:29.900Z"), 0.0, 0.0, 0);
        assert_eq!(a.seconds_until(&b), 29);
        assert_eq!(b.seconds_until(&a), -29);
        assert_eq!(b.abs_seconds_between(&a), 29);
    }

    #[test]
    fn csv_record_validation() {
        let good = CsvRecord {
            timestamp: "2020-01-01T00:00:00Z".into(),
            x: 1.0,
            y: 2.0,
            floor: 3,
            uid: " abc ".into(),
        };
        let point = good.into_point(2).unwrap();
        assert_eq!(point.identifier(), "abc");
        assert_eq!(point.floor(), 3);

        let blank = CsvRecord {
            timestamp: "2020-01-01T00:00:00Z".into(),
            x: 1.0,
            y: 2.0,
            floor: 3,
            uid: "  ".into(),
        };
        assert_eq!(
            blank.into_point(5).unwrap_err(),
            IngestError::EmptyIdentifier { line: 5 }
        );

        let nan = CsvRecord {
            timestamp: "2020-01-01T00:00:00Z".into(),
            x: f64::NAN,
            y: 2.0,
            floor: 3,
            uid: "abc".into(),
        };
        assert!(matches!(
            nan.into_point(6),
            Err(IngestError::InvalidCoordinate { line: 6, .. })
        ));
    }

    #[test]
    fn display_includes_identity_and_floor() {
        let p = SpacetimePoint::new("de0a13a8", ts("2017-07-18T09:09:20+03:00"), 1.5, 2.0, 1);
        let s = p.to_string();
        assert!(s.starts_with("de0a13a8 [1.5, 2]"));
        assert!(s.contains("floor 1"));
    }
}
