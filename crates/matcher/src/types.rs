use geometry::{euclidean_distance, GeometryError};
use ingest::SpacetimePoint;
use serde::Serialize;
use thiserror::Error;

/// Spatial and temporal tolerances for one match call.
///
/// Both bounds are inclusive: a pair exactly `spatial_epsilon` apart, or
/// exactly `temporal_epsilon` seconds apart, still qualifies.
///
/// ```rust
/// use matcher::MatchThresholds;
///
/// let t = MatchThresholds::new(3.7, 30).unwrap();
/// assert_eq!(t.spatial_epsilon(), 3.7);
/// assert!(MatchThresholds::new(0.0, 30).is_err());
/// assert!(MatchThresholds::new(f64::NAN, 30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchThresholds {
    spatial_epsilon: f64,
    temporal_epsilon: u64,
}

impl MatchThresholds {
    /// `spatial_epsilon` must be finite and positive.
    pub fn new(spatial_epsilon: f64, temporal_epsilon: u64) -> Result<Self, MatchError> {
        if !spatial_epsilon.is_finite() {
            return Err(MatchError::InvalidThresholds(format!(
                "spatial_epsilon must be finite, got {spatial_epsilon}"
            )));
        }
        if spatial_epsilon <= 0.0 {
            return Err(MatchError::InvalidThresholds(format!(
                "spatial_epsilon must be > 0.0, got {spatial_epsilon}"
            )));
        }
        Ok(Self {
            spatial_epsilon,
            temporal_epsilon,
        })
    }

    pub fn spatial_epsilon(&self) -> f64 {
        self.spatial_epsilon
    }

    /// Whole seconds.
    pub fn temporal_epsilon(&self) -> u64 {
        self.temporal_epsilon
    }

    /// Whether `p` and `q` are close enough in space and time on the same floor.
    pub fn admits(&self, p: &SpacetimePoint, q: &SpacetimePoint) -> bool {
        p.floor() == q.floor()
            && point_distance(p, q) <= self.spatial_epsilon
            && p.abs_seconds_between(q) <= self.temporal_epsilon
    }
}

pub(crate) fn point_distance(p: &SpacetimePoint, q: &SpacetimePoint) -> f64 {
    euclidean_distance(p.x(), p.y(), q.x(), q.y())
}

/// A pair of points, one per trajectory, that met.
///
/// `point_one` always comes from the first trajectory passed to
/// `identify`, `point_two` from the second. `distance` is computed once here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intersection {
    point_one: SpacetimePoint,
    point_two: SpacetimePoint,
    distance: f64,
}

impl Intersection {
    pub fn new(point_one: SpacetimePoint, point_two: SpacetimePoint) -> Self {
        let distance = point_distance(&point_one, &point_two);
        Self {
            point_one,
            point_two,
            distance,
        }
    }

    pub fn point_one(&self) -> &SpacetimePoint {
        &self.point_one
    }

    pub fn point_two(&self) -> &SpacetimePoint {
        &self.point_two
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Absolute gap between the two timestamps in whole seconds.
    pub fn time_gap_seconds(&self) -> u64 {
        self.point_one.abs_seconds_between(&self.point_two)
    }

    /// Floor of the meeting. Both points share it.
    pub fn floor(&self) -> i32 {
        self.point_one.floor()
    }
}

/// Errors produced by the matching layer.
///
/// "No qualifying pair" is not an error; it is `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MatchError {
    /// Thresholds are malformed or out of range.
    #[error("invalid match thresholds: {0}")]
    InvalidThresholds(String),

    /// The requested algorithm name resolved to nothing.
    #[error("no such algorithm {name:?}; available: {}", .available.join(", "))]
    NoSuchAlgorithm {
        name: String,
        available: Vec<String>,
    },

    /// The proximity graph could not be built.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
}
