use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SpacetimePoint;

/// Per-identifier trajectories, each in arrival order.
///
/// Arrival order is the order points were pushed (file order for CSV
/// loads); it is not re-sorted by timestamp.
///
/// ```rust
/// use chrono::DateTime;
/// use ingest::{SpacetimePoint, TrajectoryStore};
///
/// let t = DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z").unwrap();
/// let store: TrajectoryStore = vec![
///     SpacetimePoint::new("b", t, 1.0, 1.0, 0),
///     SpacetimePoint::new("a", t, 0.0, 0.0, 0),
///     SpacetimePoint::new("b", t, 2.0, 2.0, 0),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.get("b").map(|t| t.len()), Some(2));
/// assert!(store.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStore {
    trajectories: BTreeMap<String, Vec<SpacetimePoint>>,
}

impl TrajectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point to its identifier's trajectory.
    pub fn push(&mut self, point: SpacetimePoint) {
        match self.trajectories.get_mut(point.identifier()) {
            Some(points) => points.push(point),
            None => {
                self.trajectories
                    .insert(point.identifier().to_string(), vec![point]);
            }
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&[SpacetimePoint]> {
        self.trajectories.get(identifier).map(Vec::as_slice)
    }

    /// Identifiers in ascending order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.trajectories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SpacetimePoint])> {
        self.trajectories
            .iter()
            .map(|(uid, points)| (uid.as_str(), points.as_slice()))
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.trajectories.values().map(Vec::len).sum()
    }
}

impl FromIterator<SpacetimePoint> for TrajectoryStore {
    fn from_iter<I: IntoIterator<Item = SpacetimePoint>>(iter: I) -> Self {
        let mut store = TrajectoryStore::new();
        store.extend(iter);
        store
    }
}

impl Extend<SpacetimePoint> for TrajectoryStore {
    fn extend<I: IntoIterator<Item = SpacetimePoint>>(&mut self, iter: I) {
        for point in iter {
            self.push(point);
        }
    }
}
