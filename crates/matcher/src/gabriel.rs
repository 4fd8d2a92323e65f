use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use geometry::{DelaunayGabriel, GabrielEdge, PlanarPoint, PointKey, ProximityGraph};
use ingest::SpacetimePoint;
use rayon::prelude::*;
use tracing::debug;

use crate::engine::TrajectoryMatcher;
use crate::types::{point_distance, Intersection, MatchError, MatchThresholds};


/// Proximity-graph strategy.
///
/// Both trajectories are pooled into one planar point set and only pairs
/// joined by a Gabriel edge (or sharing coordinates) are examined. Among the
/// qualifying cross-trajectory pairs the closest wins; ties go to the lower
/// index in `one`, then the lower index in `two`.
///
/// Only neighbours in the Gabriel graph are candidates, so a qualifying pair
/// separated by a third point may be missed. The globally closest
/// cross-trajectory pair is always a Gabriel edge, so whenever that pair
/// qualifies a meeting is reported.
#[derive(Clone)]
pub struct GabrielMatcher {
    graph: Arc<dyn ProximityGraph>,
    use_parallel: bool,
}

impl std::fmt::Debug for GabrielMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GabrielMatcher")
            .field("use_parallel", &self.use_parallel)
            .finish_non_exhaustive()
    }
}

impl Default for GabrielMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Candidate pair as indices into `one` and `two`.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    one: usize,
    two: usize,
}

impl Candidate {
    fn order(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.one.cmp(&other.one))
            .then(self.two.cmp(&other.two))
    }
}

impl GabrielMatcher {
    pub const NAME: &'static str = "gabriel";

    /// Backed by the Delaunay-derived Gabriel graph.
    pub fn new() -> Self {
        Self::with_graph(Arc::new(DelaunayGabriel::new()))
    }

    /// Use a custom proximity graph.
    pub fn with_graph(graph: Arc<dyn ProximityGraph>) -> Self {
        Self {
            graph,
            use_parallel: false,
        }
    }

    /// Filter candidates with rayon. Has no effect on the result.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    fn best_candidate(
        &self,
        one: &[SpacetimePoint],
        two: &[SpacetimePoint],
        edges: &[GabrielEdge],
        owners: &HashMap<PointKey, Vec<usize>>,
        thresholds: &MatchThresholds,
    ) -> Option<Candidate> {
        let split = one.len();
        let pair_candidate = |i: usize, j: usize| -> Option<Candidate> {
            // orient: `a` indexes `one`, `b` indexes `two`
            let (a, b) = match (i < split, j < split) {
                (true, false) => (i, j - split),
                (false, true) => (j, i - split),
                _ => return None,
            };
            let (p, q) = (&one[a], &two[b]);
            thresholds.admits(p, q).then(|| Candidate {
                distance: point_distance(p, q),
                one: a,
                two: b,
            })
        };
        let edge_candidates = |edge: &GabrielEdge| -> Vec<Candidate> {
            if edge.length() > thresholds.spatial_epsilon() {
                return Vec::new();
            }
            let (Some(starts), Some(ends)) = (owners.get(&edge.start.key()), owners.get(&edge.end.key()))
            else {
                return Vec::new();
            };
            starts
                .iter()
                .flat_map(|&i| ends.iter().filter_map(move |&j| pair_candidate(i, j)))
                .collect()
        };
        // points sharing exact coordinates collapse into one graph vertex
        let coincident_candidates = |group: &Vec<usize>| -> Vec<Candidate> {
            group
                .iter()
                .enumerate()
                .flat_map(|(n, &i)| group[n + 1..].iter().filter_map(move |&j| pair_candidate(i, j)))
                .collect()
        };

        let by_order = |a: &Candidate, b: &Candidate| a.order(b);
        if self.use_parallel {
            let from_edges = edges
                .par_iter()
                .flat_map_iter(edge_candidates)
                .min_by(by_order);
            let from_groups = owners
                .par_iter()
                .filter(|(_, group)| group.len() > 1)
                .flat_map_iter(|(_, group)| coincident_candidates(group))
                .min_by(by_order);
            from_edges.into_iter().chain(from_groups).min_by(by_order)
        } else {
            edges
                .iter()
                .flat_map(edge_candidates)
                .chain(
                    owners
                        .values()
                        .filter(|group| group.len() > 1)
                        .flat_map(coincident_candidates),
                )
                .min_by(by_order)
        }
    }
}

impl TrajectoryMatcher for GabrielMatcher {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn search(
        &self,
        one: &[SpacetimePoint],
        two: &[SpacetimePoint],
        thresholds: &MatchThresholds,
    ) -> Result<Option<Intersection>, MatchError> {
        let all: Vec<PlanarPoint> = one
            .iter()
            .chain(two)
            .map(|p| PlanarPoint::new(p.x(), p.y()))
            .collect();

        // NaN and infinite positions never satisfy the spatial threshold
        let finite: Vec<PlanarPoint> = all
            .iter()
            .copied()
            .filter(PlanarPoint::is_finite)
            .collect();
        let edges = self.graph.gabriel_edges(&finite)?;

        let mut owners: HashMap<PointKey, Vec<usize>> = HashMap::with_capacity(all.len());
        for (idx, point) in all.iter().enumerate() {
            owners.entry(point.key()).or_default().push(idx);
        }

        debug!(
            points = all.len(),
            non_finite = all.len() - finite.len(),
            distinct = owners.len(),
            edges = edges.len(),
            "gabriel_candidates_prepared"
        );

        Ok(self
            .best_candidate(one, two, &edges, &owners, thresholds)
            .map(|c| Intersection::new(one[c.one].clone(), two[c.two].clone())))
    }
}
