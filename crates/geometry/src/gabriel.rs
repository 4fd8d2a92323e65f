//! Gabriel graph construction on top of a Delaunay triangulation.
//!
//! A Delaunay edge `ab` belongs to the Gabriel graph iff the closed disk with
//! diameter `ab` holds no other input point. For Delaunay edges it suffices to
//! test the (at most two) vertices opposite `ab` in its adjacent triangles;
//! this is the same condition as "the edge crosses its dual Voronoi edge".
//!
//! ```text
//!   points ──► distinct coordinates ──► power-of-two rescale ──► spade Delaunay
//!                                                                      │
//!   sorted + deduplicated ◄── map back to ◄── keep if both opposite ◄──┘
//!   edge list                 input coords    vertices lie outside
//!                                             the diametral disk
//! ```

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use spade::{DelaunayTriangulation, Point2, Triangulation, MIN_ALLOWED_VALUE};
use tracing::debug;

use crate::error::GeometryError;
use crate::point::{PlanarPoint, PointKey};

/// Undirected edge of a proximity graph.
///
/// Constructed through [`GabrielEdge::new`], which orients the edge so that
/// `start` precedes `end` lexicographically; `(a, b)` and `(b, a)` are the
/// same edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GabrielEdge {
    pub start: PlanarPoint,
    pub end: PlanarPoint,
}

impl GabrielEdge {
    pub fn new(a: PlanarPoint, b: PlanarPoint) -> Self {
        if b.lex_cmp(&a).is_lt() {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Source of Gabriel-graph edges for a planar point set.
///
/// Implementations must be deterministic for a fixed input and return each
/// undirected edge once, sorted by `(start, end)`. Endpoints are coordinates
/// taken from the input; callers map them back by coordinate identity.
pub trait ProximityGraph: Send + Sync {
    fn gabriel_edges(&self, points: &[PlanarPoint]) -> Result<Vec<GabrielEdge>, GeometryError>;
}

/// [`ProximityGraph`] backed by `spade`'s Delaunay triangulation.
///
/// Coincident input coordinates collapse into a single vertex, so the edge
/// list is over distinct coordinates only. Any finite coordinate is accepted:
/// the point set is rescaled into spade's supported magnitude range first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunayGabriel {
    use_parallel: bool,
}

impl DelaunayGabriel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify Delaunay edges on the rayon pool. Output is identical to the
    /// sequential path.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn use_parallel(&self) -> bool {
        self.use_parallel
    }
}

impl ProximityGraph for DelaunayGabriel {
    fn gabriel_edges(&self, points: &[PlanarPoint]) -> Result<Vec<GabrielEdge>, GeometryError> {
        let start = Instant::now();

        let distinct = distinct_points(points)?;
        if distinct.len() < 2 {
            return Ok(Vec::new());
        }
        let cloud = ScaledCloud::new(&distinct);

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        for p in &cloud.vertices {
            triangulation
                .insert(Point2::new(p.x, p.y))
                .map_err(|err| GeometryError::Triangulation(format!("{err:?} at ({}, {})", p.x, p.y)))?;
        }

        let witnesses: Vec<EdgeWitness> = triangulation
            .undirected_edges()
            .filter_map(|edge| {
                let [a, b] = edge.vertices();
                let directed = edge.as_directed();
                let (a, b) = (planar(a.position()), planar(b.position()));
                Some(EdgeWitness {
                    a,
                    b,
                    ends: [cloud.vertex_of(&a)?, cloud.vertex_of(&b)?],
                    opposite: [
                        directed.opposite_vertex().map(|v| planar(v.position())),
                        directed.rev().opposite_vertex().map(|v| planar(v.position())),
                    ],
                })
            })
            .collect();

        let mut edges: Vec<GabrielEdge> = if self.use_parallel {
            witnesses
                .par_iter()
                .filter(|w| w.is_gabriel())
                .flat_map_iter(|w| cloud.fan_out(w.ends))
                .collect()
        } else {
            witnesses
                .iter()
                .filter(|w| w.is_gabriel())
                .flat_map(|w| cloud.fan_out(w.ends))
                .collect()
        };
        edges.extend(cloud.cluster_edges());

        edges.sort_by(|l, r| l.start.lex_cmp(&r.start).then_with(|| l.end.lex_cmp(&r.end)));
        edges.dedup_by(|l, r| l.start.key() == r.start.key() && l.end.key() == r.end.key());

        debug!(
            points = points.len(),
            distinct = distinct.len(),
            vertices = cloud.vertices.len(),
            scale_exponent = cloud.exponent,
            delaunay_edges = witnesses.len(),
            gabriel_edges = edges.len(),
            parallel = self.use_parallel,
            elapsed_micros = start.elapsed().as_micros(),
            "gabriel_graph_built"
        );

        Ok(edges)
    }
}

/// A Delaunay edge plus the vertices opposite it in its adjacent triangles.
struct EdgeWitness {
    a: PlanarPoint,
    b: PlanarPoint,
    ends: [usize; 2],
    opposite: [Option<PlanarPoint>; 2],
}

impl EdgeWitness {
    /// `w` lies in the closed diametral disk of `ab` iff angle `awb >= 90°`,
    /// i.e. `(a - w) · (b - w) <= 0`.
    fn is_gabriel(&self) -> bool {
        self.opposite.iter().flatten().all(|w| {
            let dot = (self.a.x - w.x) * (self.b.x - w.x) + (self.a.y - w.y) * (self.b.y - w.y);
            dot > 0.0
        })
    }
}

/// Distinct input coordinates rescaled into the range spade accepts.
///
/// Scaling is by a power of two, which is exact and leaves every
/// orientation, in-circle and diametral-disk test unchanged. Values still
/// below `MIN_ALLOWED_VALUE` afterwards are flushed to zero, so inputs that
/// differ only at that scale share one vertex (a cluster). Every pair inside
/// a cluster is reported as an edge and edges leaving a cluster fan out to
/// all of its members. Emitted edges always carry the input coordinates.
struct ScaledCloud {
    exponent: i32,
    vertices: Vec<PlanarPoint>,
    members: Vec<Vec<PlanarPoint>>,
    index: HashMap<PointKey, usize>,
}

impl ScaledCloud {
    fn new(distinct: &[PlanarPoint]) -> Self {
        let exponent = scale_exponent(distinct);
        let mut cloud = Self {
            exponent,
            vertices: Vec::with_capacity(distinct.len()),
            members: Vec::with_capacity(distinct.len()),
            index: HashMap::with_capacity(distinct.len()),
        };
        for p in distinct {
            let scaled = PlanarPoint::new(rescale(p.x, exponent), rescale(p.y, exponent));
            match cloud.index.entry(scaled.key()) {
                Entry::Occupied(slot) => cloud.members[*slot.get()].push(*p),
                Entry::Vacant(slot) => {
                    slot.insert(cloud.vertices.len());
                    cloud.vertices.push(scaled);
                    cloud.members.push(vec![*p]);
                }
            }
        }
        cloud
    }

    fn vertex_of(&self, scaled: &PlanarPoint) -> Option<usize> {
        self.index.get(&scaled.key()).copied()
    }

    fn fan_out(&self, [u, v]: [usize; 2]) -> Vec<GabrielEdge> {
        self.members[u]
            .iter()
            .flat_map(|a| self.members[v].iter().map(move |b| GabrielEdge::new(*a, *b)))
            .collect()
    }

    fn cluster_edges(&self) -> impl Iterator<Item = GabrielEdge> + '_ {
        self.members.iter().filter(|m| m.len() > 1).flat_map(|m| {
            m.iter()
                .enumerate()
                .flat_map(move |(n, a)| m[n + 1..].iter().map(move |b| GabrielEdge::new(*a, *b)))
        })
    }
}

/// Power of two bringing the largest magnitude just under `MAX_ALLOWED_VALUE` (2^201).
fn scale_exponent(points: &[PlanarPoint]) -> i32 {
    let largest = points
        .iter()
        .flat_map(|p| [p.x.abs(), p.y.abs()])
        .fold(0.0_f64, f64::max);
    if largest == 0.0 {
        return 0;
    }
    199 - largest.log2().floor() as i32
}

fn rescale(value: f64, exponent: i32) -> f64 {
    let mut scaled = value;
    let mut remaining = exponent;
    while remaining != 0 {
        let step = remaining.clamp(-512, 512);
        scaled *= 2.0_f64.powi(step);
        remaining -= step;
    }
    if scaled.abs() < MIN_ALLOWED_VALUE {
        0.0
    } else {
        scaled
    }
}

fn planar(p: Point2<f64>) -> PlanarPoint {
    PlanarPoint::new(p.x, p.y)
}

/// Unique coordinates in first-seen order; rejects NaN and infinities.
fn distinct_points(points: &[PlanarPoint]) -> Result<Vec<PlanarPoint>, GeometryError> {
    let mut seen: HashSet<PointKey> = HashSet::with_capacity(points.len());
    let mut out = Vec::with_capacity(points.len());
    for p in points {
        if !p.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate { x: p.x, y: p.y });
        }
        if seen.insert(p.key()) {
            out.push(*p);
        }
    }
    Ok(out)
}
