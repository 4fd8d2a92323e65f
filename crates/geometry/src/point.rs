use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Planar Euclidean distance between `(x1, y1)` and `(x2, y2)`.
///
/// Both matchers go through this function so that a pair accepted by one
/// strategy is measured identically by the other.
#[inline]
pub fn euclidean_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}

/// A position on a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(&self, other: &PlanarPoint) -> f64 {
        euclidean_distance(self.x, self.y, other.x, other.y)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Exact coordinate identity key for this point.
    #[inline]
    pub fn key(&self) -> PointKey {
        PointKey::from(*self)
    }

    /// Lexicographic `(x, y)` order using IEEE total ordering.
    pub(crate) fn lex_cmp(&self, other: &PlanarPoint) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// Hashable, bit-exact identity of a planar coordinate.
///
/// Two points share a key iff their coordinates compare equal with `==`,
/// so `-0.0` and `0.0` map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(u64, u64);

impl From<PlanarPoint> for PointKey {
    fn from(p: PlanarPoint) -> Self {
        PointKey(canonical_bits(p.x), canonical_bits(p.y))
    }
}

#[inline]
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}
