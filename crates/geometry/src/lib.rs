//! # trajmeet geometry
//!
//! Planar primitives consumed by the trajectory matchers:
//!
//! - [`euclidean_distance`] / [`PlanarPoint::distance_to`]: the single distance
//!   function every matcher uses, so results are comparable across strategies.
//! - [`ProximityGraph`]: the capability the proximity-graph matcher depends on.
//!   It returns the [Gabriel graph](https://en.wikipedia.org/wiki/Gabriel_graph)
//!   of a point set as a sorted, duplicate-free list of undirected edges.
//! - [`DelaunayGabriel`]: the production [`ProximityGraph`], built from a
//!   Delaunay triangulation computed by `spade`.
//!
//! The crate is a pure function of its inputs: no I/O, no global state, and
//! the same point set always yields the same edge list.
//!
//! ## Example
//!
//! ```
//! use geometry::{DelaunayGabriel, PlanarPoint, ProximityGraph};
//!
//! let points = [
//!     PlanarPoint::new(0.0, 0.0),
//!     PlanarPoint::new(1.0, 0.0),
//!     PlanarPoint::new(0.0, 1.0),
//!     PlanarPoint::new(1.0, 1.0),
//! ];
//!
//! let edges = DelaunayGabriel::new().gabriel_edges(&points).unwrap();
//!
//! // The four sides of the square survive, the diagonal does not.
//! assert_eq!(edges.len(), 4);
//! assert!(edges.iter().all(|e| (e.length() - 1.0).abs() < 1e-12));
//! ```

mod error;
mod gabriel;
mod point;

pub use crate::error::GeometryError;
pub use crate::gabriel::{DelaunayGabriel, GabrielEdge, ProximityGraph};
pub use crate::point::{euclidean_distance, PlanarPoint, PointKey};
