//! # trajmeet matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` answers one question: did two identifiers ever stand within
//! `spatial_epsilon` of each other, on the same floor, within
//! `temporal_epsilon` seconds? It returns at most one such meeting.
//!
//! ## Core Types
//!
//! - [`MatchThresholds`]: validated spatial (metres, > 0) and temporal
//!   (whole seconds) tolerances. Both bounds are inclusive.
//! - [`Intersection`]: the meeting, oriented so `point_one` belongs to the
//!   first trajectory, with the distance computed once.
//! - [`TrajectoryMatcher`]: the strategy trait. `identify` runs the
//!   validation gate ([`check_gate`]) then the strategy's `search`.
//! - [`BruteForceMatcher`]: exhaustive row-major scan; the first qualifying
//!   pair in input order wins.
//! - [`GabrielMatcher`]: restricts candidates to Gabriel-graph neighbours of
//!   the pooled point set; the closest qualifying pair wins.
//! - [`MatcherRegistry`]: resolves user-supplied algorithm names.
//!
//! ## Example Usage
//!
//! ```
//! use chrono::DateTime;
//! use ingest::SpacetimePoint;
//! use matcher::{MatchThresholds, MatcherRegistry};
//!
//! let t = DateTime::parse_from_rfc3339("2017-07-18T09:00:00+03:00").unwrap();
//! let p = [SpacetimePoint::new("P", t, 0.0, 0.0, 1)];
//! let q = [SpacetimePoint::new("Q", t + chrono::Duration::seconds(20), 3.0, 0.0, 1)];
//!
//! let registry = MatcherRegistry::with_defaults();
//! let thresholds = MatchThresholds::new(3.7, 30).unwrap();
//!
//! for name in registry.available() {
//!     let matcher = registry.resolve(&name).unwrap();
//!     let hit = matcher.identify(Some(&p), Some(&q), &thresholds).unwrap().unwrap();
//!     assert_eq!(hit.distance(), 3.0);
//!     assert_eq!(hit.time_gap_seconds(), 20);
//! }
//! ```
//!
//! ## Observability
//!
//! Every `identify` call opens a `matcher.identify` span and logs one of
//! `match_rejected`, `match_found`, `match_not_found` or `match_failure`.
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-call latency and outcome.

mod brute;
mod engine;
mod gabriel;
pub mod metrics;
mod registry;
mod types;
mod validate;

pub use crate::brute::BruteForceMatcher;
pub use crate::engine::TrajectoryMatcher;
pub use crate::gabriel::GabrielMatcher;
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::registry::MatcherRegistry;
pub use crate::types::{Intersection, MatchError, MatchThresholds};
pub use crate::validate::{check_gate, GateRejection};
