use std::time::Instant;

use ingest::SpacetimePoint;
use tracing::{info, warn, Level};

use crate::metrics::metrics_recorder;
use crate::types::{Intersection, MatchError, MatchThresholds};
use crate::validate::check_gate;

/// A strategy for finding one meeting between two trajectories.
///
/// Implementors provide [`search`](TrajectoryMatcher::search); callers use
/// [`identify`](TrajectoryMatcher::identify), which runs the validation gate
/// first and reports timing through tracing and the installed
/// [`MatchMetrics`](crate::MatchMetrics).
pub trait TrajectoryMatcher: Send + Sync {
    /// Declared name, used by the registry for lookup.
    fn name(&self) -> &str;

    /// Strategy body. Both slices are non-empty, belong to different
    /// identifiers and are not confined to two different floors.
    fn search(
        &self,
        one: &[SpacetimePoint],
        two: &[SpacetimePoint],
        thresholds: &MatchThresholds,
    ) -> Result<Option<Intersection>, MatchError>;

    /// Find one pair `(p, q)` with `p` from `one` and `q` from `two` that
    /// share a floor and lie within both thresholds.
    ///
    /// Returns `Ok(None)` when either side is missing or empty, when both
    /// sides have the same identifier, when they are confined to different
    /// floors, or when no pair qualifies.
    fn identify(
        &self,
        one: Option<&[SpacetimePoint]>,
        two: Option<&[SpacetimePoint]>,
        thresholds: &MatchThresholds,
    ) -> Result<Option<Intersection>, MatchError> {
        let algorithm = self.name();
        let span = tracing::span!(Level::INFO, "matcher.identify", algorithm);
        let _guard = span.enter();
        let start = Instant::now();

        let result = match check_gate(one, two) {
            Ok((one, two)) => self.search(one, two, thresholds),
            Err(rejection) => {
                info!(algorithm, reason = %rejection, "match_rejected");
                Ok(None)
            }
        };

        let latency = start.elapsed();
        let elapsed_micros = latency.as_micros();
        match &result {
            Ok(Some(hit)) => info!(
                algorithm,
                one = hit.point_one().identifier(),
                two = hit.point_two().identifier(),
                floor = hit.floor(),
                distance = hit.distance(),
                time_gap_seconds = hit.time_gap_seconds(),
                elapsed_micros,
                "match_found"
            ),
            Ok(None) => info!(algorithm, elapsed_micros, "match_not_found"),
            Err(err) => warn!(algorithm, error = %err, elapsed_micros, "match_failure"),
        }

        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(algorithm, latency, matches!(result, Ok(Some(_))));
        }

        result
    }
}
