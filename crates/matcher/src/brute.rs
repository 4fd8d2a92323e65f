use ingest::SpacetimePoint;
use rayon::prelude::*;

use crate::engine::TrajectoryMatcher;
use crate::types::{Intersection, MatchError, MatchThresholds};

/// Exhaustive pairwise comparison.
///
/// For each point of `one` in order, the first point of `two` in order that
/// qualifies wins. The first `one` point with any partner decides the result.
/// O(n·m) time, no extra space.
#[derive(Debug, Clone, Default)]
pub struct BruteForceMatcher {
    use_parallel: bool,
}

impl BruteForceMatcher {
    pub const NAME: &'static str = "brute";

    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `one` with rayon. The returned pair is the same as the
    /// sequential scan's.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }
}

fn first_partner<'a>(
    p: &SpacetimePoint,
    two: &'a [SpacetimePoint],
    thresholds: &MatchThresholds,
) -> Option<&'a SpacetimePoint> {
    two.iter().find(|q| thresholds.admits(p, q))
}

impl TrajectoryMatcher for BruteForceMatcher {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn search(
        &self,
        one: &[SpacetimePoint],
        two: &[SpacetimePoint],
        thresholds: &MatchThresholds,
    ) -> Result<Option<Intersection>, MatchError> {
        let pair = if self.use_parallel {
            one.par_iter()
                .find_map_first(|p| first_partner(p, two, thresholds).map(|q| (p, q)))
        } else {
            one.iter()
                .find_map(|p| first_partner(p, two, thresholds).map(|q| (p, q)))
        };

        Ok(pair.map(|(p, q)| Intersection::new(p.clone(), q.clone())))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};

    use super::*;

    fn point(uid: &str, secs: i64, x: f64, y: f64, floor: i32) -> SpacetimePoint {
        let base = DateTime::parse_from_rfc3339("2017-07-18T09:00:00+03:00").unwrap();
        SpacetimePoint::new(uid, base + Duration::seconds(secs), x, y, floor)
    }

    fn thresholds(spatial: f64, temporal: u64) -> MatchThresholds {
        MatchThresholds::new(spatial, temporal).unwrap()
    }

    #[test]
    fn row_major_first_match_wins() {
        let one = vec![
            point("a", 0, 100.0, 100.0, 1),
            point("a", 0, 0.0, 0.0, 1),
            point("a", 0, 1.0, 0.0, 1),
        ];
        let two = vec![
            point("b", 0, 2.0, 0.0, 1),
            point("b", 0, 0.5, 0.0, 1),
            point("b", 0, 1.0, 0.0, 1),
        ];
        let hit = BruteForceMatcher::new()
            .identify(Some(&one), Some(&two), &thresholds(3.0, 10))
            .unwrap()
            .unwrap();
        // (0,0) is the first `one` point with a partner; (2,0) is its first partner
        // even though (0.5,0) is closer.
        assert_eq!((hit.point_one().x(), hit.point_two().x()), (0.0, 2.0));
        assert_eq!(hit.distance(), 2.0);
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let one: Vec<_> = (0..200)
            .map(|i| point("a", i, i as f64, 0.0, 1))
            .collect();
        let two: Vec<_> = (0..200)
            .map(|i| point("b", i, 150.0 + (i as f64) * 0.1, 1.0, 1))
            .collect();
        let t = thresholds(2.0, 300);
        let seq = BruteForceMatcher::new().identify(Some(&one), Some(&two), &t).unwrap();
        let par = BruteForceMatcher::new()
            .with_parallel(true)
            .identify(Some(&one), Some(&two), &t)
            .unwrap();
        assert!(seq.is_some());
        assert_eq!(seq, par);
    }

    #[test]
    fn floor_checked_per_pair_for_multi_floor_trajectories() {
        let one = vec![point("a", 0, 0.0, 0.0, 1), point("a", 5, 0.0, 0.0, 2)];
        let two = vec![point("b", 0, 0.0, 0.0, 2), point("b", 5, 50.0, 0.0, 1)];
        let hit = BruteForceMatcher::new()
            .identify(Some(&one), Some(&two), &thresholds(1.0, 10))
            .unwrap()
            .unwrap();
        assert_eq!(hit.floor(), 2);
        assert_eq!(hit.point_one().timestamp(), one[1].timestamp());
    }

    #[test]
    fn gate_short_circuits() {
        let one = vec![point("a", 0, 0.0, 0.0, 1)];
        let t = thresholds(1.0, 10);
        let m = BruteForceMatcher::new();
        assert_eq!(m.identify(Some(&one), Some(&one), &t), Ok(None));
        assert_eq!(m.identify(None, Some(&one), &t), Ok(None));
        assert_eq!(m.identify(Some(&one), Some(&[]), &t), Ok(None));
    }
}
