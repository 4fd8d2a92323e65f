//! Reference scenarios run against every registered strategy.

use chrono::{DateTime, Duration, FixedOffset};
use trajmeet::{MatchError, MatchThresholds, MatcherRegistry, SpacetimePoint};

fn t0() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2017-07-18T09:00:00+03:00").unwrap()
}

fn point(uid: &str, secs: i64, x: f64, y: f64, floor: i32) -> SpacetimePoint {
    SpacetimePoint::new(uid, t0() + Duration::seconds(secs), x, y, floor)
}

fn reference_thresholds() -> MatchThresholds {
    MatchThresholds::new(3.7, 30).unwrap()
}

/// Runs `check` once per registered algorithm.
fn for_each_algorithm(check: impl Fn(&str, &MatcherRegistry)) {
    let registry = MatcherRegistry::with_defaults();
    for name in registry.available() {
        check(&name, &registry);
    }
}

fn run(
    registry: &MatcherRegistry,
    name: &str,
    one: Option<&[SpacetimePoint]>,
    two: Option<&[SpacetimePoint]>,
    thresholds: &MatchThresholds,
) -> Option<trajmeet::Intersection> {
    registry
        .resolve(name)
        .unwrap()
        .identify(one, two, thresholds)
        .unwrap()
}

#[test]
fn scenario_a_close_in_space_and_time() {
    let p = vec![point("P", 0, 0.0, 0.0, 1)];
    let q = vec![point("Q", 20, 3.0, 0.0, 1)];
    for_each_algorithm(|name, registry| {
        let hit = run(registry, name, Some(&p), Some(&q), &reference_thresholds())
            .unwrap_or_else(|| panic!("{name} found nothing"));
        assert_eq!(hit.distance(), 3.0, "{name}");
        assert_eq!(hit.time_gap_seconds(), 20, "{name}");
        assert_eq!(hit.point_one().identifier(), "P");
        assert_eq!(hit.point_two().identifier(), "Q");
        assert_eq!(hit.floor(), 1);
    });
}

#[test]
fn scenario_b_too_far_apart() {
    let p = vec![point("P", 0, 0.0, 0.0, 1)];
    let q = vec![point("Q", 20, 10.0, 0.0, 1)];
    for_each_algorithm(|name, registry| {
        assert!(run(registry, name, Some(&p), Some(&q), &reference_thresholds()).is_none(), "{name}");
    });
}

#[test]
fn scenario_c_too_late() {
    let p = vec![point("P", 0, 0.0, 0.0, 1)];
    let q = vec![point("Q", 120, 3.0, 0.0, 1)];
    for_each_algorithm(|name, registry| {
        assert!(run(registry, name, Some(&p), Some(&q), &reference_thresholds()).is_none(), "{name}");
    });
}

#[test]
fn scenario_d_other_floor() {
    let p = vec![point("P", 0, 0.0, 0.0, 1)];
    let q = vec![point("Q", 20, 3.0, 0.0, 2)];
    for_each_algorithm(|name, registry| {
        assert!(run(registry, name, Some(&p), Some(&q), &reference_thresholds()).is_none(), "{name}");
    });
}

#[test]
fn boundaries_are_inclusive() {
    let p = vec![point("P", 0, 0.0, 0.0, 1)];
    let q = vec![point("Q", 30, 3.0, 4.0, 1)];
    let exact = MatchThresholds::new(5.0, 30).unwrap();
    let tighter_space = MatchThresholds::new(4.999_999, 30).unwrap();
    let tighter_time = MatchThresholds::new(5.0, 29).unwrap();
    for_each_algorithm(|name, registry| {
        let hit = run(registry, name, Some(&p), Some(&q), &exact).unwrap();
        assert_eq!(hit.distance(), 5.0);
        assert_eq!(hit.time_gap_seconds(), 30);
        assert!(run(registry, name, Some(&p), Some(&q), &tighter_space).is_none(), "{name}");
        assert!(run(registry, name, Some(&p), Some(&q), &tighter_time).is_none(), "{name}");
    });
}

#[test]
fn time_gap_is_symmetric() {
    let p = vec![point("P", 30, 0.0, 0.0, 1)];
    let q = vec![point("Q", 0, 1.0, 0.0, 1)];
    for_each_algorithm(|name, registry| {
        let hit = run(registry, name, Some(&p), Some(&q), &reference_thresholds()).unwrap();
        assert_eq!(hit.time_gap_seconds(), 30, "{name}");
    });
}

#[test]
fn offsets_are_respected() {
    // same instant written in two offsets
    let p = vec![SpacetimePoint::new(
        "P",
        DateTime::parse_from_rfc3339("2017-07-18T09:00:00+03:00").unwrap(),
        0.0,
        0.0,
        1,
    )];
    let q = vec![SpacetimePoint::new(
        "Q",
        DateTime::parse_from_rfc3339("2017-07-18T06:00:00Z").unwrap(),
        1.0,
        0.0,
        1,
    )];
    let strict = MatchThresholds::new(2.0, 0).unwrap();
    for_each_algorithm(|name, registry| {
        assert!(run(registry, name, Some(&p), Some(&q), &strict).is_some(), "{name}");
    });
}

#[test]
fn trajectory_never_meets_itself() {
    let t = vec![point("P", 0, 0.0, 0.0, 1), point("P", 10, 1.0, 0.0, 1)];
    for_each_algorithm(|name, registry| {
        assert!(run(registry, name, Some(&t), Some(&t), &reference_thresholds()).is_none(), "{name}");
    });
}

#[test]
fn empty_or_missing_side_is_absent() {
    let t = vec![point("P", 0, 0.0, 0.0, 1)];
    for_each_algorithm(|name, registry| {
        let th = reference_thresholds();
        assert!(run(registry, name, Some(&[]), Some(&t), &th).is_none());
        assert!(run(registry, name, Some(&t), Some(&[]), &th).is_none());
        assert!(run(registry, name, None, Some(&t), &th).is_none());
        assert!(run(registry, name, Some(&t), None, &th).is_none());
    });
}

#[test]
fn single_floor_trajectories_on_different_floors_are_absent() {
    let p = vec![point("P", 0, 0.0, 0.0, 1), point("P", 5, 1.0, 0.0, 1)];
    let q = vec![point("Q", 0, 0.0, 0.0, 3), point("Q", 5, 1.0, 0.0, 3)];
    for_each_algorithm(|name, registry| {
        assert!(run(registry, name, Some(&p), Some(&q), &reference_thresholds()).is_none(), "{name}");
    });
}

#[test]
fn multi_floor_trajectories_meet_on_shared_floor() {
    let p = vec![point("P", 0, 0.0, 0.0, 1), point("P", 60, 0.0, 0.0, 2)];
    let q = vec![point("Q", 65, 1.0, 1.0, 2)];
    for_each_algorithm(|name, registry| {
        let hit = run(registry, name, Some(&p), Some(&q), &reference_thresholds()).unwrap();
        assert_eq!(hit.floor(), 2, "{name}");
        assert_eq!(hit.time_gap_seconds(), 5);
    });
}

#[test]
fn registry_resolution() {
    let registry = MatcherRegistry::with_defaults();
    assert_eq!(registry.resolve("Brute").unwrap().name(), "brute");
    assert_eq!(registry.resolve("brute-force").unwrap().name(), "brute");
    assert_eq!(registry.resolve("GABRIEL").unwrap().name(), "gabriel");
    assert!(matches!(
        registry.resolve("unknown"),
        Err(MatchError::NoSuchAlgorithm { .. })
    ));
}
