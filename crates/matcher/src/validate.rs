//! Preconditions every strategy checks before doing any geometry.
//!
//! A rejection is not an error: `identify` turns it into "no intersection".
use std::fmt;

use ingest::SpacetimePoint;

/// Why a pair of trajectories cannot possibly intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// One side was not supplied at all.
    Missing,
    /// One side has no points.
    Empty,
    /// Both sides belong to the same identifier.
    SameIdentifier,
    /// Each side stays on one floor and the floors differ.
    DisjointFloors { one: i32, two: i32 },
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateRejection::Missing => write!(f, "trajectory missing"),
            GateRejection::Empty => write!(f, "trajectory empty"),
            GateRejection::SameIdentifier => write!(f, "both trajectories have the same identifier"),
            GateRejection::DisjointFloors { one, two } => {
                write!(f, "trajectories confined to different floors ({one} vs {two})")
            }
        }
    }
}

/// Run the emptiness, identity and floor-disjointness checks in that order.
///
/// On success both sides are returned as non-empty slices.
///
/// ```rust
/// use chrono::DateTime;
/// use ingest::SpacetimePoint;
/// use matcher::{check_gate, GateRejection};
///
/// let t = DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z").unwrap();
/// let a = [SpacetimePoint::new("a", t, 0.0, 0.0, 1)];
/// let b = [SpacetimePoint::new("b", t, 0.0, 0.0, 2)];
///
/// assert_eq!(check_gate(Some(&a), None), Err(GateRejection::Missing));
/// assert_eq!(check_gate(Some(&a), Some(&a)), Err(GateRejection::SameIdentifier));
/// assert_eq!(
///     check_gate(Some(&a), Some(&b)),
///     Err(GateRejection::DisjointFloors { one: 1, two: 2 })
/// );
/// ```
pub fn check_gate<'a>(
    one: Option<&'a [SpacetimePoint]>,
    two: Option<&'a [SpacetimePoint]>,
) -> Result<(&'a [SpacetimePoint], &'a [SpacetimePoint]), GateRejection> {
    let (one, two) = match (one, two) {
        (Some(one), Some(two)) => (one, two),
        _ => return Err(GateRejection::Missing),
    };
    let (first_one, first_two) = match (one.first(), two.first()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(GateRejection::Empty),
    };

    if first_one.identifier() == first_two.identifier() {
        return Err(GateRejection::SameIdentifier);
    }

    if let (Some(floor_one), Some(floor_two)) = (single_floor(one), single_floor(two)) {
        if floor_one != floor_two {
            return Err(GateRejection::DisjointFloors {
                one: floor_one,
                two: floor_two,
            });
        }
    }

    Ok((one, two))
}

/// The only floor visited, if the trajectory never changes floor.
fn single_floor(points: &[SpacetimePoint]) -> Option<i32> {
    let first = points.first()?.floor();
    points
        .iter()
        .all(|p| p.floor() == first)
        .then_some(first)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};

    use super::*;

    fn point(uid: &str, secs: i64, floor: i32) -> SpacetimePoint {
        let base = DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z").unwrap();
        SpacetimePoint::new(uid, base + Duration::seconds(secs), 0.0, 0.0, floor)
    }

    #[test]
    fn missing_and_empty_rejected() {
        let a = vec![point("a", 0, 1)];
        assert_eq!(check_gate(None, Some(&a)), Err(GateRejection::Missing));
        assert_eq!(check_gate(None, None), Err(GateRejection::Missing));
        assert_eq!(check_gate(Some(&[]), Some(&a)), Err(GateRejection::Empty));
        assert_eq!(check_gate(Some(&a), Some(&[])), Err(GateRejection::Empty));
    }

    #[test]
    fn same_identifier_rejected_even_with_distinct_slices() {
        let a1 = vec![point("a", 0, 1)];
        let a2 = vec![point("a", 50, 1), point("a", 60, 1)];
        assert_eq!(
            check_gate(Some(&a1), Some(&a2)),
            Err(GateRejection::SameIdentifier)
        );
    }

    #[test]
    fn floor_disjointness_needs_both_sides_single_floor() {
        let one = vec![point("a", 0, 1), point("a", 1, 1)];
        let two = vec![point("b", 0, 2)];
        assert_eq!(
            check_gate(Some(&one), Some(&two)),
            Err(GateRejection::DisjointFloors { one: 1, two: 2 })
        );

        let multi = vec![point("b", 0, 2), point("b", 1, 3)];
        assert!(check_gate(Some(&one), Some(&multi)).is_ok());
        assert!(check_gate(Some(&multi), Some(&one)).is_ok());
    }

    #[test]
    fn same_single_floor_passes() {
        let one = vec![point("a", 0, 4)];
        let two = vec![point("b", 0, 4)];
        let (l, r) = check_gate(Some(&one), Some(&two)).unwrap();
        assert_eq!(l.len(), 1);
        assert_eq!(r[0].identifier(), "b");
    }

    #[test]
    fn rejection_messages() {
        assert!(GateRejection::DisjointFloors { one: 1, two: 2 }
            .to_string()
            .contains("1 vs 2"));
        assert_eq!(GateRejection::Empty.to_string(), "trajectory empty");
    }
}
