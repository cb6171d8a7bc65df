//! Speed governor
//!
//! The allowed speed through a segment is the speed at which the centripetal force needed to
//! follow the segment equals the lateral friction available from the surface.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use sim_if::track::{SegmentKind, TrackSegment};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Maximum speed the car can hold through the segment.
///
/// Straights impose no limit and return `f64::MAX`.
///
/// Units: meters/second
pub fn allowed_speed_ms(segment: &TrackSegment, gravity_mss: f64) -> f64 {
    match segment.kind {
        SegmentKind::Straight { .. } => f64::MAX,
        SegmentKind::Turn { radius_m, .. } => {
            (segment.friction * gravity_mss * radius_m).max(0.0).sqrt()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sim_if::track::TurnDirection;

    fn turn(friction: f64, radius_m: f64) -> TrackSegment {
        TrackSegment {
            kind: SegmentKind::Turn {
                direction: TurnDirection::Left,
                arc_rad: 1.0,
                radius_m,
            },
            width_m: 10.0,
            friction,
            start_angle_rad: 0.0,
            next: Some(0),
        }
    }

    #[test]
    fn test_straight_is_unbounded() {
        let seg = TrackSegment {
            kind: SegmentKind::Straight { length_m: 100.0 },
            ..turn(1.0, 1.0)
        };

        assert_eq!(allowed_speed_ms(&seg, 9.81), f64::MAX);
    }

    #[test]
    fn test_turn() {
        let v = allowed_speed_ms(&turn(0.9, 50.0), 9.81);
        assert!((v - 21.0).abs() < 0.05, "{}", v);
        assert!((v - (0.9f64 * 9.81 * 50.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_in_friction_and_radius() {
        let mut prev = 0.0;
        for i in 0..=20 {
            let v = allowed_speed_ms(&turn(i as f64 * 0.1, 40.0), 9.81);
            assert!(v >= prev);
            prev = v;
        }

        let mut prev = 0.0;
        for i in 0..=20 {
            let v = allowed_speed_ms(&turn(1.1, i as f64 * 10.0), 9.81);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_zero_only_without_grip_or_radius() {
        assert_eq!(allowed_speed_ms(&turn(0.0, 40.0), 9.81), 0.0);
        assert_eq!(allowed_speed_ms(&turn(1.0, 0.0), 9.81), 0.0);
        assert!(allowed_speed_ms(&turn(0.01, 0.5), 9.81) > 0.0);
    }
}
