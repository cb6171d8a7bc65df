//! Brake calculations
//!
//! The braking predictor looks ahead along the track for a segment the car can't enter at its
//! current speed, and starts braking as soon as the distance needed to slow down for it is more
//! than the distance left to reach it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use sim_if::{telemetry::CarTelemetry, track::Track};

use super::*;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Driver {
    /// Decide whether to brake this tick. The result is either 0 or 1, there is no partial
    /// braking.
    ///
    /// The look ahead covers the distance needed to stop from the current speed with friction
    /// alone. Within it the braking distance to each slower segment accounts for aerodynamic drag
    /// and downforce at the target speed. Scanning stops early once every segment of the track has
    /// been considered, since seeing a segment again only adds distance before it.
    pub(crate) fn calc_brake(
        &self,
        telemetry: &CarTelemetry,
        track: &Track,
        car: &CarParams,
    ) -> Result<f64, DriverError> {
        let g = self.params.gravity_mss;
        let mass_kg = self.cache.mass_kg;
        let aero = car.aero;

        let mut seg_id = telemetry.track_pos.seg_id;
        let segment = track.segment(seg_id)?;

        let speed_ms = telemetry.speed_x_ms;
        let speed_sqr = speed_ms * speed_ms;
        let mu = segment.friction;

        // Distance to check, the stopping distance with no drag
        let max_lookahead_m = speed_sqr / (2.0 * mu * g);

        // Distance already checked
        let mut lookahead_m = segment.dist_to_end_m(telemetry.track_pos.to_start);

        if allowed_speed_ms(segment, g) < speed_ms {
            return Ok(1.0);
        }

        let mut num_scanned = 0;

        while lookahead_m < max_lookahead_m && num_scanned < track.len() {
            seg_id = track.next_of(seg_id)?;
            let segment = track.segment(seg_id)?;

            let allowed_ms = allowed_speed_ms(segment, g);

            if allowed_ms < speed_ms {
                let allowed_sqr = allowed_ms * allowed_ms;
                let brake_dist_m = mass_kg * (speed_sqr - allowed_sqr)
                    / (2.0 * (mu * g * mass_kg + allowed_sqr * (aero.ca * mu + aero.cw)));

                if brake_dist_m > lookahead_m {
                    debug!(
                        "Braking for segment {}: need {:.1} m to reach {:.1} m/s, {:.1} m left",
                        seg_id, brake_dist_m, allowed_ms, lookahead_m
                    );
                    return Ok(1.0);
                }
            }

            lookahead_m += segment.length_m();
            num_scanned += 1;
        }

        Ok(0.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::driver::test_fixtures::*;
    use sim_if::track::{SegmentKind, TrackError, TrackSegment};

    fn brake(driver: &Driver, tm: &CarTelemetry, track: &Track) -> Result<f64, DriverError> {
        driver.calc_brake(tm, track, driver.car.as_ref().unwrap())
    }

    fn race_driver_with_mass(mass_kg: f64) -> Driver {
        let mut driver = race_driver();
        driver.cache.mass_kg = mass_kg;
        driver
    }

    #[test]
    fn test_brakes_when_too_fast_for_current_segment() {
        let driver = race_driver_with_mass(1000.0);
        let track = oval_track();

        let tm = telemetry_on(1, 0.2, 25.0);
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 1.0);

        let tm = telemetry_on(1, 0.2, 20.0);
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 0.0);
    }

    #[test]
    fn test_brakes_for_upcoming_turn() {
        let driver = race_driver_with_mass(1000.0);
        let track = oval_track();

        // Slowing from 40 m/s to 21 m/s takes about 59 m with no aero, 10 m left to the turn
        let tm = telemetry_on(0, 190.0, 40.0);
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 1.0);

        // 70 m left, inside the look ahead but far enough away
        let tm = telemetry_on(0, 130.0, 40.0);
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 0.0);

        // 150 m left is beyond the 81.5 m look ahead
        let tm = telemetry_on(0, 50.0, 40.0);
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 0.0);
    }

    #[test]
    fn test_drag_shortens_braking_distance() {
        let mut driver = race_driver_with_mass(1000.0);
        let track = oval_track();
        let tm = telemetry_on(0, 143.0, 40.0);

        assert_eq!(brake(&driver, &tm, &track).unwrap(), 1.0);

        driver.car.as_mut().unwrap().aero = AeroCoeffs { ca: 0.0, cw: 2.0 };
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 0.0);
    }

    #[test]
    fn test_idempotent() {
        let driver = race_driver_with_mass(1000.0);
        let track = oval_track();

        for to_start in [0.0, 50.0, 120.0, 150.0, 199.0].iter() {
            for speed in [5.0, 25.0, 40.0, 70.0].iter() {
                let tm = telemetry_on(0, *to_start, *speed);
                let first = brake(&driver, &tm, &track).unwrap();
                assert_eq!(brake(&driver, &tm, &track).unwrap(), first);
                assert!(first == 0.0 || first == 1.0);
            }
        }
    }

    #[test]
    fn test_never_brakes_when_reversing() {
        let driver = race_driver_with_mass(1000.0);
        let track = oval_track();

        let tm = telemetry_on(1, 0.2, -3.0);
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 0.0);
    }

    #[test]
    fn test_broken_chain_is_an_error() {
        let driver = race_driver_with_mass(1000.0);
        let mut track = oval_track();
        track.segments[0].next = None;

        // Look ahead reaches past the end of the straight
        let tm = telemetry_on(0, 190.0, 40.0);
        assert!(matches!(
            brake(&driver, &tm, &track),
            Err(DriverError::Track(TrackError::BrokenChain(0)))
        ));

        // Look ahead satisfied before the broken link is needed
        let tm = telemetry_on(0, 50.0, 40.0);
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 0.0);
    }

    #[test]
    fn test_terminates_without_grip() {
        let driver = race_driver_with_mass(1000.0);

        // Zero friction gives an infinite look ahead around a loop of straights
        let straight = |next| TrackSegment {
            kind: SegmentKind::Straight { length_m: 100.0 },
            width_m: 10.0,
            friction: 0.0,
            start_angle_rad: 0.0,
            next: Some(next),
        };
        let track = Track::new("ice", vec![straight(1), straight(0)]);

        let tm = telemetry_on(0, 10.0, 30.0);
        assert_eq!(brake(&driver, &tm, &track).unwrap(), 0.0);
    }
}
