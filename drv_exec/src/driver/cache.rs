//! Per-tick cached view of the car

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use sim_if::{telemetry::CarTelemetry, track::TrackSegment};
use util::maths::norm_pi_pi;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Quantities derived from the telemetry at the start of each tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct VehicleCache {
    /// Angle from the car's heading to the track tangent, in (-pi, pi]. Positive when the track
    /// heads to the left of the car.
    ///
    /// Units: radians
    pub heading_err_rad: f64,

    /// Mass of the car plus the fuel on board.
    ///
    /// Units: kilograms
    pub mass_kg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VehicleCache {
    /// Derive the cache for this tick.
    ///
    /// `segment` must be the segment the car is currently on.
    pub fn update(telemetry: &CarTelemetry, segment: &TrackSegment, car_mass_kg: f64) -> Self {
        let track_angle_rad = segment.tangent_angle_rad(telemetry.track_pos.to_start);

        Self {
            heading_err_rad: norm_pi_pi(track_angle_rad - telemetry.yaw_rad),
            mass_kg: car_mass_kg + telemetry.fuel_kg,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::driver::test_fixtures::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_update() {
        let track = oval_track();

        let mut tm = telemetry_on(0, 10.0, 30.0);
        tm.yaw_rad = 0.25;
        tm.fuel_kg = 60.0;

        let cache = VehicleCache::update(&tm, &track.segments[0], 1000.0);
        assert!((cache.heading_err_rad + 0.25).abs() < 1e-12);
        assert_eq!(cache.mass_kg, 1060.0);

        // Halfway round the first turn the tangent has swung left by 90 degrees
        let mut tm = telemetry_on(1, FRAC_PI_2, 20.0);
        tm.yaw_rad = FRAC_PI_2 - 0.1;
        let cache = VehicleCache::update(&tm, &track.segments[1], 1000.0);
        assert!((cache.heading_err_rad - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_heading_error_wraps() {
        let track = oval_track();

        // Track tangent at pi, car yawed to -pi + 0.1, so the true error is -0.1
        let mut tm = telemetry_on(2, 10.0, 20.0);
        tm.yaw_rad = -PI + 0.1;

        let cache = VehicleCache::update(&tm, &track.segments[2], 1000.0);
        assert!((cache.heading_err_rad + 0.1).abs() < 1e-9);
    }
}
