//! Accelerator calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use sim_if::{
    telemetry::{CarTelemetry, WheelId},
    track::TrackSegment,
};

use super::*;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Driver {
    /// Calculate the accelerator demand on the current segment.
    ///
    /// Well below the allowed speed the car accelerates flat out. Otherwise the throttle is set to
    /// the fraction of the redline that would hold the allowed speed in the current gear, rather
    /// than accelerating any further.
    pub(crate) fn calc_accel(
        &self,
        telemetry: &CarTelemetry,
        segment: &TrackSegment,
        car: &CarParams,
    ) -> Result<f64, DriverError> {
        let allowed_speed_ms = allowed_speed_ms(segment, self.params.gravity_mss);

        if allowed_speed_ms > telemetry.speed_x_ms + self.params.full_accel_margin_ms {
            return Ok(1.0);
        }

        let gear_ratio = car.gear_ratio(telemetry.gear)?;
        let wheel_radius_m = telemetry.wheel(WheelId::RearRight).radius_m;

        Ok(allowed_speed_ms / wheel_radius_m * gear_ratio / car.config.redline_rads)
    }
}
