//! Gear selection calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use sim_if::{ctrl::NEUTRAL_GEAR, telemetry::{CarTelemetry, WheelId}};

use super::*;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Driver {
    /// Select the gear for the next tick.
    ///
    /// Shifts up once the car is faster than a fraction of the redline speed in the current gear,
    /// and down once the next lower gear could reach the current speed with margin to spare. The
    /// gear only ever moves by one step per tick. From neutral or reverse the car always selects
    /// first gear.
    pub(crate) fn calc_gear(
        &self,
        telemetry: &CarTelemetry,
        car: &CarParams,
    ) -> Result<i32, DriverError> {
        let gear = telemetry.gear;

        if gear <= NEUTRAL_GEAR {
            return Ok(1);
        }

        let wheel_radius_m = telemetry.wheel(WheelId::RearRight).radius_m;
        let shift_speed_ms = |ratio: f64| {
            car.config.redline_rads / ratio * wheel_radius_m * self.params.shift_fraction
        };

        if shift_speed_ms(car.gear_ratio(gear)?) < telemetry.speed_x_ms {
            if gear < car.config.top_gear() {
                return Ok(gear + 1);
            }
        }
        else if gear > 1
            && shift_speed_ms(car.gear_ratio(gear - 1)?)
                > telemetry.speed_x_ms + self.params.shift_margin_ms
        {
            return Ok(gear - 1);
        }

        Ok(gear)
    }
}
