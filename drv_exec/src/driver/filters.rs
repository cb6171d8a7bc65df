//! Anti-lock and traction control filters
//!
//! Both filters compare the surface speed of the wheels with the speed of the car. Below a minimum
//! speed the ratio is unstable, so the filters pass their input straight through.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::str::FromStr;

use serde::Serialize;
use sim_if::telemetry::{CarTelemetry, WheelId};

use super::{DriverError, Params};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Which wheels the engine drives.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum DrivetrainLayout {
    /// Rear wheel drive
    Rwd,
    /// Front wheel drive
    Fwd,
    /// All wheel drive
    Awd,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FromStr for DrivetrainLayout {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RWD" => Ok(DrivetrainLayout::Rwd),
            "FWD" => Ok(DrivetrainLayout::Fwd),
            "4WD" => Ok(DrivetrainLayout::Awd),
            _ => Err(DriverError::UnknownDrivetrain(String::from(s))),
        }
    }
}

impl DrivetrainLayout {
    /// Reference speed of the driven wheels' surfaces.
    ///
    /// For all wheel drive the front and rear axles are weighted equally.
    ///
    /// Units: meters/second
    pub fn driven_wheel_speed_ms(&self, telemetry: &CarTelemetry) -> f64 {
        let axle = |right: WheelId, left: WheelId| {
            (telemetry.wheel(right).surface_speed_ms() + telemetry.wheel(left).surface_speed_ms())
                / 2.0
        };

        match self {
            DrivetrainLayout::Rwd => axle(WheelId::RearRight, WheelId::RearLeft),
            DrivetrainLayout::Fwd => axle(WheelId::FrontRight, WheelId::FrontLeft),
            DrivetrainLayout::Awd => {
                (axle(WheelId::FrontRight, WheelId::FrontLeft)
                    + axle(WheelId::RearRight, WheelId::RearLeft))
                    / 2.0
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Anti-lock filter for the brake.
///
/// If the mean slip of the four wheels shows them turning slower than the car is moving the brake
/// is scaled down by the slip. The output never exceeds the input.
pub fn filter_abs(brake: f64, telemetry: &CarTelemetry, params: &Params) -> f64 {
    let speed_ms = telemetry.speed_x_ms;

    if speed_ms < params.abs_min_speed_ms {
        return brake;
    }

    let slips: Vec<f64> = WheelId::ALL
        .iter()
        .map(|id| telemetry.wheel(*id).surface_speed_ms() / speed_ms)
        .collect();
    let slip = util::maths::mean(&slips).unwrap_or(1.0);

    if slip < params.abs_slip {
        brake * slip.max(0.0)
    }
    else {
        brake
    }
}

/// Traction control filter for the accelerator.
///
/// If the driven wheels spin faster than the car is moving the throttle is cut entirely for this
/// tick, so the output is always either zero or the input.
pub fn filter_tcl(
    accel: f64,
    telemetry: &CarTelemetry,
    layout: DrivetrainLayout,
    params: &Params,
) -> f64 {
    let speed_ms = telemetry.speed_x_ms;

    if speed_ms < params.tcl_min_speed_ms {
        return accel;
    }

    let slip = speed_ms / layout.driven_wheel_speed_ms(telemetry);

    if slip < params.tcl_slip {
        0.0
    }
    else {
        accel
    }
}
