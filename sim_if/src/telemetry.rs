//! # Car telemetry
//!
//! Telemetry is owned by the host and refreshed every simulation tick. Drivers only ever read it.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::NUM_WHEELS;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The physical state of the car for one tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CarTelemetry {
    /// Position of the car relative to the track.
    pub track_pos: TrackPos,

    /// Longitudinal speed of the car in its own frame, negative when reversing.
    ///
    /// Units: meters/second
    pub speed_x_ms: f64,

    /// Yaw of the car in the track frame.
    ///
    /// Units: radians
    pub yaw_rad: f64,

    /// Currently engaged gear, -1 is reverse and 0 neutral.
    pub gear: i32,

    /// Engine speed.
    ///
    /// Units: radians/second
    pub engine_rpm_rads: f64,

    /// Fuel currently on board.
    ///
    /// Units: kilograms
    pub fuel_kg: f64,

    /// Wheel states, indexed by [`WheelId`].
    pub wheels: [WheelState; NUM_WHEELS],
}

/// Position of the car on the track.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrackPos {
    /// Index of the segment the car is on.
    pub seg_id: usize,

    /// Distance travelled from the start of the segment. Meters on straights, radians of arc on
    /// turns.
    pub to_start: f64,

    /// Lateral offset from the centreline, positive to the left.
    ///
    /// Units: meters
    pub to_middle_m: f64,
}

/// State of a single wheel.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WheelState {
    /// Angular spin velocity.
    ///
    /// Units: radians/second
    pub spin_vel_rads: f64,

    /// Rolling radius.
    ///
    /// Units: meters
    pub radius_m: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Position of a wheel on the car.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WheelId {
    FrontRight,
    FrontLeft,
    RearRight,
    RearLeft,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WheelId {
    /// All wheels in index order.
    pub const ALL: [WheelId; NUM_WHEELS] = [
        WheelId::FrontRight,
        WheelId::FrontLeft,
        WheelId::RearRight,
        WheelId::RearLeft,
    ];

    /// Index of this wheel in [`CarTelemetry::wheels`].
    pub fn index(self) -> usize {
        match self {
            WheelId::FrontRight => 0,
            WheelId::FrontLeft => 1,
            WheelId::RearRight => 2,
            WheelId::RearLeft => 3,
        }
    }
}

impl WheelState {
    /// Speed of the wheel's rolling surface.
    ///
    /// Units: meters/second
    pub fn surface_speed_ms(&self) -> f64 {
        self.spin_vel_rads * self.radius_m
    }
}

impl CarTelemetry {
    /// Get the state of a particular wheel.
    pub fn wheel(&self, id: WheelId) -> &WheelState {
        &self.wheels[id.index()]
    }
}
