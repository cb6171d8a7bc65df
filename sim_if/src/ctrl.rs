//! # Driver commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Gear index of reverse.
pub const REVERSE_GEAR: i32 = -1;

/// Gear index of neutral.
pub const NEUTRAL_GEAR: i32 = 0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Actuator commands for the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlCommand {
    /// Steering demand as a fraction of the steering lock, between -1 and +1. Positive turns left.
    pub steer: f64,

    /// Gear to engage.
    pub gear: i32,

    /// Accelerator pedal, between 0 and 1.
    pub accel: f64,

    /// Brake pedal, between 0 and 1.
    pub brake: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Answer to the host's pit stop request.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PitDirective {
    /// Service the car with the host's default strategy and return to the track immediately.
    Immediate,
}
