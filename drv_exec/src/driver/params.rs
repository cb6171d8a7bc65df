//! Parameters structure for the Driver

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tuning constants for the driver.
///
/// These are set when the driver is constructed and never change afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- STUCK DETECTION ----

    /// Heading error above which the car may be stuck.
    ///
    /// Units: radians
    pub max_unstuck_angle_rad: f64,

    /// Time the stuck conditions must hold before the car is considered stuck.
    ///
    /// Units: seconds
    pub unstuck_time_limit_s: f64,

    /// Speed below which the car may be stuck.
    ///
    /// Units: meters/second
    pub max_unstuck_speed_ms: f64,

    /// Distance from the centreline above which the car may be stuck.
    ///
    /// Units: meters
    pub min_unstuck_dist_m: f64,

    /// Nominal duration of one simulation tick, used to convert the unstuck time limit into a
    /// number of ticks.
    ///
    /// Units: seconds
    pub tick_period_s: f64,

    // ---- SPEED CONTROL ----

    /// Gravitational acceleration.
    ///
    /// Units: meters/second^2
    pub gravity_mss: f64,

    /// Margin between the allowed speed and the current speed above which full throttle is used.
    ///
    /// Units: meters/second
    pub full_accel_margin_ms: f64,

    // ---- GEAR SELECTION ----

    /// Fraction of the redline at which to shift up.
    pub shift_fraction: f64,

    /// Margin applied to the downshift speed to avoid hunting between gears.
    ///
    /// Units: meters/second
    pub shift_margin_ms: f64,

    // ---- FILTERS ----

    /// Mean wheel slip below which the anti-lock filter reduces the brake.
    pub abs_slip: f64,

    /// Speed below which the anti-lock filter is bypassed.
    ///
    /// Units: meters/second
    pub abs_min_speed_ms: f64,

    /// Slip of the driven wheels below which traction control cuts the throttle.
    pub tcl_slip: f64,

    /// Speed below which traction control is bypassed.
    ///
    /// Units: meters/second
    pub tcl_min_speed_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            max_unstuck_angle_rad: 20f64.to_radians(),
            unstuck_time_limit_s: 2.0,
            max_unstuck_speed_ms: 5.0,
            min_unstuck_dist_m: 3.0,
            tick_period_s: 0.02,
            gravity_mss: 9.81,
            full_accel_margin_ms: 1.0,
            shift_fraction: 0.9,
            shift_margin_ms: 4.0,
            abs_slip: 0.9,
            abs_min_speed_ms: 3.0,
            tcl_slip: 0.9,
            tcl_min_speed_ms: 3.0,
        }
    }
}

impl Params {
    /// Number of ticks the stuck conditions must be held for before the car is stuck.
    ///
    /// A non-positive tick period saturates to the largest count.
    pub fn max_unstuck_count(&self) -> u32 {
        (self.unstuck_time_limit_s / self.tick_period_s) as u32
    }
}
