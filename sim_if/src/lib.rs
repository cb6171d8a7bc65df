//! # Simulator interface crate.
//!
//! Provides the data exchanged between the racing simulator host and a robot
//! driver: track geometry, car configuration, per-tick telemetry and the
//! commands the driver hands back.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Static car configuration loaded by the host
pub mod car;

/// Actuator commands and pit directives produced by the driver
pub mod ctrl;

/// Lifecycle callbacks the host invokes on a driver
pub mod robot;

/// Per-tick car telemetry
pub mod telemetry;

/// Track geometry as a forward linked chain of segments
pub mod track;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of wheels on a car.
pub const NUM_WHEELS: usize = 4;
