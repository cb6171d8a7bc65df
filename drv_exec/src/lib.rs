//! # Driver library.
//!
//! This library allows other crates in the workspace, and the benchmarks, to access the driver
//! control module.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Driver control module - converts car telemetry into steering, gear and pedal commands
pub mod driver;
