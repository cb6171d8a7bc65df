//! # Driver control module
//!
//! The driver controls a single car. Once per simulation tick it takes the car's telemetry and
//! produces steering, gear, accelerator and brake commands.
//!
//! Each tick the driver:
//!
//! 1. Updates its cached view of the car, the heading error to the track tangent and the mass of
//!    the car including the fuel on board.
//! 2. Steps the stuck detector. A car pointing away from the track, nearly stationary and well off
//!    the centreline for long enough is stuck, and is reversed back towards the track.
//! 3. Otherwise steers towards the track centreline, picks a gear, and decides on braking by
//!    looking ahead along the track for turns it can't take at the current speed.
//! 4. Filters the brake through the anti-lock filter and the accelerator through traction
//!    control. Brake and accelerator are never applied together.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod aero;
mod calc_accel;
mod calc_brake;
mod calc_gear;
mod cache;
mod filters;
mod params;
mod speed;
mod state;
mod stuck;

#[cfg(test)]
mod test_fixtures;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use aero::*;
pub use cache::*;
pub use filters::*;
pub use params::*;
pub use speed::*;
pub use state::*;
pub use stuck::*;

use sim_if::track::TrackError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during Driver operation.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("The car has no drivetrain layout, expected one of RWD, FWD or 4WD")]
    MissingDrivetrain,

    #[error("Unrecognised drivetrain layout {0:?}, expected one of RWD, FWD or 4WD")]
    UnknownDrivetrain(String),

    #[error("Car parameter {0} must be positive, found {1}")]
    NonPositiveCarParam(&'static str, f64),

    #[error(
        "The gear ratio table must hold reverse, neutral and at least one forward gear, \
         found {0} entries"
    )]
    InvalidGearRatios(usize),

    #[error("No track has been loaded")]
    NoTrack,

    #[error("The driver has not been initialised for a race")]
    NotInitialised,

    #[error("No gear ratio is configured for gear {0}")]
    MissingGearRatio(i32),

    #[error("Track error: {0}")]
    Track(#[from] TrackError),
}
