//! # Robot lifecycle

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::sync::Arc;

use crate::{
    car::CarConfig,
    ctrl::{ControlCommand, PitDirective},
    telemetry::CarTelemetry,
    track::Track,
};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Callbacks the host invokes on a robot driving one car.
///
/// The host calls these in order: `on_track_loaded`, `on_race_start`, then `on_tick` once per
/// simulation tick (interleaved with `on_pit_request` when the car enters the pits), and finally
/// `on_race_end`.
pub trait Robot {
    /// Error raised by a failing callback. Any error is fatal to the race for this car.
    type Error;

    /// Bind the track. Returns a custom car setup, or `None` to race on the host's default setup.
    fn on_track_loaded(&mut self, track: Arc<Track>) -> Result<Option<CarConfig>, Self::Error>;

    /// Prepare for a new race with the given car.
    fn on_race_start(&mut self, car: CarConfig) -> Result<(), Self::Error>;

    /// Compute the commands for the next tick.
    fn on_tick(&mut self, telemetry: &CarTelemetry) -> Result<ControlCommand, Self::Error>;

    /// The car has entered its pit, decide what to do.
    fn on_pit_request(&mut self) -> PitDirective;

    /// The race is over.
    fn on_race_end(&mut self);
}
