//! Control module interface
//!
//! Control modules are brought up once per race with `init` and then stepped
//! once per simulation tick with `proc`. A module must not be stepped before
//! a successful `init`, and a failed `init` leaves it unable to step until the
//! next successful one.

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// A control module stepped once per tick.
pub trait State {
    /// Data required during initialisation
    type InitData;
    /// An error which can occur during initialisation.
    type InitError;

    /// Data required for cyclic processing.
    type InputData;
    /// Data produced by cyclic processing.
    type OutputData;
    /// A report on the status of the cyclic processing.
    type StatusReport;
    /// An error which can occur during cyclic processing.
    type ProcError;

    /// Prepare the module for a new race, discarding any state from the
    /// previous one.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError>;

    /// Step the module for one tick, returning its output and a report on
    /// how the output was reached.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
