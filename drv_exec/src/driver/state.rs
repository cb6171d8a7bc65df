//! Implementations for the Driver state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::sync::Arc;
use log::{info, trace};
use serde::Serialize;

// Internal
use super::{
    AeroCoeffs, DrivetrainLayout, DriverError, Params, StuckDetector, StuckInput, StuckState,
    VehicleCache,
    allowed_speed_ms, filter_abs, filter_tcl};
use sim_if::{
    car::CarConfig,
    ctrl::{ControlCommand, PitDirective, REVERSE_GEAR},
    robot::Robot,
    telemetry::CarTelemetry,
    track::Track};
use util::{
    module::State,
    archive::{ArchiveError, Archived, Archiver},
    session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Driver control module state
#[derive(Default)]
pub struct Driver {

    pub(crate) params: Params,

    pub(crate) track: Option<Arc<Track>>,

    /// Car parameters, only available once the race has started.
    pub(crate) car: Option<CarParams>,

    pub(crate) cache: VehicleCache,

    pub(crate) stuck: StuckDetector,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) output: Option<ControlCommand>,
    arch_output: Archiver
}

/// Car parameters derived from the car's configuration at the start of a race.
#[derive(Debug, Clone)]
pub struct CarParams {
    /// The configuration the parameters were derived from.
    pub config: CarConfig,

    /// Aerodynamic coefficients.
    pub aero: AeroCoeffs,

    /// Drivetrain layout, selecting the reference speed used by traction control.
    pub drivetrain: DrivetrainLayout,
}

/// Status report for Driver processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    pub stuck: StuckState,
    pub stuck_count: u32,

    pub heading_err_rad: f64,
    pub mass_kg: f64,
    pub allowed_speed_ms: f64,

    /// Brake demand before the anti-lock filter
    pub brake_dem: f64,

    /// Accelerator demand before traction control
    pub accel_dem: f64,

    pub abs_active: bool,
    pub tcl_active: bool,

    /// Change between the current gear and the commanded gear
    pub gear_change: i32,

    pub steer_limited: bool,
    pub accel_limited: bool,
    pub brake_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CarParams {
    /// Derive the parameters from the car's configuration.
    ///
    /// A missing or unrecognised drivetrain layout leaves traction control undefined, so is an
    /// error. The steering lock and redline divide the steering and pedal demands every tick and
    /// must be positive.
    pub fn from_config(config: &CarConfig) -> Result<Self, DriverError> {
        let drivetrain: DrivetrainLayout = config
            .drivetrain
            .as_deref()
            .ok_or(DriverError::MissingDrivetrain)?
            .parse()?;

        // Written so that NaN is rejected too
        if !(config.steer_lock_rad > 0.0) {
            return Err(DriverError::NonPositiveCarParam(
                "steer_lock_rad",
                config.steer_lock_rad
            ));
        }
        if !(config.redline_rads > 0.0) {
            return Err(DriverError::NonPositiveCarParam("redline_rads", config.redline_rads));
        }

        // Reverse, neutral and first at a minimum
        if config.gear_ratios.len() < 3 {
            return Err(DriverError::InvalidGearRatios(config.gear_ratios.len()));
        }

        Ok(Self {
            config: config.clone(),
            aero: AeroCoeffs::from_config(config),
            drivetrain,
        })
    }

    /// Get the ratio of a gear.
    pub fn gear_ratio(&self, gear: i32) -> Result<f64, DriverError> {
        self.config
            .gear_ratio(gear)
            .ok_or(DriverError::MissingGearRatio(gear))
    }
}

impl State for Driver {
    type InitData = CarConfig;
    type InitError = DriverError;

    type InputData = CarTelemetry;
    type OutputData = ControlCommand;
    type StatusReport = StatusReport;
    type ProcError = DriverError;

    /// Initialise the Driver for a new race.
    ///
    /// Expected init data is the configuration of the car to drive.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {

        // Invalidate any previous race's parameters first, so a failed init leaves the driver
        // unable to drive
        self.car = None;

        let car = CarParams::from_config(&init_data)?;

        self.stuck = StuckDetector::new(self.params.max_unstuck_count());
        self.cache = VehicleCache::default();
        self.report = StatusReport::default();
        self.output = None;

        info!("Driver initialised for race");
        info!("    Drivetrain: {:?}", car.drivetrain);
        info!("    CA: {:.4}, CW: {:.4}", car.aero.ca, car.aero.cw);
        info!("    Unstuck after {} ticks", self.params.max_unstuck_count());

        self.car = Some(car);

        Ok(())
    }

    /// Perform cyclic processing of the Driver.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        let track = Arc::clone(self.track.as_ref().ok_or(DriverError::NoTrack)?);
        let car = self.car.as_ref().ok_or(DriverError::NotInitialised)?;
        let segment = track.segment(input_data.track_pos.seg_id)?;

        // Update the cached view of the car
        self.cache = VehicleCache::update(input_data, segment, car.config.mass_kg);
        let heading_err_rad = self.cache.heading_err_rad;

        let stuck_state = self.stuck.update(
            &StuckInput {
                heading_err_rad,
                speed_x_ms: input_data.speed_x_ms,
                to_middle_m: input_data.track_pos.to_middle_m,
            },
            &self.params
        );

        // Stuck cars reverse with the steering opposing the heading error. Otherwise steer along
        // the track and back towards the centreline.
        let (steer, gear) = match stuck_state {
            StuckState::Stuck => (
                -heading_err_rad / car.config.steer_lock_rad,
                REVERSE_GEAR
            ),
            StuckState::Tracking => (
                (heading_err_rad - input_data.track_pos.to_middle_m / segment.width_m)
                    / car.config.steer_lock_rad,
                self.calc_gear(input_data, car)?
            )
        };

        // Brake and accelerator are mutually exclusive
        let brake_dem = self.calc_brake(input_data, &track, car)?;
        let brake = filter_abs(brake_dem, input_data, &self.params);

        let (accel_dem, accel) = if brake == 0.0 {
            let a = self.calc_accel(input_data, segment, car)?;
            (a, filter_tcl(a, input_data, car.drivetrain, &self.params))
        }
        else {
            (0.0, 0.0)
        };

        self.report.stuck = stuck_state;
        self.report.stuck_count = self.stuck.count();
        self.report.heading_err_rad = heading_err_rad;
        self.report.mass_kg = self.cache.mass_kg;
        self.report.allowed_speed_ms = allowed_speed_ms(segment, self.params.gravity_mss);
        self.report.brake_dem = brake_dem;
        self.report.accel_dem = accel_dem;
        self.report.abs_active = brake < brake_dem;
        self.report.tcl_active = accel != accel_dem;
        self.report.gear_change = gear - input_data.gear;

        let output = self.enforce_limits(ControlCommand {
            steer,
            gear,
            accel,
            brake
        });

        trace!("Driver output: {:?}", output);

        // Update the output in self
        self.output = Some(output);

        Ok((output, self.report))
    }
}

impl Robot for Driver {
    type Error = DriverError;

    /// Bind the track, checking its segment chain is complete.
    ///
    /// The driver has no custom car setup.
    fn on_track_loaded(&mut self, track: Arc<Track>) -> Result<Option<CarConfig>, DriverError> {
        track.validate()?;

        info!(
            "Track \"{}\" loaded: {} segments, {:.1} m",
            track.name,
            track.len(),
            track.length_m()
        );

        self.track = Some(track);

        Ok(None)
    }

    fn on_race_start(&mut self, car: CarConfig) -> Result<(), DriverError> {
        self.init(car)
    }

    fn on_tick(&mut self, telemetry: &CarTelemetry) -> Result<ControlCommand, DriverError> {
        self.proc(telemetry).map(|(output, _)| output)
    }

    fn on_pit_request(&mut self) -> PitDirective {
        PitDirective::Immediate
    }

    fn on_race_end(&mut self) {
        info!("Race ended");
    }
}

impl Archived for Driver {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(self.report)?;

        if let Some(output) = self.output {
            self.arch_output.serialise(output)?;
        }

        Ok(())
    }
}

impl Driver {

    /// Create a new driver with the given tuning constants.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// The tuning constants in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The report from the most recent tick.
    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    /// Set up the archives in the session's archive directory.
    pub fn init_archives(&mut self, session: &Session) -> Result<(), ArchiveError> {
        self.arch_report = Archiver::from_path(session, "driver/status_report.csv")?;
        self.arch_output = Archiver::from_path(session, "driver/output.csv")?;

        Ok(())
    }

    /// Enforce the actuator ranges on a command.
    ///
    /// If a limit is reached the corresponding flag in the status report will be raised. A NaN
    /// demand is replaced by zero.
    fn enforce_limits(&mut self, mut cmd: ControlCommand) -> ControlCommand {
        let (steer, steer_limited) = limit(cmd.steer, -1.0, 1.0);
        let (accel, accel_limited) = limit(cmd.accel, 0.0, 1.0);
        let (brake, brake_limited) = limit(cmd.brake, 0.0, 1.0);

        cmd.steer = steer;
        cmd.accel = accel;
        cmd.brake = brake;

        self.report.steer_limited = steer_limited;
        self.report.accel_limited = accel_limited;
        self.report.brake_limited = brake_limited;

        cmd
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Clamp a value into a range, returning whether it had to be changed.
fn limit(value: f64, min: f64, max: f64) -> (f64, bool) {
    if value.is_nan() {
        return (0.0, true);
    }

    let clamped = value.clamp(min, max);
    (clamped, clamped != value)
}
