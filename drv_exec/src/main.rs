//! Driver executable entry point.
//!
//! Replays a recorded telemetry log through the driver, archiving the driver's commands and status
//! reports into a new session.
//!
//! # Architecture
//!
//! The execution methodology follows the host's lifecycle:
//!
//!     - Load the driver and car parameters
//!     - Load the track and hand it to the driver
//!     - Start the race with the car configuration
//!     - Main loop, one cycle per telemetry record:
//!         - Driver processing
//!         - Archiving
//!     - Answer the pit request and end the race
//!
//! # Usage
//!
//!     drv_exec --track data/oval.json --telemetry data/oval_telemetry.jsonl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use color_eyre::{Report, eyre::WrapErr};
use log::{debug, info, warn};
use structopt::StructOpt;

// Internal
use drv_lib::driver::{Driver, Params, StuckState};
use sim_if::{car::CarConfig, robot::Robot, telemetry::CarTelemetry, track::Track};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options.
#[derive(Debug, StructOpt)]
#[structopt(name = "drv_exec", about = "Replay recorded telemetry through the driver")]
struct Opts {
    /// Track description in JSON
    #[structopt(long, parse(from_os_str))]
    track: PathBuf,

    /// Telemetry log, one JSON record per line
    #[structopt(long, parse(from_os_str))]
    telemetry: PathBuf,

    /// Car configuration, defaults to `car.toml` in the parameters directory
    #[structopt(long, parse(from_os_str))]
    car: Option<PathBuf>,

    /// Driver tuning constants, defaults to `driver.toml` in the parameters directory
    #[structopt(long, parse(from_os_str))]
    driver: Option<PathBuf>,
}

/// Counts accumulated over the replay.
#[derive(Debug, Default)]
struct Summary {
    ticks: u64,
    stuck_ticks: u64,
    braking_ticks: u64,
    limited_ticks: u64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "drv_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Apex Driver Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let params: Params = match opts.driver {
        Some(ref p) => util::params::load_from_path(p),
        None => util::params::load("driver.toml")
    }.wrap_err("Could not load driver params")?;

    let car: CarConfig = match opts.car {
        Some(ref p) => util::params::load_from_path(p),
        None => util::params::load("car.toml")
    }.wrap_err("Could not load car params")?;

    info!("Exec parameters loaded");

    // ---- LOAD TRACK ----

    let track: Track = serde_json::from_reader(BufReader::new(
        File::open(&opts.track)
            .wrap_err_with(|| format!("Could not open track file {:?}", opts.track))?
    )).wrap_err("Could not parse the track")?;

    // ---- INITIALISE DRIVER ----

    let mut driver = Driver::new(params);
    driver.init_archives(&session)
        .wrap_err("Failed to initialise the driver archives")?;

    if driver.on_track_loaded(Arc::new(track))
        .wrap_err("The driver rejected the track")?
        .is_some()
    {
        warn!("The driver requested a custom setup, the replay uses the loaded car");
    }

    driver.on_race_start(car)
        .wrap_err("Failed to start the race")?;

    info!("Driver initialisation complete\n");

    // ---- MAIN LOOP ----

    let telemetry_file = File::open(&opts.telemetry)
        .wrap_err_with(|| format!("Could not open telemetry file {:?}", opts.telemetry))?;

    let mut summary = Summary::default();

    for (line_num, line) in BufReader::new(telemetry_file).lines().enumerate() {
        let line = line.wrap_err("Could not read the telemetry file")?;

        // Skip blank lines between records
        if line.trim().is_empty() {
            continue;
        }

        let telemetry: CarTelemetry = serde_json::from_str(&line)
            .wrap_err_with(|| format!("Invalid telemetry record on line {}", line_num + 1))?;

        let (cmd, report) = driver.proc(&telemetry)
            .wrap_err_with(|| format!("Driver processing failed on line {}", line_num + 1))?;

        summary.ticks += 1;
        if report.stuck == StuckState::Stuck {
            summary.stuck_ticks += 1;
        }
        if cmd.brake > 0.0 {
            summary.braking_ticks += 1;
        }
        if report.steer_limited || report.accel_limited || report.brake_limited {
            summary.limited_ticks += 1;
        }

        driver.write().wrap_err("Failed to archive the driver state")?;
    }

    // ---- END OF RACE ----

    let pit = driver.on_pit_request();
    driver.on_race_end();

    info!("Replay complete");
    info!("    Ticks: {}", summary.ticks);
    info!("    Stuck ticks: {}", summary.stuck_ticks);
    info!("    Braking ticks: {}", summary.braking_ticks);
    info!("    Limited ticks: {}", summary.limited_ticks);
    info!("    Pit directive: {:?}", pit);

    Ok(())
}
