//! Shared fixtures for the driver tests

use std::f64::consts::PI;
use std::sync::Arc;

use sim_if::{
    car::CarConfig,
    robot::Robot,
    telemetry::{CarTelemetry, TrackPos, WheelState},
    track::{SegmentKind, Track, TrackSegment, TurnDirection},
};

use super::{Driver, Params};

/// Wheel radius used by the fixture car.
pub const WHEEL_RADIUS_M: f64 = 0.3;

/// An oval made of two 200 m straights and two 50 m radius left-hand hairpins.
pub fn oval_track() -> Track {
    let straight = |start_angle_rad: f64, next: usize| TrackSegment {
        kind: SegmentKind::Straight { length_m: 200.0 },
        width_m: 12.0,
        friction: 1.0,
        start_angle_rad,
        next: Some(next),
    };
    let hairpin = |start_angle_rad: f64, next: usize| TrackSegment {
        kind: SegmentKind::Turn {
            direction: TurnDirection::Left,
            arc_rad: PI,
            radius_m: 50.0,
        },
        width_m: 12.0,
        friction: 0.9,
        start_angle_rad,
        next: Some(next),
    };

    Track::new(
        "oval",
        vec![
            straight(0.0, 1),
            hairpin(0.0, 2),
            straight(PI, 3),
            hairpin(PI, 0),
        ],
    )
}

/// A rear wheel drive car with three forward gears and no aerodynamic aids.
pub fn test_car() -> CarConfig {
    CarConfig {
        mass_kg: 1000.0,
        drivetrain: Some(String::from("RWD")),
        gear_ratios: vec![-10.0, 0.0, 12.0, 8.0, 6.0],
        redline_rads: 900.0,
        steer_lock_rad: 21f64.to_radians(),
        ..Default::default()
    }
}

/// Telemetry for a car in first gear, on the centreline, pointing along the track, with free
/// rolling wheels.
pub fn telemetry_on(seg_id: usize, to_start: f64, speed_x_ms: f64) -> CarTelemetry {
    let track = oval_track();
    let yaw_rad = track.segments[seg_id].tangent_angle_rad(to_start);

    CarTelemetry {
        track_pos: TrackPos {
            seg_id,
            to_start,
            to_middle_m: 0.0,
        },
        speed_x_ms,
        yaw_rad,
        gear: 1,
        engine_rpm_rads: 0.0,
        fuel_kg: 0.0,
        wheels: [WheelState {
            spin_vel_rads: speed_x_ms / WHEEL_RADIUS_M,
            radius_m: WHEEL_RADIUS_M,
        }; 4],
    }
}

/// A driver on the oval, initialised for a race with the test car.
pub fn race_driver() -> Driver {
    let mut driver = Driver::new(Params::default());
    driver.on_track_loaded(Arc::new(oval_track())).unwrap();
    driver.on_race_start(test_car()).unwrap();
    driver
}
