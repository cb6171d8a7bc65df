//! # Driver Tick Benchmark

use std::f64::consts::PI;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drv_lib::driver::{Driver, Params};
use sim_if::{
    car::CarConfig,
    robot::Robot,
    telemetry::{CarTelemetry, TrackPos, WheelState},
    track::{SegmentKind, Track, TrackSegment, TurnDirection},
};

/// Number of straight/turn pairs in the benchmark track.
const NUM_CORNERS: usize = 50;

/// Build a long looped track of short straights and gentle left turns, so the braking look ahead
/// has to scan many segments each tick.
fn looped_track() -> Track {
    let turn_arc_rad = 2.0 * PI / NUM_CORNERS as f64;
    let num_segments = 2 * NUM_CORNERS;

    let segments = (0..num_segments)
        .map(|id| {
            let corner = (id / 2) as f64;
            let kind = if id % 2 == 0 {
                SegmentKind::Straight { length_m: 20.0 }
            }
            else {
                SegmentKind::Turn {
                    direction: TurnDirection::Left,
                    arc_rad: turn_arc_rad,
                    radius_m: 200.0,
                }
            };

            TrackSegment {
                kind,
                width_m: 12.0,
                friction: 1.1,
                start_angle_rad: corner * turn_arc_rad,
                next: Some((id + 1) % num_segments),
            }
        })
        .collect();

    Track::new("bench_loop", segments)
}

fn driver_tick_benchmark(c: &mut Criterion) {
    // ---- Set up the driver ----

    let car = CarConfig {
        mass_kg: 1150.0,
        rear_wing_area_m2: 0.7,
        rear_wing_angle_rad: 14f64.to_radians(),
        front_lift_coeff: 0.2,
        rear_lift_coeff: 0.25,
        drag_coeff: 0.34,
        frontal_area_m2: 1.9,
        drivetrain: Some(String::from("RWD")),
        gear_ratios: vec![-12.0, 0.0, 13.0, 9.0, 7.0, 5.8, 4.9, 4.3],
        redline_rads: 1000.0,
        steer_lock_rad: 21f64.to_radians(),
        ..Default::default()
    };

    let mut driver = Driver::new(Params::default());
    driver.on_track_loaded(Arc::new(looped_track())).unwrap();
    driver.on_race_start(car).unwrap();

    // Fast on a straight, so the look ahead covers a long way
    let telemetry = CarTelemetry {
        track_pos: TrackPos {
            seg_id: 0,
            to_start: 2.0,
            to_middle_m: 0.5,
        },
        speed_x_ms: 80.0,
        yaw_rad: 0.02,
        gear: 6,
        engine_rpm_rads: 800.0,
        fuel_kg: 60.0,
        wheels: [WheelState {
            spin_vel_rads: 80.0 / 0.33,
            radius_m: 0.33,
        }; 4],
    };

    c.bench_function("Driver::on_tick", |b| {
        b.iter(|| driver.on_tick(black_box(&telemetry)).unwrap())
    });
}

criterion_group!(benches, driver_tick_benchmark);
criterion_main!(benches);
