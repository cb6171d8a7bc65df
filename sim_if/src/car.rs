//! # Car configuration

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::NUM_WHEELS;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Static configuration of a car, as read by the host from the car's data file.
///
/// Missing entries take the same defaults the host applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    /// Mass of the car without fuel.
    ///
    /// Units: kilograms
    pub mass_kg: f64,

    /// Area of the rear wing.
    ///
    /// Units: meters^2
    pub rear_wing_area_m2: f64,

    /// Angle of attack of the rear wing.
    ///
    /// Units: radians
    pub rear_wing_angle_rad: f64,

    /// Front body lift coefficient.
    pub front_lift_coeff: f64,

    /// Rear body lift coefficient.
    pub rear_lift_coeff: f64,

    /// Ride height at each wheel, front-right, front-left, rear-right, rear-left.
    ///
    /// Units: meters
    pub ride_height_m: [f64; NUM_WHEELS],

    /// Aerodynamic drag coefficient (Cx).
    pub drag_coeff: f64,

    /// Frontal area of the car.
    ///
    /// Units: meters^2
    pub frontal_area_m2: f64,

    /// Drivetrain layout tag, one of `RWD`, `FWD` or `4WD`.
    ///
    /// This is kept as the raw tag, it is interpreted by the driver at the start of the race. There
    /// is no default layout, a car without one can't be raced.
    pub drivetrain: Option<String>,

    /// Gear ratio table including the final drive.
    ///
    /// Index is `gear + 1`, so the table starts with reverse, then neutral, then first gear.
    pub gear_ratios: Vec<f64>,

    /// Engine redline.
    ///
    /// Units: radians/second
    pub redline_rads: f64,

    /// Maximum steering angle of the front wheels.
    ///
    /// Units: radians
    pub steer_lock_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            mass_kg: 1000.0,
            rear_wing_area_m2: 0.0,
            rear_wing_angle_rad: 0.0,
            front_lift_coeff: 0.0,
            rear_lift_coeff: 0.0,
            ride_height_m: [0.20; NUM_WHEELS],
            drag_coeff: 0.0,
            frontal_area_m2: 0.0,
            drivetrain: None,
            gear_ratios: Vec::new(),
            redline_rads: 0.0,
            steer_lock_rad: 0.0,
        }
    }
}

impl CarConfig {
    /// Get the ratio of the given gear, or `None` if the gear is not in the table.
    pub fn gear_ratio(&self, gear: i32) -> Option<f64> {
        if gear < -1 {
            return None;
        }

        self.gear_ratios.get((gear + 1) as usize).copied()
    }

    /// The highest forward gear in the table.
    pub fn top_gear(&self) -> i32 {
        self.gear_ratios.len() as i32 - 2
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_gear_ratio_lookup() {
        let car = CarConfig {
            gear_ratios: vec![-10.0, 0.0, 12.0, 8.0, 6.0],
            ..Default::default()
        };

        assert_eq!(car.gear_ratio(-2), None);
        assert_eq!(car.gear_ratio(-1), Some(-10.0));
        assert_eq!(car.gear_ratio(0), Some(0.0));
        assert_eq!(car.gear_ratio(1), Some(12.0));
        assert_eq!(car.gear_ratio(3), Some(6.0));
        assert_eq!(car.gear_ratio(4), None);
        assert_eq!(car.top_gear(), 3);
    }

    #[test]
    fn test_defaults_fill_missing_entries() {
        let car: CarConfig = serde_json::from_str(r#"{ "mass_kg": 1150.0 }"#).unwrap();

        assert_eq!(car.mass_kg, 1150.0);
        assert_eq!(car.ride_height_m, [0.20; NUM_WHEELS]);
        assert_eq!(car.drivetrain, None);
    }
}
