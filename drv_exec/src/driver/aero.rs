//! Aerodynamic coefficient calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use sim_if::car::CarConfig;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Scaling of the rear wing area into downforce, half the air density.
const WING_CA_FACTOR: f64 = 1.23;

/// Scaling of the drag coefficient and frontal area into drag.
const CW_FACTOR: f64 = 0.645;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Aggregate aerodynamic coefficients of a car.
///
/// Downforce and drag are modelled as `CA * v^2` and `CW * v^2` respectively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AeroCoeffs {
    /// Downforce coefficient.
    ///
    /// Units: kilograms/meter
    pub ca: f64,

    /// Drag coefficient.
    ///
    /// Units: kilograms/meter
    pub cw: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AeroCoeffs {
    /// Derive the coefficients from the car's configuration.
    pub fn from_config(car: &CarConfig) -> Self {
        Self {
            ca: calc_ca(car),
            cw: calc_cw(car),
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Downforce from the rear wing plus body lift.
///
/// Body lift only acts close to the ground, the ground effect factor falls away with the fourth
/// power of the summed ride heights.
fn calc_ca(car: &CarConfig) -> f64 {
    let wing_ca = WING_CA_FACTOR * car.rear_wing_area_m2 * car.rear_wing_angle_rad.sin();
    let cl = car.front_lift_coeff + car.rear_lift_coeff;

    let h: f64 = car.ride_height_m.iter().sum::<f64>() * 1.5;
    let ground_effect = 2.0 * (-3.0 * h.powi(4)).exp();

    ground_effect * cl + 4.0 * wing_ca
}

fn calc_cw(car: &CarConfig) -> f64 {
    CW_FACTOR * car.drag_coeff * car.frontal_area_m2
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bare_car_has_no_aero() {
        let aero = AeroCoeffs::from_config(&CarConfig::default());
        assert_eq!(aero, AeroCoeffs { ca: 0.0, cw: 0.0 });
    }

    #[test]
    fn test_coeffs() {
        let car = CarConfig {
            rear_wing_area_m2: 0.7,
            rear_wing_angle_rad: 10f64.to_radians(),
            front_lift_coeff: 0.3,
            rear_lift_coeff: 0.2,
            ride_height_m: [0.1; 4],
            drag_coeff: 0.34,
            frontal_area_m2: 1.9,
            ..Default::default()
        };

        let aero = AeroCoeffs::from_config(&car);

        // Summed ride height 0.4 m, scaled to 0.6, 0.6^4 = 0.1296
        let ground_effect = 2.0 * (-3.0 * 0.1296f64).exp();
        let wing_ca = 1.23 * 0.7 * 10f64.to_radians().sin();
        assert!((aero.ca - (ground_effect * 0.5 + 4.0 * wing_ca)).abs() < 1e-12);
        assert!((aero.cw - 0.645 * 0.34 * 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_ground_effect_decays_with_ride_height() {
        let low = CarConfig {
            front_lift_coeff: 0.5,
            ride_height_m: [0.05; 4],
            ..Default::default()
        };
        let high = CarConfig {
            ride_height_m: [0.3; 4],
            ..low.clone()
        };

        assert!(AeroCoeffs::from_config(&low).ca > AeroCoeffs::from_config(&high).ca);
    }
}
