//! Stuck detection
//!
//! The detector is a debounced two state machine. While the car is a stuck candidate, pointing
//! well away from the track, slow and far from the centreline, a counter is incremented each tick.
//! The car is declared stuck once the counter exceeds the timeout and reversing would point the car
//! back towards the centreline. Any tick on which the car isn't a candidate resets the detector.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use serde::Serialize;

use super::Params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Stuck detector state.
#[derive(Debug, Clone, Default)]
pub struct StuckDetector {
    /// Current state
    state: StuckState,

    /// Number of consecutive ticks the car has been a stuck candidate, saturating one above
    /// `max_count`.
    count: u32,

    /// Count the debounce counter must exceed before the car can be stuck
    max_count: u32,
}

/// Inputs to the stuck detector for one tick.
#[derive(Debug, Clone, Copy)]
pub struct StuckInput {
    /// Heading error to the track tangent, normalised.
    ///
    /// Units: radians
    pub heading_err_rad: f64,

    /// Longitudinal speed.
    ///
    /// Units: meters/second
    pub speed_x_ms: f64,

    /// Lateral offset from the centreline, positive to the left.
    ///
    /// Units: meters
    pub to_middle_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Whether the car is following the track or stuck.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum StuckState {
    Tracking,
    Stuck,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StuckState {
    fn default() -> Self {
        StuckState::Tracking
    }
}

impl StuckDetector {
    /// Create a new detector which requires the stuck conditions to hold for more than
    /// `max_count` ticks.
    pub fn new(max_count: u32) -> Self {
        Self {
            state: StuckState::Tracking,
            count: 0,
            max_count,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Step the detector for this tick and return the new state.
    pub fn update(&mut self, input: &StuckInput, params: &Params) -> StuckState {
        let is_candidate = input.heading_err_rad.abs() > params.max_unstuck_angle_rad
            && input.speed_x_ms < params.max_unstuck_speed_ms
            && input.to_middle_m.abs() > params.min_unstuck_dist_m;

        let new_state = if !is_candidate {
            self.count = 0;
            StuckState::Tracking
        }
        else if self.count > self.max_count && input.to_middle_m * input.heading_err_rad < 0.0 {
            StuckState::Stuck
        }
        else {
            self.count = self
                .count
                .saturating_add(1)
                .min(self.max_count.saturating_add(1));
            StuckState::Tracking
        };

        if new_state != self.state {
            match new_state {
                StuckState::Stuck => info!(
                    "Car stuck: heading error {:.3} rad, {:.2} m from centre",
                    input.heading_err_rad, input.to_middle_m
                ),
                StuckState::Tracking => info!("Car recovered from stuck"),
            }
        }

        self.state = new_state;
        new_state
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn stuck_input() -> StuckInput {
        StuckInput {
            heading_err_rad: 25f64.to_radians(),
            speed_x_ms: 2.0,
            to_middle_m: -4.0,
        }
    }

    #[test]
    fn test_declares_stuck_after_timeout() {
        let params = Params::default();
        let mut det = StuckDetector::new(params.max_unstuck_count());
        let input = stuck_input();

        // Counter has to exceed 100, which takes 101 ticks of incrementing
        for _ in 0..=params.max_unstuck_count() {
            assert_eq!(det.update(&input, &params), StuckState::Tracking);
        }
        assert_eq!(det.count(), 101);
        assert_eq!(det.update(&input, &params), StuckState::Stuck);
    }

    #[test]
    fn test_never_stuck_before_timeout() {
        let input = stuck_input();

        for tick_period_s in [0.5, 0.1, 0.02, 0.01, 0.003].iter() {
            let params = Params {
                tick_period_s: *tick_period_s,
                ..Default::default()
            };
            let max = params.max_unstuck_count();
            let mut det = StuckDetector::new(max);
            let mut state = StuckState::Tracking;

            for _ in 0..(max as u64 + 50) {
                let count_before = det.count();
                state = det.update(&input, &params);
                if state == StuckState::Stuck {
                    assert!(count_before > max);
                }
            }
            assert_eq!(state, StuckState::Stuck);
        }
    }

    #[test]
    fn test_resets_when_not_candidate() {
        let params = Params::default();
        let mut det = StuckDetector::new(3);
        let input = stuck_input();

        for _ in 0..5 {
            det.update(&input, &params);
        }
        assert_eq!(det.update(&input, &params), StuckState::Stuck);

        // Speeding up clears the candidate condition
        let moving = StuckInput {
            speed_x_ms: 10.0,
            ..input
        };
        assert_eq!(det.update(&moving, &params), StuckState::Tracking);
        assert_eq!(det.count(), 0);

        // Each candidate condition on its own is required
        let aligned = StuckInput {
            heading_err_rad: 0.1,
            ..input
        };
        let centred = StuckInput {
            to_middle_m: 1.0,
            ..input
        };
        for i in [aligned, centred].iter() {
            for _ in 0..10 {
                assert_eq!(det.update(i, &params), StuckState::Tracking);
            }
            assert_eq!(det.count(), 0);
        }
    }

    #[test]
    fn test_requires_heading_back_towards_track() {
        let params = Params::default();
        let mut det = StuckDetector::new(3);

        // Offset and heading error on the same side, reversing would take the car further away
        let input = StuckInput {
            to_middle_m: 4.0,
            ..stuck_input()
        };

        for _ in 0..50 {
            assert_eq!(det.update(&input, &params), StuckState::Tracking);
        }

        // Counter stays bounded while waiting
        assert_eq!(det.count(), 4);

        // Once the sides differ the car is stuck straight away
        assert_eq!(det.update(&stuck_input(), &params), StuckState::Stuck);
    }
}
