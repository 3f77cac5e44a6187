//! Throttle controller that holds a target speed on the drivetrain model.

use log::warn;
use mechanics::{LongitudinalInput, LongitudinalState};
use serde::{Deserialize, Serialize};

use crate::pid::{PidConfig, PidController};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedHoldConfig {
    pub kp: f64,
    pub ki: f64,
    pub i_max: f64,
}

impl Default for SpeedHoldConfig {
    fn default() -> Self {
        SpeedHoldConfig {
            kp: 0.1,
            ki: 0.02,
            i_max: 50.0,
        }
    }
}

/// PI speed controller. Throttle output is kept in [0, 1].
#[derive(Debug, Clone)]
pub struct SpeedHold {
    controller: PidController,
    target: f64,
}

impl SpeedHold {
    pub fn new(config: SpeedHoldConfig, target: f64) -> Self {
        if target < 0.0 {
            warn!("speed hold target {target} m/s is negative; the drivetrain model only covers forward motion");
        }
        let pid = PidConfig::pi(config.kp, config.ki)
            .with_i_max(config.i_max)
            .with_limits(0.0, 1.0);
        SpeedHold {
            controller: PidController::new(pid),
            target,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn throttle(&mut self, v: f64, dt: f64) -> f64 {
        self.controller.update(self.target, v, dt)
    }

    /// Drivetrain input for the current state on a road of incline `alpha`.
    pub fn input(&mut self, state: &LongitudinalState, alpha: f64, dt: f64) -> LongitudinalInput {
        LongitudinalInput::new(self.throttle(state.v, dt), alpha)
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechanics::{LongitudinalModel, LongitudinalParams};

    #[test]
    fn test_throttle_is_bounded() {
        let mut hold = SpeedHold::new(SpeedHoldConfig::default(), 30.0);
        assert_eq!(hold.throttle(0.0, 0.01), 1.0);
        hold.set_target(0.0);
        assert_eq!(hold.throttle(30.0, 0.01), 0.0);
    }

    #[test]
    fn test_holds_target_speed() {
        let mut model = LongitudinalModel::new(LongitudinalParams::default()).unwrap();
        let mut hold = SpeedHold::new(SpeedHoldConfig::default(), 20.0);
        let dt = model.params().sample_time;

        let mut tail = Vec::new();
        for i in 0..20_000 {
            let input = hold.input(model.state(), 0.0, dt);
            model.step(input.throttle, input.alpha);
            if i >= 18_000 {
                tail.push(model.state().v);
            }
        }
        assert!(tail.iter().all(|v| (v - 20.0).abs() < 0.05), "last {:?}", tail.last());
    }
}
