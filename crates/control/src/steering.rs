//! Rate-limited steering tracking for the bicycle model.

use mechanics::{BicycleParams, SteeringCommand};
use simcore::SimContext;

use crate::pid::{PidConfig, PidController};
use crate::profiles::Profile;

/// Turns a target steering angle into a rate command within `±w_max`.
///
/// The model never bounds `delta` in rate mode, so the tracker clamps the
/// target to `max_angle` before chasing it.
#[derive(Debug, Clone)]
pub struct SteeringTracker {
    controller: PidController,
    max_angle: f64,
}

impl SteeringTracker {
    pub const DEFAULT_GAIN: f64 = 5.0;

    pub fn new(params: &BicycleParams, gain: f64, max_angle: f64) -> Self {
        let config = PidConfig::p(gain).with_limits(-params.w_max, params.w_max);
        SteeringTracker {
            controller: PidController::new(config),
            max_angle: max_angle.abs(),
        }
    }

    pub fn for_params(params: &BicycleParams) -> Self {
        Self::new(params, Self::DEFAULT_GAIN, std::f64::consts::FRAC_PI_4)
    }

    pub fn command(&mut self, target: f64, delta: f64, dt: f64) -> SteeringCommand {
        let target = target.clamp(-self.max_angle, self.max_angle);
        SteeringCommand::Rate(self.controller.update(target, delta, dt))
    }

    /// Tracks a time-based steering profile.
    pub fn follow<P: Profile>(&mut self, profile: &P, ctx: &SimContext, delta: f64) -> SteeringCommand {
        self.command(profile.sample(ctx), delta, ctx.dt)
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }
}
