//! Kinematic Bicycle Model
//!
//! Planar kinematics referenced to the center of mass. Speed is an input,
//! not a state: there is no mass or force in this model.

use log::{debug, trace};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use simcore::error::{SimError, require_non_negative, require_positive};
use simcore::{Model, SimResult, SteppedModel, euler};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BicycleParams {
    /// Wheelbase (m)
    pub wheelbase: f64,
    /// Rear axle to center of mass (m)
    pub lr: f64,
    /// Maximum steering rate magnitude (rad/s)
    pub w_max: f64,
    /// Integration step (s)
    pub sample_time: f64,
}

impl Default for BicycleParams {
    fn default() -> Self {
        BicycleParams {
            wheelbase: 2.0,
            lr: 1.2,
            w_max: 1.22,
            sample_time: 0.01,
        }
    }
}

impl BicycleParams {
    pub fn validate(&self) -> SimResult<()> {
        require_positive("wheelbase", self.wheelbase)?;
        require_non_negative("lr", self.lr)?;
        if self.lr > self.wheelbase {
            return Err(SimError::InvalidParameter {
                name: "lr",
                reason: format!("must not exceed wheelbase {}, got {}", self.wheelbase, self.lr),
            });
        }
        require_non_negative("w_max", self.w_max)?;
        require_positive("sample_time", self.sample_time)?;
        Ok(())
    }

    /// Body slip angle for steering angle `delta`.
    pub fn slip_angle(&self, delta: f64) -> f64 {
        (self.lr * delta.tan() / self.wheelbase).atan()
    }

    /// Constant steering angle that puts the center of mass on a circle of `radius`.
    /// `radius` must exceed `lr`; the result is NaN otherwise.
    pub fn steering_for_radius(&self, radius: f64) -> f64 {
        // R = L / (cos(beta) tan(delta)) with tan(beta) = lr tan(delta) / L
        (self.wheelbase / (radius * radius - self.lr * self.lr).sqrt()).atan()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BicycleState {
    pub xc: f64,
    pub yc: f64,
    /// Heading (rad), accumulated without wrapping
    pub theta: f64,
    /// Front steering angle (rad)
    pub delta: f64,
    /// Body slip angle from the last step (rad)
    pub beta: f64,
}

impl BicycleState {
    pub const INITIAL: BicycleState = BicycleState {
        xc: 0.0,
        yc: 0.0,
        theta: 0.0,
        delta: 0.0,
        beta: 0.0,
    };
}

impl Default for BicycleState {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SteeringCommand {
    /// Steering rate (rad/s), clamped to `±w_max`
    Rate(f64),
    /// Steering angle (rad), applied directly without rate limiting
    Angle(f64),
}

impl SteeringCommand {
    pub fn from_parts(input_value: f64, is_rate: bool) -> Self {
        if is_rate {
            SteeringCommand::Rate(input_value)
        } else {
            SteeringCommand::Angle(input_value)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BicycleInput {
    /// Commanded speed (m/s), used as-is
    pub v: f64,
    pub steering: SteeringCommand,
}

/// Kinematic bicycle.
///
/// Nothing bounds `delta` itself: integrating a sustained rate command
/// drives the steering angle without limit, so callers in rate mode must
/// bound it themselves.
#[derive(Debug, Clone)]
pub struct KinematicBicycle {
    params: BicycleParams,
    state: BicycleState,
}

impl KinematicBicycle {
    pub fn new(params: BicycleParams) -> SimResult<Self> {
        params.validate()?;
        debug!(
            "bicycle model created, L = {}m lr = {}m w_max = {}rad/s",
            params.wheelbase, params.lr, params.w_max
        );
        Ok(KinematicBicycle {
            params,
            state: BicycleState::INITIAL,
        })
    }

    pub fn params(&self) -> &BicycleParams {
        &self.params
    }

    pub fn state(&self) -> &BicycleState {
        &self.state
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.state.xc, self.state.yc)
    }

    /// World-frame velocity of the center of mass at speed `v`.
    pub fn velocity(&self, v: f64) -> Vector2<f64> {
        let beta = self.params.slip_angle(self.state.delta);
        let course = self.state.theta + beta;
        Vector2::new(course.cos(), course.sin()) * v
    }

    /// Advance one sample interval. `input_value` is a steering rate when
    /// `is_rate` is set, otherwise a steering angle.
    pub fn step(&mut self, v: f64, input_value: f64, is_rate: bool) {
        self.apply(v, SteeringCommand::from_parts(input_value, is_rate));
    }

    pub fn apply(&mut self, v: f64, command: SteeringCommand) {
        let p = &self.params;
        let s = self.state;
        let dt = p.sample_time;

        let delta_new = match command {
            SteeringCommand::Rate(rate) => {
                let clamped = rate.clamp(-p.w_max, p.w_max);
                euler(s.delta, clamped, dt)
            }
            SteeringCommand::Angle(angle) => angle,
        };

        // Rates come from the pre-step steering angle.
        let beta = p.slip_angle(s.delta);
        let theta_dot = v * beta.cos() * s.delta.tan() / p.wheelbase;
        let xc_dot = v * (s.theta + beta).cos();
        let yc_dot = v * (s.theta + beta).sin();

        trace!("bicycle step: beta={beta:.5} theta_dot={theta_dot:.5}");

        self.state = BicycleState {
            xc: euler(s.xc, xc_dot, dt),
            yc: euler(s.yc, yc_dot, dt),
            theta: euler(s.theta, theta_dot, dt),
            delta: delta_new,
            beta,
        };
    }
}

impl Model for KinematicBicycle {
    fn reset(&mut self) {
        debug!("bicycle model reset");
        self.state = BicycleState::INITIAL;
    }
}

impl SteppedModel for KinematicBicycle {
    type Input = BicycleInput;
    type State = BicycleState;

    fn sample_time(&self) -> f64 {
        self.params.sample_time
    }

    fn state(&self) -> &BicycleState {
        &self.state
    }

    fn step(&mut self, input: BicycleInput) {
        self.apply(input.v, input.steering);
    }
}
