//! Longitudinal Drivetrain Model
//!
//! Engine torque drives the wheels through a fixed gear, the tire turns
//! wheel slip into a tractive force, and aerodynamic, rolling and grade
//! loads oppose it. State advances by one synchronous forward-Euler step
//! per call.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use simcore::error::{require_finite, require_non_negative, require_positive};
use simcore::{Model, SimResult, SteppedModel, euler};

use crate::driveline::Driveline;
use crate::engine::EngineMap;
use crate::road_load::RoadLoad;
use crate::tire::LongitudinalTire;

/// Physical constants of the vehicle. Not touched by `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongitudinalParams {
    pub engine: EngineMap,
    pub driveline: Driveline,
    pub road: RoadLoad,
    pub tire: LongitudinalTire,
    /// Integration step (s)
    pub sample_time: f64,
}

impl Default for LongitudinalParams {
    fn default() -> Self {
        LongitudinalParams {
            engine: EngineMap::default(),
            driveline: Driveline::default(),
            road: RoadLoad::default(),
            tire: LongitudinalTire::default(),
            sample_time: 0.01,
        }
    }
}

impl LongitudinalParams {
    pub fn validate(&self) -> SimResult<()> {
        require_finite("engine.a0", self.engine.a0)?;
        require_finite("engine.a1", self.engine.a1)?;
        require_finite("engine.a2", self.engine.a2)?;
        require_positive("driveline.gear_ratio", self.driveline.gear_ratio)?;
        require_positive("driveline.effective_radius", self.driveline.effective_radius)?;
        require_positive("driveline.inertia", self.driveline.inertia)?;
        require_positive("road.mass", self.road.mass)?;
        require_non_negative("road.gravity", self.road.gravity)?;
        require_non_negative("road.aero_coefficient", self.road.aero_coefficient)?;
        require_non_negative("road.rolling_coefficient", self.road.rolling_coefficient)?;
        require_positive("tire.stiffness", self.tire.stiffness)?;
        require_positive("tire.max_force", self.tire.max_force)?;
        require_positive("sample_time", self.sample_time)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalState {
    /// Position (m)
    pub x: f64,
    /// Velocity (m/s), assumed non-negative
    pub v: f64,
    /// Acceleration (m/s²)
    pub a: f64,
    /// Engine angular velocity (rad/s)
    pub w_e: f64,
    /// Engine angular acceleration (rad/s²)
    pub w_e_dot: f64,
}

impl LongitudinalState {
    pub const INITIAL: LongitudinalState = LongitudinalState {
        x: 0.0,
        v: 5.0,
        a: 0.0,
        w_e: 100.0,
        w_e_dot: 0.0,
    };
}

impl Default for LongitudinalState {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalInput {
    /// Accelerator command, nominally in [0, 1]. Not clamped.
    pub throttle: f64,
    /// Road incline (rad), positive uphill
    pub alpha: f64,
}

impl LongitudinalInput {
    pub fn new(throttle: f64, alpha: f64) -> Self {
        LongitudinalInput { throttle, alpha }
    }
}

/// Forces and torques for one step, evaluated on the pre-step state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalForces {
    pub aero: f64,
    pub rolling: f64,
    pub grade: f64,
    pub load: f64,
    pub engine_torque: f64,
    pub wheel_speed: f64,
    pub slip_ratio: f64,
    pub tire_force: f64,
    /// Slip ratio outside the linear band
    pub saturated: bool,
}

#[derive(Debug, Clone)]
pub struct LongitudinalModel {
    params: LongitudinalParams,
    state: LongitudinalState,
}

impl LongitudinalModel {
    pub fn new(params: LongitudinalParams) -> SimResult<Self> {
        params.validate()?;
        debug!("longitudinal model created, dt = {}s", params.sample_time);
        Ok(LongitudinalModel {
            params,
            state: LongitudinalState::INITIAL,
        })
    }

    pub fn params(&self) -> &LongitudinalParams {
        &self.params
    }

    pub fn state(&self) -> &LongitudinalState {
        &self.state
    }

    /// Force breakdown for `input` at the current state. Does not mutate.
    pub fn forces(&self, input: LongitudinalInput) -> LongitudinalForces {
        let p = &self.params;
        let LongitudinalState { v, w_e, .. } = self.state;

        let load = p.road.total(v, input.alpha);

        let engine_torque = p.engine.torque(input.throttle, w_e);
        let slip_ratio = LongitudinalTire::slip_ratio(p.driveline.wheel_surface_speed(w_e), v);
        let tire_force = p.tire.force(slip_ratio);

        LongitudinalForces {
            aero: p.road.aerodynamic(v),
            rolling: p.road.rolling(v),
            grade: p.road.grade(input.alpha),
            load,
            engine_torque,
            wheel_speed: p.driveline.wheel_speed(w_e),
            slip_ratio,
            tire_force,
            saturated: LongitudinalTire::is_saturated(slip_ratio),
        }
    }

    /// Advance one sample interval.
    ///
    /// Velocity and engine speed integrate the acceleration values held
    /// from the previous step, not the ones computed here.
    pub fn step(&mut self, throttle: f64, alpha: f64) {
        let input = LongitudinalInput { throttle, alpha };
        let f = self.forces(input);
        let dt = self.params.sample_time;
        let s = self.state;

        trace!(
            "longitudinal step: F_load={:.3} T_e={:.3} s={:.5} F_x={:.3}{}",
            f.load,
            f.engine_torque,
            f.slip_ratio,
            f.tire_force,
            if f.saturated { " (saturated)" } else { "" }
        );

        self.state = LongitudinalState {
            x: euler(s.x, s.v, dt),
            v: euler(s.v, s.a, dt),
            a: (f.tire_force - f.load) / self.params.road.mass,
            w_e: euler(s.w_e, s.w_e_dot, dt),
            w_e_dot: self.params.driveline.engine_acceleration(f.engine_torque, f.load),
        };
    }
}

impl Model for LongitudinalModel {
    fn reset(&mut self) {
        debug!("longitudinal model reset");
        self.state = LongitudinalState::INITIAL;
    }
}

impl SteppedModel for LongitudinalModel {
    type Input = LongitudinalInput;
    type State = LongitudinalState;

    fn sample_time(&self) -> f64 {
        self.params.sample_time
    }

    fn state(&self) -> &LongitudinalState {
        &self.state
    }

    fn step(&mut self, input: LongitudinalInput) {
        LongitudinalModel::step(self, input.throttle, input.alpha);
    }
}
