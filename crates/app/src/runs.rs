//! The demo runs. Each builds a fresh model from the scenario, drives it
//! with a profile or controller and returns the recorded trajectory.

use control::{
    InclineProfile, Profile, SpeedHold, SteeringSchedule, SteeringTracker, ThrottleRamp, loop_speed,
};
use log::info;
use mechanics::{
    BicycleInput, BicycleState, KinematicBicycle, LongitudinalInput, LongitudinalModel,
    LongitudinalState, SteeringCommand,
};
use simcore::{FixedTimestepRunner, SimResult, Trajectory};

use crate::scenario::{Scenario, steps_for};

/// Ramped throttle over the default hill, incline looked up by position.
pub fn drivetrain_ramp(scenario: &Scenario) -> SimResult<Trajectory<LongitudinalState>> {
    let model = LongitudinalModel::new(scenario.drivetrain)?;
    let ramp = ThrottleRamp::default();
    let hill = InclineProfile::default();
    let steps = steps_for(scenario.ramp_duration, model.params().sample_time);

    let mut runner = FixedTimestepRunner::new(model);
    let traj = runner.run_recorded(steps, |ctx, state| {
        LongitudinalInput::new(ramp.sample(ctx), hill.at(state.x))
    });
    if let Some(last) = traj.last() {
        info!(
            "drivetrain ramp: {:.1} s, x = {:.1} m, v = {:.2} m/s",
            last.t, last.state.x, last.state.v
        );
    }
    Ok(traj)
}

/// Constant throttle on flat ground until the speed settles.
pub fn drivetrain_cruise(scenario: &Scenario) -> SimResult<Trajectory<LongitudinalState>> {
    let model = LongitudinalModel::new(scenario.drivetrain)?;
    let steps = steps_for(scenario.cruise_duration, model.params().sample_time);
    let throttle = ThrottleRamp::constant(scenario.cruise_throttle);

    let mut runner = FixedTimestepRunner::new(model);
    let traj = runner.run_recorded(steps, |ctx, _| LongitudinalInput::new(throttle.sample(ctx), 0.0));
    if let Some(last) = traj.last() {
        info!(
            "drivetrain cruise at throttle {}: v = {:.3} m/s, a = {:.2e} m/s^2",
            scenario.cruise_throttle, last.state.v, last.state.a
        );
    }
    Ok(traj)
}

/// Closed-loop speed hold on flat ground, fed one frame at a time through
/// the runner's accumulator.
pub fn drivetrain_speed_hold(scenario: &Scenario) -> SimResult<Trajectory<LongitudinalState>> {
    let model = LongitudinalModel::new(scenario.drivetrain)?;
    let dt = model.params().sample_time;
    let steps = steps_for(scenario.speed_hold_duration, dt);
    let mut hold = SpeedHold::new(scenario.speed_hold, scenario.speed_hold_target);

    let mut runner = FixedTimestepRunner::new(model);
    let mut traj = Trajectory::with_capacity(steps + 1);
    traj.record(runner.time(), *runner.model.state());
    for _ in 0..steps {
        let input = hold.input(runner.model.state(), 0.0, dt);
        runner.advance(dt, input);
        traj.record(runner.time(), *runner.model.state());
    }

    let peak = traj.channel(|s| s.v).into_iter().fold(f64::NEG_INFINITY, f64::max);
    if let Some(last) = traj.last() {
        info!(
            "drivetrain speed hold at {} m/s: v = {:.3} m/s, peak {:.3} m/s",
            hold.target(),
            last.state.v,
            peak
        );
    }
    Ok(traj)
}

/// One lap of a circle in steering-angle mode.
pub fn bicycle_circle(scenario: &Scenario) -> SimResult<Trajectory<BicycleState>> {
    let model = KinematicBicycle::new(scenario.bicycle)?;
    let schedule = SteeringSchedule::circle(model.params(), scenario.circle_radius);
    let v = loop_speed(scenario.circle_radius, scenario.circle_period, 1.0);
    let steps = steps_for(scenario.circle_period, model.params().sample_time);

    let mut runner = FixedTimestepRunner::new(model);
    let traj = runner.run_recorded(steps, |ctx, _| BicycleInput {
        v,
        steering: SteeringCommand::Angle(schedule.sample(ctx)),
    });
    if let Some(last) = traj.last() {
        info!(
            "bicycle circle: closed at ({:.3}, {:.3}) m, heading {:.3} rad",
            last.state.xc, last.state.yc, last.state.theta
        );
    }
    Ok(traj)
}

/// Figure eight in steering-rate mode, tracking the schedule under the rate limit.
pub fn bicycle_figure_eight(scenario: &Scenario) -> SimResult<Trajectory<BicycleState>> {
    let model = KinematicBicycle::new(scenario.bicycle)?;
    let params = *model.params();
    let schedule =
        SteeringSchedule::figure_eight(&params, scenario.figure_eight_radius, scenario.figure_eight_period);
    let v = loop_speed(scenario.figure_eight_radius, scenario.figure_eight_period, 2.0);
    let steps = steps_for(scenario.figure_eight_period, params.sample_time);
    let mut tracker = SteeringTracker::for_params(&params);

    let mut runner = FixedTimestepRunner::new(model);
    let traj = runner.run_recorded(steps, |ctx, state| BicycleInput {
        v,
        steering: tracker.follow(&schedule, ctx, state.delta),
    });
    if let Some(last) = traj.last() {
        info!(
            "bicycle figure eight: ended {:.3} m from start",
            last.state.xc.hypot(last.state.yc)
        );
    }
    Ok(traj)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> Scenario {
        Scenario {
            ramp_duration: 1.0,
            cruise_duration: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_drivetrain_runs_record_every_step() {
        let traj = drivetrain_ramp(&short()).unwrap();
        assert_eq!(traj.len(), 101);
        assert_eq!(traj.first().unwrap().state, LongitudinalState::INITIAL);
        assert!(traj.last().unwrap().state.x > 0.0);

        let traj = drivetrain_cruise(&short()).unwrap();
        assert_eq!(traj.len(), 101);
    }

    #[test]
    fn test_speed_hold_run_settles_on_target() {
        let scenario = Scenario::default();
        let traj = drivetrain_speed_hold(&scenario).unwrap();
        assert_eq!(traj.len(), 20_001);

        let end = traj.last().unwrap();
        assert!((end.t - 200.0).abs() < 1e-6, "clock at {}", end.t);
        let tail = &traj.channel(|s| s.v)[18_000..];
        assert!(tail.iter().all(|v| (v - 20.0).abs() < 0.05), "ended at {}", end.state.v);
    }

    #[test]
    fn test_circle_run_closes() {
        let traj = bicycle_circle(&Scenario::default()).unwrap();
        let end = traj.last().unwrap().state;
        assert!(end.xc.hypot(end.yc) < 0.05, "ended at ({}, {})", end.xc, end.yc);
    }

    #[test]
    fn test_figure_eight_run_respects_rate_limit() {
        let scenario = Scenario::default();
        let traj = bicycle_figure_eight(&scenario).unwrap();
        let limit = scenario.bicycle.w_max * scenario.bicycle.sample_time;
        let deltas = traj.channel(|s| s.delta);
        assert!(deltas.windows(2).all(|w| (w[1] - w[0]).abs() <= limit + 1e-12));
    }

    #[test]
    fn test_bad_params_fail_the_run() {
        let mut scenario = short();
        scenario.bicycle.wheelbase = -1.0;
        assert!(bicycle_circle(&scenario).is_err());
    }
}
