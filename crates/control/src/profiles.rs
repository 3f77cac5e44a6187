//! Open-loop input profiles used to drive the models.

use log::warn;
use mechanics::BicycleParams;
use serde::{Deserialize, Serialize};
use simcore::{SimContext, SimError, SimResult};

/// An input that depends only on simulation time.
pub trait Profile {
    fn sample(&self, ctx: &SimContext) -> f64;
}

fn check_ordered(name: &'static str, keys: &[f64]) -> SimResult<()> {
    if keys.is_empty() {
        return Err(SimError::InvalidParameter {
            name,
            reason: "needs at least one point".to_string(),
        });
    }
    if keys.iter().any(|k| !k.is_finite()) || keys.windows(2).any(|w| w[1] < w[0]) {
        return Err(SimError::InvalidParameter {
            name,
            reason: "points must be finite and in increasing order".to_string(),
        });
    }
    Ok(())
}

/// Piecewise-linear throttle over time, held flat outside its breakpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrottleRamp {
    /// (time s, throttle)
    points: Vec<(f64, f64)>,
}

impl ThrottleRamp {
    pub fn new(points: Vec<(f64, f64)>) -> SimResult<Self> {
        let times: Vec<f64> = points.iter().map(|p| p.0).collect();
        check_ordered("throttle_ramp", &times)?;
        if points.iter().any(|&(_, u)| !(0.0..=1.0).contains(&u)) {
            warn!("throttle ramp leaves [0, 1]; engine torque will scale past full load");
        }
        Ok(ThrottleRamp { points })
    }

    pub fn constant(throttle: f64) -> Self {
        ThrottleRamp {
            points: vec![(0.0, throttle)],
        }
    }

    pub fn end_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.0)
    }

    pub fn at(&self, t: f64) -> f64 {
        let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for w in self.points.windows(2) {
            let ((t0, u0), (t1, u1)) = (w[0], w[1]);
            if t < t1 {
                return u0 + (u1 - u0) * (t - t0) / (t1 - t0);
            }
        }
        last.1
    }
}

impl Default for ThrottleRamp {
    /// Ramp 0.2 -> 0.5 over 5 s, hold to 15 s, release to zero by 20 s.
    fn default() -> Self {
        ThrottleRamp {
            points: vec![(0.0, 0.2), (5.0, 0.5), (15.0, 0.5), (20.0, 0.0)],
        }
    }
}

impl Profile for ThrottleRamp {
    fn sample(&self, ctx: &SimContext) -> f64 {
        self.at(ctx.t)
    }
}

/// Road incline by distance travelled: piecewise-constant sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclineProfile {
    /// (section start m, incline rad)
    sections: Vec<(f64, f64)>,
}

impl InclineProfile {
    pub fn new(sections: Vec<(f64, f64)>) -> SimResult<Self> {
        let starts: Vec<f64> = sections.iter().map(|s| s.0).collect();
        check_ordered("incline_profile", &starts)?;
        Ok(InclineProfile { sections })
    }

    pub fn flat() -> Self {
        InclineProfile {
            sections: vec![(0.0, 0.0)],
        }
    }

    /// Incline at position `x`. Flat before the first section.
    pub fn at(&self, x: f64) -> f64 {
        self.sections
            .iter()
            .take_while(|(start, _)| *start <= x)
            .last()
            .map_or(0.0, |&(_, alpha)| alpha)
    }
}

impl Default for InclineProfile {
    /// 3 m rise over 60 m, then 9 m over the next 90 m, then level.
    fn default() -> Self {
        InclineProfile {
            sections: vec![
                (0.0, (3.0_f64 / 60.0).atan()),
                (60.0, (9.0_f64 / 90.0).atan()),
                (150.0, 0.0),
            ],
        }
    }
}

/// Piecewise-constant target steering angle over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteeringSchedule {
    /// (segment start s, steering angle rad)
    segments: Vec<(f64, f64)>,
}

impl SteeringSchedule {
    pub fn new(segments: Vec<(f64, f64)>) -> SimResult<Self> {
        let starts: Vec<f64> = segments.iter().map(|s| s.0).collect();
        check_ordered("steering_schedule", &starts)?;
        Ok(SteeringSchedule { segments })
    }

    pub fn straight() -> Self {
        SteeringSchedule {
            segments: vec![(0.0, 0.0)],
        }
    }

    /// Constant steering that holds a circle of `radius`.
    pub fn circle(params: &BicycleParams, radius: f64) -> Self {
        SteeringSchedule {
            segments: vec![(0.0, params.steering_for_radius(radius))],
        }
    }

    /// Left circle for the first half of `period`, right circle for the second.
    pub fn figure_eight(params: &BicycleParams, radius: f64, period: f64) -> Self {
        let delta = params.steering_for_radius(radius);
        SteeringSchedule {
            segments: vec![(0.0, delta), (period / 2.0, -delta)],
        }
    }

    pub fn at(&self, t: f64) -> f64 {
        self.segments
            .iter()
            .take_while(|(start, _)| *start <= t)
            .last()
            .or(self.segments.first())
            .map_or(0.0, |&(_, delta)| delta)
    }
}

impl Profile for SteeringSchedule {
    fn sample(&self, ctx: &SimContext) -> f64 {
        self.at(ctx.t)
    }
}

/// Speed that covers `loops` circles of `radius` in `period` seconds.
pub fn loop_speed(radius: f64, period: f64, loops: f64) -> f64 {
    loops * 2.0 * std::f64::consts::PI * radius / period
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_throttle_ramp() {
        let ramp = ThrottleRamp::default();
        assert_eq!(ramp.at(-1.0), 0.2);
        assert_eq!(ramp.at(0.0), 0.2);
        assert_relative_eq!(ramp.at(2.5), 0.35, epsilon = 1e-12);
        assert_eq!(ramp.at(10.0), 0.5);
        assert_relative_eq!(ramp.at(17.5), 0.25, epsilon = 1e-12);
        assert_eq!(ramp.at(20.0), 0.0);
        assert_eq!(ramp.at(100.0), 0.0);
        assert_eq!(ramp.end_time(), 20.0);
    }

    #[test]
    fn test_throttle_ramp_samples_clock() {
        let ramp = ThrottleRamp::default();
        let ctx = SimContext { dt: 0.01, t: 5.0 };
        assert_eq!(ramp.sample(&ctx), 0.5);
    }

    #[test]
    fn test_ramp_rejects_unordered_points() {
        assert!(ThrottleRamp::new(vec![(1.0, 0.1), (0.5, 0.2)]).is_err());
        assert!(ThrottleRamp::new(vec![]).is_err());
        assert!(ThrottleRamp::new(vec![(0.0, 0.1), (1.0, 1.2)]).is_ok());
    }

    #[test]
    fn test_step_in_ramp() {
        let ramp = ThrottleRamp::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0)]).unwrap();
        assert_eq!(ramp.at(0.99), 0.0);
        assert_eq!(ramp.at(1.5), 1.0);
    }

    #[test]
    fn test_default_incline_by_position() {
        let hill = InclineProfile::default();
        assert_relative_eq!(hill.at(0.0), (0.05_f64).atan(), epsilon = 1e-12);
        assert_relative_eq!(hill.at(59.9), (0.05_f64).atan(), epsilon = 1e-12);
        assert_relative_eq!(hill.at(60.0), (0.1_f64).atan(), epsilon = 1e-12);
        assert_eq!(hill.at(150.0), 0.0);
        assert_eq!(hill.at(1e6), 0.0);
        assert_eq!(hill.at(-5.0), 0.0);
        assert_eq!(InclineProfile::flat().at(42.0), 0.0);
    }

    #[test]
    fn test_figure_eight_schedule() {
        let params = BicycleParams::default();
        let schedule = SteeringSchedule::figure_eight(&params, 8.0, 30.0);
        let delta = params.steering_for_radius(8.0);
        assert_eq!(schedule.at(0.0), delta);
        assert_eq!(schedule.at(14.99), delta);
        assert_eq!(schedule.at(15.0), -delta);
        assert_eq!(schedule.at(29.0), -delta);
    }

    #[test]
    fn test_loop_speed() {
        assert_relative_eq!(loop_speed(8.0, 30.0, 2.0), 16.0 * std::f64::consts::PI / 15.0, epsilon = 1e-12);
    }
}
