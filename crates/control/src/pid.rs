//! PID controller with integral clamp and output saturation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Integral accumulator magnitude limit (anti-windup)
    pub i_max: f64,
    pub output_min: f64,
    pub output_max: f64,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            i_max: f64::MAX,
            output_min: f64::NEG_INFINITY,
            output_max: f64::INFINITY,
        }
    }
}

impl PidConfig {
    pub fn p(kp: f64) -> Self {
        Self { kp, ..Default::default() }
    }

    pub fn pi(kp: f64, ki: f64) -> Self {
        Self { kp, ki, ..Default::default() }
    }

    pub fn pid(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, ..Default::default() }
    }

    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        self.output_min = min;
        self.output_max = max;
        self
    }

    pub fn with_i_max(mut self, i_max: f64) -> Self {
        self.i_max = i_max;
        self
    }
}

#[derive(Debug, Clone)]
pub struct PidController {
    config: PidConfig,
    integral: f64,
    prev_measurement: Option<f64>,
}

impl PidController {
    pub fn new(config: PidConfig) -> Self {
        Self {
            config,
            integral: 0.0,
            prev_measurement: None,
        }
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_measurement = None;
    }

    /// Control output driving `measurement` toward `setpoint`.
    ///
    /// The derivative acts on the measurement, so setpoint jumps do not kick.
    pub fn update(&mut self, setpoint: f64, measurement: f64, dt: f64) -> f64 {
        let error = setpoint - measurement;

        if dt > 0.0 {
            self.integral = (self.integral + error * dt).clamp(-self.config.i_max, self.config.i_max);
        }

        let derivative = match self.prev_measurement {
            Some(prev) if dt > 0.0 => -(measurement - prev) / dt,
            _ => 0.0,
        };
        self.prev_measurement = Some(measurement);

        let output = self.config.kp * error + self.config.ki * self.integral + self.config.kd * derivative;
        output.clamp(self.config.output_min, self.config.output_max)
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn config(&self) -> &PidConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_p_only_proportional_output() {
        let mut ctrl = PidController::new(PidConfig::p(2.0));
        // error = 6
        assert_abs_diff_eq!(ctrl.update(10.0, 4.0, 0.01), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pi_removes_steady_state_error() {
        let mut ctrl = PidController::new(PidConfig::pi(1.0, 5.0));
        // Integrating plant
        let mut measurement = 0.0;
        let dt = 0.01;
        for _ in 0..500 {
            let output = ctrl.update(10.0, measurement, dt);
            measurement += output * dt;
        }
        assert!((measurement - 10.0).abs() < 1.0, "got {measurement}");
    }

    #[test]
    fn test_anti_windup() {
        let mut ctrl = PidController::new(PidConfig::pi(1.0, 10.0).with_i_max(5.0));
        for _ in 0..100 {
            ctrl.update(100.0, 0.0, 0.1);
        }
        assert!(ctrl.integral().abs() <= 5.0);
    }

    #[test]
    fn test_output_saturation() {
        let mut ctrl = PidController::new(PidConfig::p(100.0).with_limits(-1.0, 1.0));
        assert_eq!(ctrl.update(10.0, 0.0, 0.01), 1.0);
        assert_eq!(ctrl.update(-10.0, 0.0, 0.01), -1.0);
    }

    #[test]
    fn test_no_derivative_kick() {
        let mut ctrl = PidController::new(PidConfig::pid(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(ctrl.update(0.0, 5.0, 0.01), 0.0, epsilon = 1e-12);
        // Setpoint jump with a steady measurement
        assert_abs_diff_eq!(ctrl.update(100.0, 5.0, 0.01), 0.0, epsilon = 1e-12);
        // Measurement rising 0.1 per 0.01 s -> derivative -10
        assert_abs_diff_eq!(ctrl.update(100.0, 5.1, 0.01), -10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut ctrl = PidController::new(PidConfig::pi(1.0, 1.0));
        for _ in 0..10 {
            ctrl.update(10.0, 0.0, 0.1);
        }
        assert!(ctrl.integral() > 0.0);
        ctrl.reset();
        assert_eq!(ctrl.integral(), 0.0);
    }
}
