use serde::{Deserialize, Serialize};

/// Quadratic engine torque map: `T_e = throttle * (a0 + a1*w + a2*w^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineMap {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
}

impl EngineMap {
    pub fn new(a0: f64, a1: f64, a2: f64) -> Self {
        EngineMap { a0, a1, a2 }
    }

    /// Full-throttle torque at engine speed `w_e` (rad/s).
    pub fn full_load_torque(&self, w_e: f64) -> f64 {
        self.a0 + self.a1 * w_e + self.a2 * w_e * w_e
    }

    /// Engine torque for a throttle command. Throttle is not clamped:
    /// values outside [0, 1] scale the torque linearly.
    pub fn torque(&self, throttle: f64, w_e: f64) -> f64 {
        throttle * self.full_load_torque(w_e)
    }
}

impl Default for EngineMap {
    fn default() -> Self {
        EngineMap {
            a0: 400.0,
            a1: 0.1,
            a2: -0.0002,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_torque_scales_with_throttle() {
        let engine = EngineMap::default();
        // 400 + 0.1*100 - 0.0002*100^2 = 408
        assert_relative_eq!(engine.full_load_torque(100.0), 408.0, epsilon = 1e-9);
        assert_relative_eq!(engine.torque(0.5, 100.0), 204.0, epsilon = 1e-9);
        assert_eq!(engine.torque(0.0, 100.0), 0.0);
    }

    #[test]
    fn test_out_of_range_throttle_is_linear() {
        let engine = EngineMap::default();
        assert_relative_eq!(engine.torque(1.5, 100.0), 612.0, epsilon = 1e-9);
        assert_relative_eq!(engine.torque(-0.5, 100.0), -204.0, epsilon = 1e-9);
    }
}
