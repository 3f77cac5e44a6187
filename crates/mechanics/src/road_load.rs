use serde::{Deserialize, Serialize};

/// Resistive loads acting on the vehicle body.
///
/// Rolling resistance is linearized for forward motion and is not valid
/// for negative speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadLoad {
    /// Vehicle mass (kg)
    pub mass: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Aerodynamic drag coefficient (N·s²/m²), lumped `0.5 * rho * Cd * A`
    pub aero_coefficient: f64,
    /// Linear rolling resistance coefficient (N·s/m)
    pub rolling_coefficient: f64,
}

impl Default for RoadLoad {
    fn default() -> Self {
        RoadLoad {
            mass: 2000.0,
            gravity: 9.81,
            aero_coefficient: 1.36,
            rolling_coefficient: 0.01,
        }
    }
}

impl RoadLoad {
    pub fn aerodynamic(&self, v: f64) -> f64 {
        self.aero_coefficient * v * v
    }

    pub fn rolling(&self, v: f64) -> f64 {
        self.rolling_coefficient * v
    }

    /// Grade force for incline `alpha` (rad), positive uphill.
    pub fn grade(&self, alpha: f64) -> f64 {
        self.mass * self.gravity * alpha.sin()
    }

    pub fn total(&self, v: f64, alpha: f64) -> f64 {
        self.aerodynamic(v) + self.rolling(v) + self.grade(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_road_loads() {
        let load = RoadLoad::default();
        assert_relative_eq!(load.aerodynamic(10.0), 136.0, epsilon = 1e-9);
        assert_relative_eq!(load.rolling(10.0), 0.1, epsilon = 1e-12);
        assert_eq!(load.grade(0.0), 0.0);
        assert_relative_eq!(load.total(10.0, 0.0), 136.1, epsilon = 1e-9);
    }

    #[test]
    fn test_grade_sign() {
        let load = RoadLoad::default();
        let uphill = load.grade(0.05);
        assert!(uphill > 0.0);
        assert_relative_eq!(load.grade(-0.05), -uphill, epsilon = 1e-9);
        assert_relative_eq!(load.grade(std::f64::consts::FRAC_PI_2), 2000.0 * 9.81, epsilon = 1e-9);
    }
}
