//! Driveline - couples the engine to the driven wheels
//!
//! Speeds go from engine to wheel through the gear ratio, and road loads
//! come back to the crankshaft through gear ratio and tire radius.

use serde::{Deserialize, Serialize};

/// Gear ratio, tire radius and lumped inertia between engine and road.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Driveline {
    /// Wheel speed over engine speed (e.g. 0.35 means the wheel turns at 35% of engine speed)
    pub gear_ratio: f64,
    /// Effective rolling radius of the driven tire (m)
    pub effective_radius: f64,
    /// Combined engine and driveline inertia seen at the crankshaft (kg·m²)
    pub inertia: f64,
}

impl Default for Driveline {
    fn default() -> Self {
        Driveline {
            gear_ratio: 0.35,
            effective_radius: 0.3,
            inertia: 10.0,
        }
    }
}

impl Driveline {
    pub fn new(gear_ratio: f64, effective_radius: f64, inertia: f64) -> Self {
        Driveline {
            gear_ratio,
            effective_radius,
            inertia,
        }
    }

    // === Velocity Coupling ===

    /// Wheel angular velocity for a given engine speed (rad/s)
    pub fn wheel_speed(&self, w_e: f64) -> f64 {
        self.gear_ratio * w_e
    }

    /// Linear speed of the tire surface for a given engine speed (m/s)
    pub fn wheel_surface_speed(&self, w_e: f64) -> f64 {
        self.wheel_speed(w_e) * self.effective_radius
    }

    // === Torque Transfer ===

    /// Road load force reflected back to the crankshaft as a torque
    pub fn reflected_load_torque(&self, load_force: f64) -> f64 {
        self.gear_ratio * self.effective_radius * load_force
    }

    /// Engine angular acceleration from engine torque against the reflected load
    pub fn engine_acceleration(&self, engine_torque: f64, load_force: f64) -> f64 {
        (engine_torque - self.reflected_load_torque(load_force)) / self.inertia
    }
}
