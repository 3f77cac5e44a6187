use serde::{Deserialize, Serialize};

/// How the tire force behaves once the slip ratio leaves the linear band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaturationPolicy {
    /// `F_max` for any `|s| >= 1`, whatever the sign of `s`.
    #[default]
    Unsigned,
    /// `sign(s) * F_max` for `|s| >= 1`.
    Signed,
}

/// Linear-then-saturated longitudinal tire law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongitudinalTire {
    /// Force per unit slip in the linear band (N)
    pub stiffness: f64,
    /// Force once saturated (N)
    pub max_force: f64,
    pub saturation: SaturationPolicy,
}

impl Default for LongitudinalTire {
    fn default() -> Self {
        LongitudinalTire {
            stiffness: 10_000.0,
            max_force: 10_000.0,
            saturation: SaturationPolicy::Unsigned,
        }
    }
}

impl LongitudinalTire {
    pub fn new(stiffness: f64, max_force: f64) -> Self {
        LongitudinalTire {
            stiffness,
            max_force,
            saturation: SaturationPolicy::default(),
        }
    }

    pub fn with_saturation(mut self, saturation: SaturationPolicy) -> Self {
        self.saturation = saturation;
        self
    }

    /// Slip ratio `(surface_speed - v) / v`.
    ///
    /// A vehicle exactly at rest has no slip-driven force, so `v == 0`
    /// yields zero slip instead of a division by zero.
    pub fn slip_ratio(surface_speed: f64, v: f64) -> f64 {
        if v == 0.0 {
            return 0.0;
        }
        (surface_speed - v) / v
    }

    pub fn force(&self, slip_ratio: f64) -> f64 {
        if slip_ratio.abs() < 1.0 {
            return self.stiffness * slip_ratio;
        }
        match self.saturation {
            SaturationPolicy::Unsigned => self.max_force,
            SaturationPolicy::Signed => self.max_force.copysign(slip_ratio),
        }
    }

    pub fn is_saturated(slip_ratio: f64) -> bool {
        slip_ratio.abs() >= 1.0
    }
}
