use std::fs;
use std::path::Path;

use control::SpeedHoldConfig;
use log::LevelFilter;
use mechanics::{BicycleParams, LongitudinalParams};
use serde::{Deserialize, Serialize};
use simcore::error::{require_finite, require_non_negative, require_positive};
use simcore::{SimError, SimResult};

/// Everything the demo runs, loaded from JSON. Missing fields fall back
/// to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub log_level: String,
    pub drivetrain: LongitudinalParams,
    pub bicycle: BicycleParams,
    /// Length of the throttle-ramp-over-a-hill run (s)
    pub ramp_duration: f64,
    pub cruise_throttle: f64,
    pub cruise_duration: f64,
    pub circle_radius: f64,
    /// Time for one lap of the circle (s)
    pub circle_period: f64,
    pub figure_eight_radius: f64,
    /// Time for both lobes of the figure eight (s)
    pub figure_eight_period: f64,
    pub speed_hold: SpeedHoldConfig,
    /// Speed the closed-loop run holds (m/s)
    pub speed_hold_target: f64,
    pub speed_hold_duration: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            log_level: "info".to_string(),
            drivetrain: LongitudinalParams::default(),
            bicycle: BicycleParams::default(),
            ramp_duration: 20.0,
            cruise_throttle: 0.5,
            cruise_duration: 100.0,
            circle_radius: 10.0,
            circle_period: 20.0,
            figure_eight_radius: 8.0,
            figure_eight_period: 30.0,
            speed_hold: SpeedHoldConfig::default(),
            speed_hold_target: 20.0,
            speed_hold_duration: 200.0,
        }
    }
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Rejects values that would leave a run with NaN or infinite inputs.
    pub fn validate(&self) -> SimResult<()> {
        self.drivetrain.validate()?;
        self.bicycle.validate()?;
        require_non_negative("ramp_duration", self.ramp_duration)?;
        require_finite("cruise_throttle", self.cruise_throttle)?;
        require_non_negative("cruise_duration", self.cruise_duration)?;
        require_positive("circle_period", self.circle_period)?;
        require_positive("figure_eight_period", self.figure_eight_period)?;
        self.require_turnable("circle_radius", self.circle_radius)?;
        self.require_turnable("figure_eight_radius", self.figure_eight_radius)?;
        require_non_negative("speed_hold.kp", self.speed_hold.kp)?;
        require_non_negative("speed_hold.ki", self.speed_hold.ki)?;
        require_non_negative("speed_hold.i_max", self.speed_hold.i_max)?;
        require_non_negative("speed_hold_target", self.speed_hold_target)?;
        require_non_negative("speed_hold_duration", self.speed_hold_duration)?;
        Ok(())
    }

    /// A circle is only reachable when its radius exceeds the rear axle offset.
    fn require_turnable(&self, name: &'static str, radius: f64) -> SimResult<()> {
        require_positive(name, radius)?;
        if radius <= self.bicycle.lr {
            return Err(SimError::InvalidParameter {
                name,
                reason: format!("must exceed bicycle.lr ({}), got {radius}", self.bicycle.lr),
            });
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level.parse().ok()
    }
}

/// Number of fixed steps covering `duration`.
pub fn steps_for(duration: f64, sample_time: f64) -> usize {
    (duration / sample_time).round().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcore::SimError;

    #[test]
    fn test_partial_json_uses_defaults() {
        let scenario = Scenario::from_json(r#"{ "cruise_throttle": 0.3, "bicycle": { "w_max": 0.8 } }"#).unwrap();
        assert_eq!(scenario.cruise_throttle, 0.3);
        assert_eq!(scenario.bicycle.w_max, 0.8);
        assert_eq!(scenario.bicycle.wheelbase, 2.0);
        assert_eq!(scenario.drivetrain, LongitudinalParams::default());
        assert_eq!(scenario.level_filter(), Some(LevelFilter::Info));
    }

    #[test]
    fn test_round_trip() {
        let scenario = Scenario::default();
        let json = serde_json::to_string_pretty(&scenario).unwrap();
        assert_eq!(Scenario::from_json(&json).unwrap(), scenario);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(Scenario::from_json("{ not json"), Err(SimError::Config(_))));
    }

    #[test]
    fn test_rejects_unreachable_circle() {
        let err = Scenario::from_json(r#"{ "circle_radius": 1.0 }"#).unwrap_err();
        match err {
            SimError::InvalidParameter { name, .. } => assert_eq!(name, "circle_radius"),
            other => panic!("expected radius rejection, got {other:?}"),
        }
        // Exactly lr is still a NaN steering angle
        assert!(Scenario::from_json(r#"{ "figure_eight_radius": 1.2 }"#).is_err());
        assert!(Scenario::from_json(r#"{ "circle_radius": 1.3 }"#).is_ok());
    }

    #[test]
    fn test_rejects_zero_periods() {
        assert!(Scenario::from_json(r#"{ "circle_period": 0.0 }"#).is_err());
        assert!(Scenario::from_json(r#"{ "figure_eight_period": 0.0 }"#).is_err());
        assert!(Scenario::from_json(r#"{ "cruise_duration": -1.0 }"#).is_err());
    }

    #[test]
    fn test_rejects_bad_model_params() {
        assert!(Scenario::from_json(r#"{ "drivetrain": { "road": { "mass": 0.0 } } }"#).is_err());
        assert!(Scenario::from_json(r#"{ "bicycle": { "lr": 3.0 } }"#).is_err());
        assert!(Scenario::default().validate().is_ok());
    }

    #[test]
    fn test_steps_for() {
        assert_eq!(steps_for(20.0, 0.01), 2000);
        assert_eq!(steps_for(0.0, 0.01), 0);
    }
}
