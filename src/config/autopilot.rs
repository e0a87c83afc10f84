use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::ConfigError;

/// Tuning of the scripted patrol pilot. Speeds in m/s, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    /// How fast the commanded control vector may change, per second
    pub steering_speed: f64,
    /// Throttle band held while patrolling
    pub min_speed: f64,
    pub max_speed: f64,
    /// Speed recovery starts below `recover_speed_min` and lasts until the
    /// forward speed is back above `recover_speed_max`
    pub recover_speed_min: f64,
    pub recover_speed_max: f64,
    /// Ground probe reach beyond the current forward speed [m]
    pub ground_collision_distance: f64,
    /// Probe is pitched this far below the flight path
    pub ground_avoidance_angle: f64,
    pub ground_avoidance_min_speed: f64,
    pub ground_avoidance_max_speed: f64,
    /// Pitch errors whose negation falls below this are wrapped by a full turn
    pub pitch_up_threshold: f64,
    /// Within this angle of the target the pilot yaws instead of rolling
    pub fine_steering_angle: f64,
    pub roll_factor: f64,
    pub yaw_factor: f64,
    /// World-space patrol target; defaults to 1 km ahead of the start pose
    pub patrol_point: Option<Vector3<f64>>,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            steering_speed: 5.0,
            min_speed: 18.0,
            max_speed: 30.0,
            recover_speed_min: 12.0,
            recover_speed_max: 18.0,
            ground_collision_distance: 30.0,
            ground_avoidance_angle: 15.0,
            ground_avoidance_min_speed: 20.0,
            ground_avoidance_max_speed: 30.0,
            pitch_up_threshold: -15.0,
            fine_steering_angle: 15.0,
            roll_factor: 0.01,
            yaw_factor: 0.1,
            patrol_point: None,
        }
    }
}

impl AutopilotConfig {
    pub fn with_patrol_point(mut self, point: Vector3<f64>) -> Self {
        self.patrol_point = Some(point);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.steering_speed.is_finite() || self.steering_speed < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "autopilot.steering_speed must be finite and non-negative, got {}",
                self.steering_speed
            )));
        }
        if self.min_speed > self.max_speed {
            return Err(ConfigError::ValidationError(format!(
                "autopilot.min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            )));
        }
        if self.recover_speed_min > self.recover_speed_max {
            return Err(ConfigError::ValidationError(format!(
                "autopilot.recover_speed_min {} exceeds recover_speed_max {}",
                self.recover_speed_min, self.recover_speed_max
            )));
        }
        if self.ground_collision_distance < 0.0 {
            return Err(ConfigError::ValidationError(
                "autopilot.ground_collision_distance must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
