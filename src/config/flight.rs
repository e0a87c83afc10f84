use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{AxisDirection, ColliderId, CoefficientCurve, DragTable};
use crate::config::loader::load_file;
use crate::utils::ConfigError;

/// Engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrustConfig {
    /// Thrust at full throttle [N]
    pub max_thrust: f64,
    /// Throttle travel per second at full throttle input
    pub throttle_speed: f64,
    /// Hard ceiling on applied thrust [N]
    pub thrust_ceiling: f64,
}

impl Default for ThrustConfig {
    fn default() -> Self {
        Self {
            max_thrust: 80.0,
            throttle_speed: 0.5,
            thrust_ceiling: 100.0,
        }
    }
}

/// Wing and rudder lift parameters. Lift curves are sampled in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftConfig {
    pub lift_power: f64,
    /// Angle of attack [deg] → lift coefficient
    pub lift_aoa: CoefficientCurve,
    pub induced_drag: f64,
    /// Forward speed [m/s] → induced drag scale
    pub induced_drag_curve: CoefficientCurve,
    pub rudder_power: f64,
    /// Sideslip [deg] → side force coefficient
    pub rudder_aoa: CoefficientCurve,
    pub rudder_induced_drag_curve: CoefficientCurve,
    /// Ceiling on the wing force magnitude [N]
    pub lift_ceiling: f64,
    /// Ceiling on the rudder force magnitude [N]
    pub rudder_ceiling: f64,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            lift_power: 1.0,
            lift_aoa: CoefficientCurve::new(&[
                (-90.0, 0.0),
                (-15.0, -0.8),
                (0.0, 0.25),
                (15.0, 1.2),
                (25.0, 0.6),
                (90.0, 0.0),
            ]),
            induced_drag: 0.1,
            induced_drag_curve: CoefficientCurve::new(&[(0.0, 1.0), (100.0, 1.0), (200.0, 0.5)]),
            rudder_power: 0.3,
            rudder_aoa: CoefficientCurve::new(&[
                (-90.0, 0.0),
                (-15.0, -0.8),
                (0.0, 0.0),
                (15.0, 0.8),
                (90.0, 0.0),
            ]),
            rudder_induced_drag_curve: CoefficientCurve::new(&[(0.0, 1.0), (200.0, 1.0)]),
            lift_ceiling: 500.0,
            rudder_ceiling: 200.0,
        }
    }
}

/// Control law parameters. Rates are per axis `(pitch, yaw, roll)` in
/// degrees per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    pub turn_speed: Vector3<f64>,
    pub turn_acceleration: Vector3<f64>,
    /// Forward speed [m/s] → steering authority
    pub steering_curve: CoefficientCurve,
    /// Yaw induced against the roll correction
    pub adverse_yaw: f64,
    /// Yaw rate [deg/s] commanded per degree of sideslip, against it
    pub sideslip_stability: f64,
    /// Multiplier on the combined yaw correction
    pub yaw_damping: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            turn_speed: Vector3::new(60.0, 20.0, 180.0),
            turn_acceleration: Vector3::new(120.0, 40.0, 360.0),
            steering_curve: CoefficientCurve::new(&[(0.0, 0.0), (10.0, 0.5), (30.0, 1.0)]),
            adverse_yaw: 0.05,
            sideslip_stability: 0.5,
            yaw_damping: 1.0,
        }
    }
}

/// Parasitic and rotational drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub table: DragTable,
    /// Angular damping per axis `(pitch, yaw, roll)`
    pub angular_drag: Vector3<f64>,
    /// Ceiling on the parasitic drag magnitude [N]
    pub drag_ceiling: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            table: DragTable::default()
                .with(AxisDirection::Forward, CoefficientCurve::constant(0.02))
                .with(AxisDirection::Back, CoefficientCurve::constant(0.1))
                .with(AxisDirection::Left, CoefficientCurve::constant(0.3))
                .with(AxisDirection::Right, CoefficientCurve::constant(0.3))
                .with(AxisDirection::Up, CoefficientCurve::constant(0.4))
                .with(AxisDirection::Down, CoefficientCurve::constant(0.4)),
            angular_drag: Vector3::new(0.5, 0.5, 0.2),
            drag_ceiling: 1000.0,
        }
    }
}

/// Numerical guards and metric thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// World velocity is clamped to this magnitude when observed [m/s]
    pub max_speed: f64,
    /// Per-axis clamp of the raw acceleration estimate [m/s²]
    pub g_force_limit: f64,
    /// Exponential smoothing factor of the acceleration estimate
    pub g_force_smoothing: f64,
    /// Gravitational acceleration used by load-factor and glide metrics [m/s²]
    pub gravity: f64,
    /// Stall is flagged when vertical lift / weight drops below this ratio
    pub stall_lift_ratio: f64,
    /// ...and the airspeed is above this speed [m/s]
    pub min_lift_speed: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_speed: 200.0,
            g_force_limit: 200.0,
            g_force_smoothing: 0.25,
            gravity: 9.81,
            stall_lift_ratio: 0.5,
            min_lift_speed: 5.0,
        }
    }
}

/// Immutable parameters of one flight model instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightModelConfig {
    pub name: String,
    /// Forward speed given to the body when the model is created [m/s]
    pub initial_speed: f64,
    /// Colliders whose contacts never trigger a crash
    pub landing_gear: Vec<ColliderId>,
    pub thrust: ThrustConfig,
    pub lift: LiftConfig,
    pub steering: SteeringConfig,
    pub drag: DragConfig,
    pub limits: LimitsConfig,
}

impl Default for FlightModelConfig {
    /// Small fixed-wing trainer drone of about 10 kg.
    fn default() -> Self {
        Self {
            name: "trainer".to_string(),
            initial_speed: 20.0,
            landing_gear: Vec::new(),
            thrust: ThrustConfig::default(),
            lift: LiftConfig::default(),
            steering: SteeringConfig::default(),
            drag: DragConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl FlightModelConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_landing_gear(mut self, gear: impl IntoIterator<Item = ColliderId>) -> Self {
        self.landing_gear = gear.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("initial_speed", self.initial_speed),
            ("thrust.max_thrust", self.thrust.max_thrust),
            ("thrust.throttle_speed", self.thrust.throttle_speed),
            ("thrust.thrust_ceiling", self.thrust.thrust_ceiling),
            ("lift.lift_power", self.lift.lift_power),
            ("lift.induced_drag", self.lift.induced_drag),
            ("lift.rudder_power", self.lift.rudder_power),
            ("lift.lift_ceiling", self.lift.lift_ceiling),
            ("lift.rudder_ceiling", self.lift.rudder_ceiling),
            ("steering.yaw_damping", self.steering.yaw_damping),
            ("drag.drag_ceiling", self.drag.drag_ceiling),
            ("limits.g_force_limit", self.limits.g_force_limit),
            ("limits.gravity", self.limits.gravity),
            ("limits.min_lift_speed", self.limits.min_lift_speed),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let vectors = [
            ("steering.turn_speed", &self.steering.turn_speed),
            ("steering.turn_acceleration", &self.steering.turn_acceleration),
            ("drag.angular_drag", &self.drag.angular_drag),
        ];
        for (name, value) in vectors {
            if value.iter().any(|c| !c.is_finite() || *c < 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be finite and non-negative, got {value:?}"
                )));
            }
        }

        if !self.steering.adverse_yaw.is_finite() || !self.steering.sideslip_stability.is_finite() {
            return Err(ConfigError::ValidationError(
                "steering coupling gains must be finite".to_string(),
            ));
        }

        if !self.limits.max_speed.is_finite() || self.limits.max_speed <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "limits.max_speed must be positive, got {}",
                self.limits.max_speed
            )));
        }

        if !(0.0..=1.0).contains(&self.limits.g_force_smoothing) {
            return Err(ConfigError::ValidationError(format!(
                "limits.g_force_smoothing must be within [0, 1], got {}",
                self.limits.g_force_smoothing
            )));
        }

        let curves = [
            ("lift.lift_aoa", &self.lift.lift_aoa),
            ("lift.induced_drag_curve", &self.lift.induced_drag_curve),
            ("lift.rudder_aoa", &self.lift.rudder_aoa),
            ("lift.rudder_induced_drag_curve", &self.lift.rudder_induced_drag_curve),
            ("steering.steering_curve", &self.steering.steering_curve),
        ];
        for (name, curve) in curves {
            if !curve.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} contains non-finite keys"
                )));
            }
        }
        for (direction, curve) in self.drag.table.iter() {
            if !curve.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "drag.table.{direction:?} contains non-finite keys"
                )));
            }
        }

        Ok(())
    }
}
