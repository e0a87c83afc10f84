use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Alive/crashed state machine of a craft.
///
/// `Alive -> Crashed` on a non-gear collision, `Crashed -> Alive` only via an
/// explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    Crashed,
}

/// Kinematic state observed from the rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// World-space velocity [m/s]
    pub world_velocity: Vector3<f64>,
    /// World-space angular velocity [rad/s]
    pub world_angular_velocity: Vector3<f64>,
    /// Body-frame velocity [m/s]
    pub local_velocity: Vector3<f64>,
    /// Body-frame angular velocity [rad/s]
    pub local_angular_velocity: Vector3<f64>,
    /// Angle of attack in the pitch plane [rad]
    pub angle_of_attack: f64,
    /// Sideslip angle [rad]
    pub angle_of_attack_yaw: f64,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            world_velocity: Vector3::zeros(),
            world_angular_velocity: Vector3::zeros(),
            local_velocity: Vector3::zeros(),
            local_angular_velocity: Vector3::zeros(),
            angle_of_attack: 0.0,
            angle_of_attack_yaw: 0.0,
        }
    }
}

impl FlightState {
    /// Forward airspeed, never negative
    pub fn forward_speed(&self) -> f64 {
        self.local_velocity.z.max(0.0)
    }

    pub fn airspeed(&self) -> f64 {
        self.world_velocity.norm()
    }
}

/// Glide and stall figures derived from the last applied aerodynamic forces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlideMetrics {
    /// |lift| / |drag|, zero when no drag acted
    pub lift_drag_ratio: f64,
    /// Descent rate, positive when sinking [m/s]
    pub sink_rate: f64,
    /// Vertical lift divided by weight
    pub lift_ratio: f64,
    pub stalled: bool,
    /// Bank angle, positive with the right wing down [rad]
    pub bank_angle: f64,
}

impl Default for GlideMetrics {
    fn default() -> Self {
        Self {
            lift_drag_ratio: 0.0,
            sink_rate: 0.0,
            lift_ratio: 0.0,
            stalled: false,
            bank_angle: 0.0,
        }
    }
}

/// Read-only snapshot of everything collaborators may poll after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightTelemetry {
    pub alive: bool,
    pub throttle: f64,
    pub effective_input: Vector3<f64>,
    pub world_velocity: Vector3<f64>,
    pub local_velocity: Vector3<f64>,
    pub local_angular_velocity: Vector3<f64>,
    pub local_g_force: Vector3<f64>,
    pub angle_of_attack: f64,
    pub angle_of_attack_yaw: f64,
    pub load_factor: f64,
    pub glide: GlideMetrics,
}

/// Returned when a collision destroys the craft, for visual damage cues.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashReport {
    pub point: Vector3<f64>,
    pub impact_speed: f64,
}
