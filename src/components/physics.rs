use bevy::prelude::*;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// How an applied force or torque changes the motion of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceMode {
    /// Continuous force [N] or torque [N·m], scaled by mass/inertia and dt.
    Force,
    /// Continuous acceleration [m/s², rad/s²], mass independent, scaled by dt.
    Acceleration,
    /// Instant impulse [N·s], scaled by mass/inertia.
    Impulse,
    /// Instant velocity change [m/s, rad/s], mass independent.
    VelocityChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceFrame {
    Body,
    Inertial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub vector: Vector3<f64>,
    pub frame: ReferenceFrame,
    pub mode: ForceMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub vector: Vector3<f64>,
    pub frame: ReferenceFrame,
    pub mode: ForceMode,
}

/// Queued forces and torques reduced to world-frame rates for one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetLoads {
    /// Continuous linear acceleration, gravity included [m/s²]
    pub acceleration: Vector3<f64>,
    /// Instant change of linear velocity [m/s]
    pub velocity_change: Vector3<f64>,
    /// Continuous angular acceleration [rad/s²]
    pub angular_acceleration: Vector3<f64>,
    /// Instant change of angular velocity [rad/s]
    pub angular_velocity_change: Vector3<f64>,
}

impl Default for NetLoads {
    fn default() -> Self {
        Self {
            acceleration: Vector3::zeros(),
            velocity_change: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
            angular_velocity_change: Vector3::zeros(),
        }
    }
}

/// Mass properties and the forces queued for the next integration step.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsComponent {
    pub mass: f64,
    /// Body-frame inertia tensor [kg·m²]
    pub inertia: Matrix3<f64>,
    pub inertia_inv: Matrix3<f64>,
    /// Kinematic bodies are moved only by direct pose writes, never by forces.
    pub kinematic: bool,
    pub forces: Vec<Force>,
    pub moments: Vec<Moment>,
    #[serde(skip)]
    pub net: NetLoads,
}

impl PhysicsComponent {
    pub fn new(mass: f64, inertia: Matrix3<f64>) -> Self {
        let inertia_inv = inertia.try_inverse().unwrap_or(Matrix3::identity());
        Self {
            mass,
            inertia,
            inertia_inv,
            kinematic: false,
            forces: Vec::new(),
            moments: Vec::new(),
            net: NetLoads::default(),
        }
    }

    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    pub fn add_moment(&mut self, moment: Moment) {
        self.moments.push(moment);
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
        self.moments.clear();
    }
}
