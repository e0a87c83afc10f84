use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Configuration for the physics system
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Integration parameters
    pub max_velocity: f64,
    pub max_angular_velocity: f64,
    pub timestep: f64,

    // Force parameters
    pub gravity: Vector3<f64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_velocity: 250.0,        // m/s
            max_angular_velocity: 20.0, // rad/s
            timestep: 1.0 / 60.0,       // 60 Hz
            gravity: Vector3::new(0.0, -9.81, 0.0),
        }
    }
}
