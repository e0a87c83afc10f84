use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Raycast against the terrain.
pub trait GroundProbe {
    /// Distance along the normalized `direction` to the first ground hit
    /// within `max_distance`, if any.
    fn raycast(
        &self,
        origin: &Vector3<f64>,
        direction: &Vector3<f64>,
        max_distance: f64,
    ) -> Option<f64>;

    /// Ground height below a world position [m]
    fn height_at(&self, position: &Vector3<f64>) -> f64;
}

/// Flat, infinite ground at a fixed height.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlane {
    pub height: f64,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self { height: 0.0 }
    }
}

impl GroundPlane {
    pub fn new(height: f64) -> Self {
        Self { height }
    }
}

impl GroundProbe for GroundPlane {
    fn raycast(
        &self,
        origin: &Vector3<f64>,
        direction: &Vector3<f64>,
        max_distance: f64,
    ) -> Option<f64> {
        let altitude = origin.y - self.height;
        if altitude <= 0.0 {
            return Some(0.0);
        }
        if direction.y >= -1e-9 {
            return None;
        }
        let distance = altitude / -direction.y;
        (distance <= max_distance).then_some(distance)
    }

    fn height_at(&self, _position: &Vector3<f64>) -> f64 {
        self.height
    }
}
