use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

/// Ask for a craft to be put back in the air.
#[derive(Event, Debug, Clone)]
pub struct ResetRequestEvent {
    pub entity: Entity,
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
    /// Forward speed along the new nose direction [m/s]
    pub speed: f64,
}

/// A craft hit something with its airframe.
#[derive(Event, Debug, Clone)]
pub struct AircraftCrashedEvent {
    pub entity: Entity,
    pub point: Vector3<f64>,
    pub impact_speed: f64,
}

/// A craft was reset; visual damage cues should be cleared.
#[derive(Event, Debug, Clone)]
pub struct AircraftResetEvent {
    pub entity: Entity,
}
