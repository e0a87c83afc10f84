use bevy::prelude::*;
use nalgebra::{Matrix3, UnitQuaternion, Vector3};

use crate::components::{
    AutopilotController, CollisionComponent, PhysicsComponent, RigidBodyMut, SpatialComponent,
};
use crate::config::{AutopilotConfig, FlightModelConfig};
use crate::flight::FlightModel;
use crate::utils::ConfigError;

/// Everything a flying craft needs to be picked up by [`FlightPlugin`].
///
/// [`FlightPlugin`]: crate::plugins::FlightPlugin
#[derive(Bundle)]
pub struct AircraftBundle {
    pub model: FlightModel,
    pub physics: PhysicsComponent,
    pub spatial: SpatialComponent,
    pub collision: CollisionComponent,
    pub name: Name,
}

impl AircraftBundle {
    /// A craft at `position`/`rotation`, already moving forward at the
    /// configured initial speed. Uses the tricycle collider layout unless
    /// replaced with [`AircraftBundle::with_colliders`].
    pub fn new(
        config: FlightModelConfig,
        mass: f64,
        position: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Result<Self, ConfigError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "mass must be positive, got {mass}"
            )));
        }

        let name = Name::new(config.name.clone());
        let config = if config.landing_gear.is_empty() {
            config.with_landing_gear(CollisionComponent::tricycle_gear())
        } else {
            config
        };

        let mut model = FlightModel::new(config)?;
        let mut physics = PhysicsComponent::new(mass, box_inertia(mass, 5.0, 1.0, 4.0));
        let mut spatial = SpatialComponent::at_pose(position, rotation);
        model.start(&mut RigidBodyMut::new(&mut physics, &mut spatial));

        Ok(Self {
            model,
            physics,
            spatial,
            collision: CollisionComponent::tricycle(5.0, 1.0),
            name,
        })
    }

    pub fn with_inertia(mut self, inertia: Matrix3<f64>) -> Self {
        self.physics = PhysicsComponent::new(self.physics.mass, inertia);
        self
    }

    pub fn with_colliders(mut self, collision: CollisionComponent) -> Self {
        self.collision = collision;
        self
    }

    /// Pair the craft with an autopilot patrolling `config.patrol_point`, or
    /// 1 km straight ahead of the spawn pose when none is set.
    pub fn with_autopilot(self, config: AutopilotConfig) -> (Self, AutopilotController) {
        let patrol_point = config.patrol_point.unwrap_or_else(|| {
            self.spatial.position + self.spatial.attitude * Vector3::z() * 1000.0
        });
        let controller = AutopilotController::new(config.with_patrol_point(patrol_point));
        (self, controller)
    }
}

/// Principal inertia of a uniform box with the given half extents [m].
fn box_inertia(mass: f64, half_x: f64, half_y: f64, half_z: f64) -> Matrix3<f64> {
    let (x2, y2, z2) = (
        (2.0 * half_x).powi(2),
        (2.0 * half_y).powi(2),
        (2.0 * half_z).powi(2),
    );
    Matrix3::from_diagonal(&Vector3::new(
        mass * (y2 + z2) / 12.0,
        mass * (x2 + z2) / 12.0,
        mass * (x2 + y2) / 12.0,
    ))
}
