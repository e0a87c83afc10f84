use crate::config::PhysicsConfig;
use crate::resources::GroundPlane;
use crate::systems::physics::{force_calculator_system, physics_integrator_system};
use bevy::prelude::*;

/// Physics simulation stages
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum PhysicsSet {
    ForceCalculation,
    Integration,
}

/// Rigid body host: reduces queued forces and integrates every
/// `PhysicsComponent` + `SpatialComponent` body at a fixed rate.
#[derive(Default)]
pub struct PhysicsPlugin {
    pub config: PhysicsConfig,
}

impl PhysicsPlugin {
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<GroundPlane>();

        // Configure fixed timestep
        app.insert_resource(Time::<Fixed>::from_seconds(self.config.timestep));

        app.configure_sets(
            FixedUpdate,
            (PhysicsSet::ForceCalculation, PhysicsSet::Integration).chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                force_calculator_system.in_set(PhysicsSet::ForceCalculation),
                physics_integrator_system.in_set(PhysicsSet::Integration),
            ),
        );
    }
}
