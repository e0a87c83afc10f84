use bevy::prelude::*;

use crate::components::{PhysicsComponent, RigidBodyMut, SpatialComponent};
use crate::config::PhysicsConfig;
use crate::flight::FlightModel;

/// Run one fixed step of every flight model against its own rigid body.
pub fn flight_model_system(
    mut query: Query<(&mut FlightModel, &mut PhysicsComponent, &mut SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;
    for (mut model, mut physics, mut spatial) in query.iter_mut() {
        let mut body = RigidBodyMut::new(&mut physics, &mut spatial);
        model.fixed_step_update(&mut body, dt);
    }
}
