use crate::components::{NetLoads, PhysicsComponent, SpatialComponent};
use crate::config::PhysicsConfig;
use bevy::prelude::*;
use nalgebra::UnitQuaternion;

/// Integrate the net loads of every dynamic body over one fixed step.
///
/// Kinematic bodies are left where their owner put them.
pub fn physics_integrator_system(
    mut query: Query<(&mut PhysicsComponent, &mut SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;
    let max_vel = config.max_velocity;
    let max_ang_vel = config.max_angular_velocity;

    for (mut physics, mut spatial) in query.iter_mut() {
        if !physics.kinematic {
            integrate_state(&physics.net, &mut spatial, dt);
            apply_velocity_limits(&mut spatial, max_vel, max_ang_vel);
        }
        physics.net = NetLoads::default();
    }
}

/// Semi-implicit Euler step: instant velocity changes first, then continuous
/// accelerations, then the pose from the updated velocities.
pub fn integrate_state(net: &NetLoads, spatial: &mut SpatialComponent, dt: f64) {
    spatial.velocity += net.velocity_change + net.acceleration * dt;
    spatial.angular_velocity += net.angular_velocity_change + net.angular_acceleration * dt;

    spatial.position += spatial.velocity * dt;

    let rotation = UnitQuaternion::from_scaled_axis(spatial.angular_velocity * dt);
    spatial.attitude = UnitQuaternion::new_normalize((rotation * spatial.attitude).into_inner());
}

/// Applies velocity and angular velocity limits to prevent excessive motion.
fn apply_velocity_limits(
    spatial: &mut SpatialComponent,
    max_velocity: f64,
    max_angular_velocity: f64,
) {
    let velocity_norm = spatial.velocity.norm();
    if velocity_norm > max_velocity {
        spatial.velocity *= max_velocity / velocity_norm;
    }

    let angular_velocity_norm = spatial.angular_velocity.norm();
    if angular_velocity_norm > max_angular_velocity {
        spatial.angular_velocity *= max_angular_velocity / angular_velocity_norm;
    }
}
