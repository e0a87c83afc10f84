use crate::components::{ForceMode, NetLoads, PhysicsComponent, ReferenceFrame, SpatialComponent};
use crate::config::PhysicsConfig;
use bevy::prelude::*;
use nalgebra::Vector3;

/// Reduce every queued force and torque to world-frame rates and clear the
/// queues. Kinematic bodies get no loads at all.
pub fn force_calculator_system(
    mut query: Query<(&mut PhysicsComponent, &SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    for (mut physics, spatial) in query.iter_mut() {
        let net = if physics.kinematic {
            NetLoads::default()
        } else {
            calculate_net_loads(&physics, spatial, &config.gravity)
        };
        physics.net = net;
        physics.clear_forces();
    }
}

pub fn calculate_net_loads(
    physics: &PhysicsComponent,
    spatial: &SpatialComponent,
    gravity: &Vector3<f64>,
) -> NetLoads {
    let rotation = spatial.attitude;
    let inverse_mass = if physics.mass > 0.0 { 1.0 / physics.mass } else { 0.0 };

    let mut net = NetLoads {
        acceleration: *gravity,
        ..Default::default()
    };

    for force in &physics.forces {
        let force_inertial = match force.frame {
            ReferenceFrame::Body => rotation * force.vector,
            ReferenceFrame::Inertial => force.vector,
        };

        match force.mode {
            ForceMode::Force => net.acceleration += force_inertial * inverse_mass,
            ForceMode::Acceleration => net.acceleration += force_inertial,
            ForceMode::Impulse => net.velocity_change += force_inertial * inverse_mass,
            ForceMode::VelocityChange => net.velocity_change += force_inertial,
        }
    }

    // Torques are resolved in the body frame, where the inertia tensor lives.
    let omega_body = rotation.inverse_transform_vector(&spatial.angular_velocity);
    let gyro_term = omega_body.cross(&(physics.inertia * omega_body));
    let mut angular_acceleration = -(physics.inertia_inv * gyro_term);
    let mut angular_velocity_change = Vector3::zeros();

    for moment in &physics.moments {
        let moment_body = match moment.frame {
            ReferenceFrame::Body => moment.vector,
            ReferenceFrame::Inertial => rotation.inverse_transform_vector(&moment.vector),
        };

        match moment.mode {
            ForceMode::Force => angular_acceleration += physics.inertia_inv * moment_body,
            ForceMode::Acceleration => angular_acceleration += moment_body,
            ForceMode::Impulse => angular_velocity_change += physics.inertia_inv * moment_body,
            ForceMode::VelocityChange => angular_velocity_change += moment_body,
        }
    }

    net.angular_acceleration = rotation * angular_acceleration;
    net.angular_velocity_change = rotation * angular_velocity_change;
    net
}
