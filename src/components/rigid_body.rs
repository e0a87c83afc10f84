use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{
    Force, ForceMode, Moment, PhysicsComponent, ReferenceFrame, SpatialComponent,
};

/// Capability surface of the rigid body a flight model drives.
///
/// Forces and torques are additive and only take effect when the host
/// integrates the body; pose and velocity writes are immediate.
pub trait RigidBody {
    fn mass(&self) -> f64;
    fn position(&self) -> Vector3<f64>;
    fn rotation(&self) -> UnitQuaternion<f64>;
    /// World-space linear velocity [m/s]
    fn linear_velocity(&self) -> Vector3<f64>;
    /// World-space angular velocity [rad/s]
    fn angular_velocity(&self) -> Vector3<f64>;
    fn is_kinematic(&self) -> bool;

    fn set_position(&mut self, position: Vector3<f64>);
    fn set_rotation(&mut self, rotation: UnitQuaternion<f64>);
    fn set_linear_velocity(&mut self, velocity: Vector3<f64>);
    fn set_angular_velocity(&mut self, angular_velocity: Vector3<f64>);
    fn set_kinematic(&mut self, kinematic: bool);

    /// Queue a world-space force
    fn add_force(&mut self, force: Vector3<f64>, mode: ForceMode);
    /// Queue a world-space torque
    fn add_torque(&mut self, torque: Vector3<f64>, mode: ForceMode);

    /// Queue a body-frame force
    fn add_relative_force(&mut self, force: Vector3<f64>, mode: ForceMode) {
        let world = self.rotation() * force;
        self.add_force(world, mode);
    }

    /// Queue a body-frame torque
    fn add_relative_torque(&mut self, torque: Vector3<f64>, mode: ForceMode) {
        let world = self.rotation() * torque;
        self.add_torque(world, mode);
    }
}

/// Mutable view over the ECS components that make up a rigid body.
pub struct RigidBodyMut<'a> {
    pub physics: &'a mut PhysicsComponent,
    pub spatial: &'a mut SpatialComponent,
}

impl<'a> RigidBodyMut<'a> {
    pub fn new(physics: &'a mut PhysicsComponent, spatial: &'a mut SpatialComponent) -> Self {
        Self { physics, spatial }
    }
}

impl RigidBody for RigidBodyMut<'_> {
    fn mass(&self) -> f64 {
        self.physics.mass
    }

    fn position(&self) -> Vector3<f64> {
        self.spatial.position
    }

    fn rotation(&self) -> UnitQuaternion<f64> {
        self.spatial.attitude
    }

    fn linear_velocity(&self) -> Vector3<f64> {
        self.spatial.velocity
    }

    fn angular_velocity(&self) -> Vector3<f64> {
        self.spatial.angular_velocity
    }

    fn is_kinematic(&self) -> bool {
        self.physics.kinematic
    }

    fn set_position(&mut self, position: Vector3<f64>) {
        self.spatial.position = position;
    }

    fn set_rotation(&mut self, rotation: UnitQuaternion<f64>) {
        self.spatial.attitude = rotation;
    }

    fn set_linear_velocity(&mut self, velocity: Vector3<f64>) {
        self.spatial.velocity = velocity;
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vector3<f64>) {
        self.spatial.angular_velocity = angular_velocity;
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.physics.kinematic = kinematic;
        if kinematic {
            self.physics.clear_forces();
        }
    }

    fn add_force(&mut self, force: Vector3<f64>, mode: ForceMode) {
        if self.physics.kinematic {
            return;
        }
        self.physics.add_force(Force {
            vector: force,
            frame: ReferenceFrame::Inertial,
            mode,
        });
    }

    fn add_torque(&mut self, torque: Vector3<f64>, mode: ForceMode) {
        if self.physics.kinematic {
            return;
        }
        self.physics.add_moment(Moment {
            vector: torque,
            frame: ReferenceFrame::Inertial,
            mode,
        });
    }

    fn add_relative_force(&mut self, force: Vector3<f64>, mode: ForceMode) {
        if self.physics.kinematic {
            return;
        }
        self.physics.add_force(Force {
            vector: force,
            frame: ReferenceFrame::Body,
            mode,
        });
    }

    fn add_relative_torque(&mut self, torque: Vector3<f64>, mode: ForceMode) {
        if self.physics.kinematic {
            return;
        }
        self.physics.add_moment(Moment {
            vector: torque,
            frame: ReferenceFrame::Body,
            mode,
        });
    }
}
