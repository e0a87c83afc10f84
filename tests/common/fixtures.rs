use droneflight::{
    components::{Contact, PhysicsComponent, RigidBodyMut, SpatialComponent},
    config::{FlightModelConfig, PhysicsConfig},
    flight::{CrashReport, FlightModel},
    systems::{calculate_net_loads, integrate_state},
};
use nalgebra::{Matrix3, UnitQuaternion, Vector3};

pub const MASS: f64 = 10.0;
pub const GRAVITY: f64 = 9.81;

/// Default trainer config with a recognisable name.
pub fn trainer_config() -> FlightModelConfig {
    FlightModelConfig {
        name: "test_trainer".to_string(),
        ..Default::default()
    }
}

pub fn physics_config(timestep: f64) -> PhysicsConfig {
    PhysicsConfig {
        timestep,
        ..Default::default()
    }
}

/// Attitude pitched nose-down by `degrees`.
pub fn nose_down(degrees: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), degrees.to_radians())
}

/// One craft on a bare rigid body, stepped the way the ECS host does it.
pub struct Rig {
    pub model: FlightModel,
    pub physics: PhysicsComponent,
    pub spatial: SpatialComponent,
    pub gravity: Vector3<f64>,
}

impl Rig {
    pub fn new(config: FlightModelConfig, position: Vector3<f64>, speed: f64) -> Self {
        let mut rig = Self {
            model: FlightModel::new(config).unwrap(),
            physics: PhysicsComponent::new(MASS, Matrix3::identity() * 2.0),
            spatial: SpatialComponent::default(),
            gravity: Vector3::new(0.0, -GRAVITY, 0.0),
        };
        rig.reset(position, UnitQuaternion::identity(), speed);
        rig
    }

    /// Trainer flying level at `height` and `speed`.
    pub fn level(height: f64, speed: f64) -> Self {
        Self::new(trainer_config(), Vector3::new(0.0, height, 0.0), speed)
    }

    pub fn reset(&mut self, position: Vector3<f64>, rotation: UnitQuaternion<f64>, speed: f64) {
        let mut body = RigidBodyMut::new(&mut self.physics, &mut self.spatial);
        self.model.reset(&mut body, position, rotation, speed);
    }

    pub fn step(&mut self, dt: f64) {
        let mut body = RigidBodyMut::new(&mut self.physics, &mut self.spatial);
        self.model.fixed_step_update(&mut body, dt);

        let net = calculate_net_loads(&self.physics, &self.spatial, &self.gravity);
        self.physics.clear_forces();
        if !self.physics.kinematic {
            integrate_state(&net, &mut self.spatial, dt);
        }
    }

    /// Refresh the model's observed state without advancing time.
    pub fn observe(&mut self) {
        let mut body = RigidBodyMut::new(&mut self.physics, &mut self.spatial);
        self.model.fixed_step_update(&mut body, 0.0);
    }

    pub fn collide(&mut self, contacts: &[Contact]) -> Option<CrashReport> {
        let mut body = RigidBodyMut::new(&mut self.physics, &mut self.spatial);
        self.model.on_collision(&mut body, contacts)
    }

    /// Specific mechanical energy [J/kg].
    pub fn energy(&self) -> f64 {
        0.5 * self.spatial.velocity.norm_squared() + GRAVITY * self.spatial.position.y
    }
}
