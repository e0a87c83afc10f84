use bevy::prelude::*;
use droneflight::{
    components::{AutopilotController, CollisionComponent, PhysicsComponent, SpatialComponent},
    config::{AutopilotConfig, FlightModelConfig, PhysicsConfig},
    flight::FlightModel,
    plugins::{AircraftBundle, FlightPlugin, PhysicsPlugin},
    resources::GroundPlane,
};
use nalgebra::{UnitQuaternion, Vector3};

use super::fixtures::MASS;

struct AircraftSpawn {
    config: FlightModelConfig,
    position: Vector3<f64>,
    rotation: UnitQuaternion<f64>,
    autopilot: Option<AutopilotConfig>,
}

// Builder for creating a test application with customizable configuration
#[derive(Default)]
pub struct TestAppBuilder {
    physics_config: Option<PhysicsConfig>,
    ground_height: f64,
    aircraft: Vec<AircraftSpawn>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.physics_config = Some(config);
        self
    }

    pub fn with_ground_height(mut self, height: f64) -> Self {
        self.ground_height = height;
        self
    }

    pub fn with_aircraft(
        mut self,
        config: FlightModelConfig,
        position: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        self.aircraft.push(AircraftSpawn {
            config,
            position,
            rotation,
            autopilot: None,
        });
        self
    }

    pub fn with_autopilot_aircraft(
        mut self,
        config: FlightModelConfig,
        position: Vector3<f64>,
        autopilot: AutopilotConfig,
    ) -> Self {
        self.aircraft.push(AircraftSpawn {
            config,
            position,
            rotation: UnitQuaternion::identity(),
            autopilot: Some(autopilot),
        });
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        app.add_plugins(MinimalPlugins)
            .add_plugins(PhysicsPlugin::with_config(
                self.physics_config.unwrap_or_default(),
            ))
            .add_plugins(FlightPlugin)
            .insert_resource(GroundPlane::new(self.ground_height));

        let mut aircraft = Vec::new();
        for spawn in self.aircraft {
            let bundle = AircraftBundle::new(spawn.config, MASS, spawn.position, spawn.rotation)
                .expect("valid aircraft");
            let entity = match spawn.autopilot {
                Some(autopilot) => app.world_mut().spawn(bundle.with_autopilot(autopilot)).id(),
                None => app.world_mut().spawn(bundle).id(),
            };
            aircraft.push(entity);
        }

        TestApp { app, aircraft }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
    pub aircraft: Vec<Entity>,
}

impl TestApp {
    /// Run exactly one fixed physics step, independent of wall-clock time.
    pub fn step(&mut self) {
        self.app.world_mut().run_schedule(FixedUpdate);
    }

    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Step until `done` holds, at most `max_steps` times. Returns the number
    /// of steps taken, or `None` if the condition never held.
    pub fn run_until(
        &mut self,
        max_steps: usize,
        mut done: impl FnMut(&TestApp) -> bool,
    ) -> Option<usize> {
        for step in 1..=max_steps {
            self.step();
            if done(self) {
                return Some(step);
            }
        }
        None
    }

    pub fn first(&self) -> Entity {
        self.aircraft[0]
    }

    pub fn model(&self, entity: Entity) -> &FlightModel {
        self.app.world().get::<FlightModel>(entity).expect("flight model")
    }

    pub fn spatial(&self, entity: Entity) -> &SpatialComponent {
        self.app.world().get::<SpatialComponent>(entity).expect("spatial component")
    }

    pub fn spatial_mut(&mut self, entity: Entity) -> Mut<SpatialComponent> {
        self.app
            .world_mut()
            .get_mut::<SpatialComponent>(entity)
            .expect("spatial component")
    }

    pub fn collision(&self, entity: Entity) -> &CollisionComponent {
        self.app.world().get::<CollisionComponent>(entity).expect("collision component")
    }

    pub fn autopilot(&self, entity: Entity) -> &AutopilotController {
        self.app.world().get::<AutopilotController>(entity).expect("autopilot")
    }

    pub fn is_kinematic(&self, entity: Entity) -> bool {
        self.app
            .world()
            .get::<PhysicsComponent>(entity)
            .expect("physics component")
            .kinematic
    }

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    /// Every event of type `E` raised so far. Only `FixedUpdate` runs here,
    /// so event buffers are never swapped out.
    pub fn events<E: Event + Clone>(&self) -> Vec<E> {
        self.app
            .world()
            .resource::<Events<E>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }
}
