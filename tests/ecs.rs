mod common;

use approx::assert_relative_eq;
use common::*;
use droneflight::{
    components::AutopilotMode,
    config::AutopilotConfig,
    plugins::{AircraftCrashedEvent, AircraftResetEvent, ResetRequestEvent},
};
use nalgebra::{UnitQuaternion, Vector3};

#[test]
fn test_aircraft_flies_under_plugin() {
    let mut app = TestAppBuilder::new()
        .with_physics(physics_config(1.0 / 60.0))
        .with_aircraft(
            trainer_config(),
            Vector3::new(0.0, 200.0, 0.0),
            UnitQuaternion::identity(),
        )
        .build();
    let craft = app.first();

    app.run_steps(120);

    let spatial = app.spatial(craft).clone();
    assert_spatial_valid(&spatial);
    assert_telemetry_finite(&app.model(craft).telemetry());
    assert!(app.model(craft).is_alive());
    assert!(spatial.position.z > 20.0, "craft did not move forward: {:?}", spatial.position);
    assert!(!app.collision(craft).has_collided);
}

#[test]
fn test_nose_dive_crashes_and_reset_revives() {
    let mut app = TestAppBuilder::new()
        .with_aircraft(trainer_config(), Vector3::new(0.0, 10.0, 0.0), nose_down(60.0))
        .build();
    let craft = app.first();

    let steps = app.run_until(300, |app| app.model(craft).is_crashed());
    assert!(steps.is_some(), "craft never hit the ground");

    let crashes = app.events::<AircraftCrashedEvent>();
    assert_eq!(crashes.len(), 1);
    assert_eq!(crashes[0].entity, craft);
    assert!(crashes[0].impact_speed > 10.0);
    assert!(app.is_kinematic(craft));
    assert_eq!(app.spatial(craft).velocity, Vector3::zeros());
    assert_position_eq(&app.spatial(craft).position, &crashes[0].point, 1e-9);

    // wrecks neither move nor crash twice
    app.run_steps(10);
    assert_position_eq(&app.spatial(craft).position, &crashes[0].point, 1e-9);
    assert_eq!(app.events::<AircraftCrashedEvent>().len(), 1);

    let position = Vector3::new(0.0, 120.0, 0.0);
    app.send(ResetRequestEvent {
        entity: craft,
        position,
        rotation: UnitQuaternion::identity(),
        speed: 20.0,
    });
    app.step();

    assert!(app.model(craft).is_alive());
    assert!(!app.is_kinematic(craft));
    assert_eq!(app.collision(craft).collision_count, 0);
    assert_position_eq(&app.spatial(craft).position, &position, 1.0);
    assert_eq!(app.events::<AircraftResetEvent>().len(), 1);
}

#[test]
fn test_gear_touchdown_is_not_a_crash() {
    let mut app = TestAppBuilder::new()
        .with_aircraft(
            trainer_config(),
            Vector3::new(0.0, 1.0, 0.0),
            UnitQuaternion::identity(),
        )
        .build();
    let craft = app.first();
    app.spatial_mut(craft).velocity = Vector3::new(0.0, -1.0, 20.0);

    app.step();

    assert!(app.collision(craft).has_collided);
    assert!(app.model(craft).is_alive());
    assert!(app.spatial(craft).position.y >= 1.0 - 1e-9);
    assert!(app.spatial(craft).velocity.y >= 0.0);
    assert!(app.events::<AircraftCrashedEvent>().is_empty());
}

#[test]
fn test_raised_ground_plane_is_respected() {
    let mut app = TestAppBuilder::new()
        .with_ground_height(50.0)
        .with_aircraft(trainer_config(), Vector3::new(0.0, 60.0, 0.0), nose_down(60.0))
        .build();
    let craft = app.first();

    app.run_until(300, |app| app.model(craft).is_crashed())
        .expect("craft never hit the raised ground");

    assert_relative_eq!(app.spatial(craft).position.y, 50.0, epsilon = 1e-9);
}

#[test]
fn test_autopilot_pulls_up_near_ground() {
    let mut app = TestAppBuilder::new()
        .with_autopilot_aircraft(
            trainer_config(),
            Vector3::new(0.0, 10.0, 0.0),
            AutopilotConfig::default(),
        )
        .build();
    let craft = app.first();

    app.step();

    assert_eq!(app.autopilot(craft).mode(), AutopilotMode::AvoidGround);
    assert_relative_eq!(app.model(craft).control_input().x, -1.0);
}

#[test]
fn test_autopilot_patrols_at_altitude() {
    let mut app = TestAppBuilder::new()
        .with_autopilot_aircraft(
            trainer_config(),
            Vector3::new(0.0, 300.0, 0.0),
            AutopilotConfig::default(),
        )
        .build();
    let craft = app.first();

    app.run_steps(240);

    let model = app.model(craft);
    assert!(model.is_alive());
    assert_ne!(app.autopilot(craft).mode(), AutopilotMode::AvoidGround);
    assert_telemetry_finite(&model.telemetry());
    assert_spatial_valid(app.spatial(craft));
}
