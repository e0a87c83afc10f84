use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{AutopilotController, AutopilotMode, SpatialComponent};
use crate::config::PhysicsConfig;
use crate::flight::FlightModel;
use crate::resources::{GroundPlane, GroundProbe};
use crate::utils::{
    angle_deg, deg_to_rad, move_towards, normalize_or_zero, pitch_and_roll, rad_to_deg,
    signed_angle_deg,
};

const PATROL_DISTANCE: f64 = 1000.0;

/// Commands the autopilot hands to the flight model for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotCommand {
    pub throttle: f64,
    pub steering: Vector3<f64>,
}

/// Flies every craft that carries an active [`AutopilotController`].
pub fn autopilot_system(
    mut query: Query<(&mut AutopilotController, &mut FlightModel, &SpatialComponent)>,
    ground: Res<GroundPlane>,
    config: Res<PhysicsConfig>,
) {
    for (mut controller, mut model, spatial) in query.iter_mut() {
        let command =
            autopilot_command(&mut controller, &model, spatial, &*ground, config.timestep);
        if let Some(command) = command {
            model.set_throttle_input(command.throttle);
            model.set_control_input(command.steering);
        }
    }
}

/// Decide this step's commands.
///
/// Ground avoidance wins over speed recovery, which wins over patrolling.
/// Returns `None` while the autopilot is disabled or the craft is crashed.
pub fn autopilot_command(
    controller: &mut AutopilotController,
    model: &FlightModel,
    spatial: &SpatialComponent,
    ground: &impl GroundProbe,
    dt: f64,
) -> Option<AutopilotCommand> {
    if !controller.active || model.is_crashed() {
        return None;
    }

    let patrol_point = *controller.patrol_point.get_or_insert_with(|| {
        spatial.position + spatial.attitude * Vector3::z() * PATROL_DISTANCE
    });

    let config = &controller.config;
    let forward_speed = model.state().local_velocity.z;
    let (pitch, roll) = pitch_and_roll(&spatial.attitude);
    let (pitch, roll) = (rad_to_deg(pitch), rad_to_deg(roll));
    let level_roll = (-roll * config.roll_factor).clamp(-1.0, 1.0);

    let probe = probe_direction(
        &model.state().world_velocity,
        &spatial.attitude,
        config.ground_avoidance_angle,
    );
    let reach = (config.ground_collision_distance + forward_speed).max(0.0);

    let ground_ahead = ground.raycast(&spatial.position, &probe, reach).is_some();
    let (mode, throttle, mut steering) = if ground_ahead {
        let throttle = hold_speed(
            forward_speed,
            config.ground_avoidance_min_speed,
            config.ground_avoidance_max_speed,
        );
        (AutopilotMode::AvoidGround, throttle, Vector3::new(-1.0, 0.0, level_roll))
    } else if forward_speed < config.recover_speed_min || controller.recovering_speed {
        controller.recovering_speed = forward_speed < config.recover_speed_max;
        let level_pitch = (-pitch).clamp(-1.0, 1.0);
        (AutopilotMode::RecoverSpeed, 1.0, Vector3::new(level_pitch, 0.0, level_roll))
    } else {
        let throttle = hold_speed(forward_speed, config.min_speed, config.max_speed);
        (AutopilotMode::Patrol, throttle, steer_towards(controller, spatial, &patrol_point, dt))
    };

    if mode != AutopilotMode::Patrol && controller.recovering_speed {
        steering.x = steering.x.clamp(-0.5, 0.5);
    }

    if mode != controller.mode {
        debug!("{}: autopilot {:?} -> {:?}", model.name(), controller.mode, mode);
        controller.mode = mode;
    }

    Some(AutopilotCommand { throttle, steering })
}

/// Probe along the flight path, pitched below it by `angle` degrees.
fn probe_direction(
    velocity: &Vector3<f64>,
    attitude: &UnitQuaternion<f64>,
    angle: f64,
) -> Vector3<f64> {
    let heading = velocity
        .try_normalize(1e-6)
        .filter(|dir| dir.cross(&Vector3::y()).norm_squared() > 1e-9)
        .map(|dir| UnitQuaternion::face_towards(&dir, &Vector3::y()))
        .unwrap_or(*attitude);
    heading * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), deg_to_rad(angle)) * Vector3::z()
}

fn hold_speed(forward_speed: f64, min_speed: f64, max_speed: f64) -> f64 {
    if forward_speed < min_speed {
        1.0
    } else if forward_speed > max_speed {
        -1.0
    } else {
        0.0
    }
}

/// Pitch toward the target, then yaw onto it when nearly aligned or roll
/// toward it otherwise. The command moves toward that target input at
/// `steering_speed` per second.
fn steer_towards(
    controller: &mut AutopilotController,
    spatial: &SpatialComponent,
    target: &Vector3<f64>,
    dt: f64,
) -> Vector3<f64> {
    let config = &controller.config;
    let error = spatial.attitude.inverse_transform_vector(&(target - spatial.position));
    let error_dir = normalize_or_zero(&error);
    let pitch_error = normalize_or_zero(&Vector3::new(0.0, error.y, error.z));
    let roll_error = normalize_or_zero(&Vector3::new(error.x, error.y, 0.0));
    let yaw_error = normalize_or_zero(&Vector3::new(error.x, 0.0, error.z));

    let mut target_input = Vector3::zeros();

    let mut pitch = signed_angle_deg(&Vector3::z(), &pitch_error, &Vector3::x());
    if -pitch < config.pitch_up_threshold {
        pitch += 360.0;
    }
    target_input.x = pitch;

    if angle_deg(&Vector3::z(), &error_dir) < config.fine_steering_angle {
        target_input.y =
            signed_angle_deg(&Vector3::z(), &yaw_error, &Vector3::y()) * config.yaw_factor;
    } else {
        target_input.z =
            signed_angle_deg(&Vector3::y(), &roll_error, &Vector3::z()) * config.roll_factor;
    }

    let target_input = target_input.map(|axis| axis.clamp(-1.0, 1.0));
    let max_delta = config.steering_speed * dt.max(0.0);
    let input = move_towards(&controller.last_input, &target_input, max_delta);
    controller.last_input = input;
    input
}
