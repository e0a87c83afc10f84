use nalgebra::{UnitQuaternion, Vector3};

use crate::config::LimitsConfig;
use crate::flight::state::GlideMetrics;
use crate::utils::{is_finite_vec, lerp_vec};

const MAX_ANGLE: f64 = 1.57;

/// Pitch-plane angle of attack and sideslip from the body-frame velocity [rad].
///
/// Positive angle of attack means the relative wind comes from below.
/// Both are zero while the craft is nearly still or has no forward/backward
/// component to measure against.
pub fn angle_of_attack(local_velocity: &Vector3<f64>) -> (f64, f64) {
    if local_velocity.norm_squared() < 0.1 || local_velocity.z.abs() < 0.01 {
        return (0.0, 0.0);
    }

    let forward = local_velocity.z.abs();
    let pitch = (-local_velocity.y).atan2(forward).clamp(-MAX_ANGLE, MAX_ANGLE);
    let yaw = local_velocity.x.atan2(forward).clamp(-MAX_ANGLE, MAX_ANGLE);
    (pitch, yaw)
}

/// Smoothed body-frame acceleration estimated from successive velocities.
#[derive(Debug, Clone, PartialEq)]
pub struct GForceEstimator {
    last_velocity: Vector3<f64>,
    local_g_force: Vector3<f64>,
}

impl GForceEstimator {
    pub fn new(velocity: Vector3<f64>) -> Self {
        Self {
            last_velocity: velocity,
            local_g_force: Vector3::zeros(),
        }
    }

    /// Body-frame acceleration [m/s²]
    pub fn local_g_force(&self) -> Vector3<f64> {
        self.local_g_force
    }

    pub fn reset(&mut self, velocity: Vector3<f64>) {
        self.last_velocity = velocity;
        self.local_g_force = Vector3::zeros();
    }

    pub fn update(
        &mut self,
        velocity: Vector3<f64>,
        rotation: &UnitQuaternion<f64>,
        dt: f64,
        crashed: bool,
        limits: &LimitsConfig,
    ) {
        if crashed || !(dt.is_finite() && dt > 0.0) {
            self.reset(velocity);
            return;
        }

        let acceleration = (velocity - self.last_velocity) / dt;
        if is_finite_vec(&velocity) {
            self.last_velocity = velocity;
        }
        if !is_finite_vec(&acceleration) {
            return;
        }

        let limit = limits.g_force_limit;
        let local = rotation
            .inverse_transform_vector(&acceleration)
            .map(|a| a.clamp(-limit, limit));
        self.local_g_force = lerp_vec(&self.local_g_force, &local, limits.g_force_smoothing);
    }
}

/// Load factor (lift / weight) from the pitch rate and airspeed.
///
/// A pull-up (negative pitch rate about the right axis) loads the airframe
/// beyond 1 g; a push-over unloads it.
pub fn load_factor(local_angular_velocity: &Vector3<f64>, speed: f64, gravity: f64) -> f64 {
    let pitch_rate = local_angular_velocity.x;
    if pitch_rate.abs() < 1e-4 || speed < 0.1 || gravity <= 0.0 {
        return 1.0;
    }

    let radius = (speed / pitch_rate.abs()).clamp(5.0, 500.0);
    let sign = if pitch_rate < 0.0 { 1.0 } else { -1.0 };
    let n = 1.0 + sign * speed * speed / (radius * gravity);
    n.clamp(-10.0, 15.0)
}

/// Glide and stall metrics from the last applied world-space lift and drag.
pub fn glide_metrics(
    world_velocity: &Vector3<f64>,
    rotation: &UnitQuaternion<f64>,
    lift: &Vector3<f64>,
    drag: &Vector3<f64>,
    mass: f64,
    limits: &LimitsConfig,
) -> GlideMetrics {
    let drag_magnitude = drag.norm();
    let lift_drag_ratio = if drag_magnitude > 1e-9 {
        lift.norm() / drag_magnitude
    } else {
        0.0
    };

    let weight = mass * limits.gravity;
    let lift_ratio = if weight > 0.0 { lift.y / weight } else { 0.0 };
    let stalled =
        lift_ratio < limits.stall_lift_ratio && world_velocity.norm() > limits.min_lift_speed;

    let right = rotation * Vector3::x();
    let up = rotation * Vector3::y();

    GlideMetrics {
        lift_drag_ratio,
        sink_rate: -world_velocity.y,
        lift_ratio,
        stalled,
        bank_angle: (-right.y).atan2(up.y),
    }
}
