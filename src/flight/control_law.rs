use nalgebra::Vector3;

use crate::config::SteeringConfig;
use crate::utils::rad_to_deg;

const YAW: usize = 1;
const ROLL: usize = 2;

/// Result of one control law step. Axes are `(pitch, yaw, roll)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringOutput {
    /// Angular velocity change to apply this step [deg/s]
    pub correction: Vector3<f64>,
    /// Largest correction allowed this step [deg/s]
    pub limit: Vector3<f64>,
    /// Commanded angular velocity [deg/s]
    pub target: Vector3<f64>,
    /// Command plus rate-error feedback, within [-1, 1]
    pub effective_input: Vector3<f64>,
}

/// Rate-limited tracking of commanded turn rates.
///
/// The commanded rate per axis is the control input scaled by the turn rate
/// and the steering authority at the current forward speed. The correction
/// closes the gap to the commanded rate but never by more than the turn
/// acceleration allows this step.
pub fn steer(
    control_input: &Vector3<f64>,
    local_angular_velocity: &Vector3<f64>,
    forward_speed: f64,
    sideslip: f64,
    dt: f64,
    config: &SteeringConfig,
) -> SteeringOutput {
    let authority = config.steering_curve.evaluate(forward_speed.max(0.0)).max(0.0);
    let step = dt.max(0.0);

    let target = control_input.component_mul(&config.turn_speed) * authority;
    let current = local_angular_velocity.map(rad_to_deg);
    let error = target - current;
    let limit = config.turn_acceleration * authority * step;

    let mut correction = Vector3::from_fn(|axis, _| error[axis].clamp(-limit[axis], limit[axis]));

    let yaw = (correction[YAW]
        + config.adverse_yaw * correction[ROLL]
        + config.sideslip_stability * rad_to_deg(sideslip))
        * config.yaw_damping;
    correction[YAW] = yaw.clamp(-limit[YAW], limit[YAW]);

    let effective_input = Vector3::from_fn(|axis, _| {
        let acceleration = config.turn_acceleration[axis];
        let feedback = if acceleration > 0.0 {
            (error[axis] / acceleration).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        (control_input[axis] + feedback).clamp(-1.0, 1.0)
    });

    SteeringOutput {
        correction,
        limit,
        target,
        effective_input,
    }
}
