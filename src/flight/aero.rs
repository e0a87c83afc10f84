use nalgebra::Vector3;

use crate::components::{CoefficientCurve, DragTable};
use crate::utils::{clamp_magnitude, project_on_plane, rad_to_deg};

/// Force from one lifting surface, body frame [N].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceForce {
    pub lift: Vector3<f64>,
    pub induced_drag: Vector3<f64>,
}

impl SurfaceForce {
    pub fn zero() -> Self {
        Self {
            lift: Vector3::zeros(),
            induced_drag: Vector3::zeros(),
        }
    }

    pub fn total(&self) -> Vector3<f64> {
        self.lift + self.induced_drag
    }

    /// Scale both parts so the combined force stays within `ceiling`.
    pub fn clamped(self, ceiling: f64) -> Self {
        let magnitude = self.total().norm();
        if magnitude <= ceiling || magnitude <= 0.0 {
            return self;
        }
        let scale = ceiling / magnitude;
        Self {
            lift: self.lift * scale,
            induced_drag: self.induced_drag * scale,
        }
    }
}

/// Parameters of one lifting surface.
pub struct Surface<'a> {
    /// Axis the surface spans; the wing spans body X, the rudder body Y
    pub span_axis: Vector3<f64>,
    pub power: f64,
    /// Angle of attack [deg] → lift coefficient
    pub aoa_curve: &'a CoefficientCurve,
    pub induced_drag: f64,
    /// Forward speed [m/s] → induced drag scale
    pub induced_drag_curve: &'a CoefficientCurve,
}

/// Lift and induced drag of a surface at the given angle of attack [rad].
///
/// Only the velocity component perpendicular to the span produces lift.
/// Lift acts perpendicular to that component and the span, induced drag
/// against it and grows with the square of the lift coefficient.
pub fn surface_force(
    local_velocity: &Vector3<f64>,
    angle_of_attack: f64,
    surface: &Surface,
) -> SurfaceForce {
    if local_velocity.norm_squared() < 1.0 {
        return SurfaceForce::zero();
    }

    let lift_velocity = project_on_plane(local_velocity, &surface.span_axis);
    let v2 = lift_velocity.norm_squared();
    let direction = match lift_velocity.try_normalize(1e-9) {
        Some(direction) => direction,
        None => return SurfaceForce::zero(),
    };

    let coefficient = surface.aoa_curve.evaluate(rad_to_deg(angle_of_attack));
    let lift = direction.cross(&surface.span_axis) * v2 * coefficient * surface.power;

    let induced_scale = surface.induced_drag_curve.evaluate(local_velocity.z.max(0.0));
    let induced_drag =
        -direction * v2 * coefficient * coefficient * surface.induced_drag * induced_scale;

    SurfaceForce { lift, induced_drag }
}

/// Parasitic drag opposing the body-frame velocity, clamped to `ceiling` [N].
pub fn parasitic_drag(
    local_velocity: &Vector3<f64>,
    table: &DragTable,
    ceiling: f64,
) -> Vector3<f64> {
    let v2 = local_velocity.norm_squared();
    if v2 < 0.01 {
        return Vector3::zeros();
    }

    let coefficient = table.coefficient(local_velocity).norm();
    let direction = -local_velocity / v2.sqrt();
    clamp_magnitude(&(direction * coefficient * v2), ceiling)
}

/// Quadratic angular damping [rad/s²], body frame.
pub fn angular_drag(local_angular_velocity: &Vector3<f64>, drag: &Vector3<f64>) -> Vector3<f64> {
    let w2 = local_angular_velocity.norm_squared();
    match local_angular_velocity.try_normalize(1e-12) {
        Some(direction) => -(direction * w2).component_mul(drag),
        None => Vector3::zeros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DragConfig, LiftConfig};
    use approx::assert_relative_eq;

    fn wing(config: &LiftConfig) -> Surface<'_> {
        Surface {
            span_axis: Vector3::x(),
            power: config.lift_power,
            aoa_curve: &config.lift_aoa,
            induced_drag: config.induced_drag,
            induced_drag_curve: &config.induced_drag_curve,
        }
    }

    #[test]
    fn test_level_wing_lift_points_up() {
        let config = LiftConfig::default();
        let velocity = Vector3::new(0.0, 0.0, 20.0);

        let force = surface_force(&velocity, 0.0, &wing(&config));

        // coefficient 0.25 at zero angle of attack
        assert_relative_eq!(force.lift, Vector3::new(0.0, 100.0, 0.0), epsilon = 1e-9);
        assert!(force.induced_drag.z < 0.0);
        assert_relative_eq!(force.induced_drag.z, -400.0 * 0.0625 * 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_lift_ignores_spanwise_flow() {
        let config = LiftConfig::default();
        let straight = surface_force(&Vector3::new(0.0, 0.0, 20.0), 0.0, &wing(&config));
        let skidding = surface_force(&Vector3::new(15.0, 0.0, 20.0), 0.0, &wing(&config));
        assert_relative_eq!(straight.lift, skidding.lift, epsilon = 1e-9);
    }

    #[test]
    fn test_surface_force_is_zero_when_slow() {
        let config = LiftConfig::default();
        let force = surface_force(&Vector3::new(0.0, 0.0, 0.9), 0.0, &wing(&config));
        assert_eq!(force, SurfaceForce::zero());
    }

    #[test]
    fn test_rudder_opposes_sideslip() {
        let config = LiftConfig::default();
        let rudder = Surface {
            span_axis: Vector3::y(),
            power: config.rudder_power,
            aoa_curve: &config.rudder_aoa,
            induced_drag: config.induced_drag,
            induced_drag_curve: &config.rudder_induced_drag_curve,
        };
        let velocity: Vector3<f64> = Vector3::new(4.0, 0.0, 20.0);
        let sideslip = velocity.x.atan2(velocity.z);

        let force = surface_force(&velocity, sideslip, &rudder);
        assert!(force.lift.x < 0.0);
    }

    #[test]
    fn test_clamped_keeps_direction() {
        let force = SurfaceForce {
            lift: Vector3::new(0.0, 800.0, 0.0),
            induced_drag: Vector3::new(0.0, 0.0, -600.0),
        };
        let clamped = force.clamped(500.0);
        assert_relative_eq!(clamped.total().norm(), 500.0, epsilon = 1e-9);
        assert_relative_eq!(clamped.lift.y / clamped.induced_drag.z, 800.0 / -600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parasitic_drag_opposes_motion() {
        let drag = DragConfig::default();
        let velocity = Vector3::new(0.0, 0.0, 20.0);
        let force = parasitic_drag(&velocity, &drag.table, drag.drag_ceiling);
        assert_relative_eq!(force, Vector3::new(0.0, 0.0, -0.02 * 400.0), epsilon = 1e-9);

        let still = parasitic_drag(&Vector3::new(0.05, 0.0, 0.0), &drag.table, drag.drag_ceiling);
        assert_eq!(still, Vector3::zeros());
    }

    #[test]
    fn test_parasitic_drag_respects_ceiling() {
        let drag = DragConfig::default();
        let force = parasitic_drag(&Vector3::new(0.0, -150.0, 0.0), &drag.table, drag.drag_ceiling);
        assert_relative_eq!(force.norm(), drag.drag_ceiling, epsilon = 1e-9);
        assert!(force.y > 0.0);
    }

    #[test]
    fn test_angular_drag_damps_rotation() {
        let omega = Vector3::new(2.0, 0.0, 0.0);
        let damping = angular_drag(&omega, &Vector3::new(0.5, 0.5, 0.2));
        assert_relative_eq!(damping, Vector3::new(-2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_eq!(angular_drag(&Vector3::zeros(), &Vector3::new(1.0, 1.0, 1.0)), Vector3::zeros());
    }
}
