use droneflight::{components::SpatialComponent, flight::FlightTelemetry};
use nalgebra::Vector3;

fn finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Assert that a spatial component's state is valid
#[track_caller]
pub fn assert_spatial_valid(spatial: &SpatialComponent) {
    assert!(finite(&spatial.position), "Position is not finite: {:?}", spatial.position);
    assert!(finite(&spatial.velocity), "Velocity is not finite: {:?}", spatial.velocity);
    assert!(
        finite(&spatial.angular_velocity),
        "Angular velocity is not finite: {:?}",
        spatial.angular_velocity
    );
    assert!(
        (spatial.attitude.as_ref().norm() - 1.0).abs() < 1e-9,
        "Attitude is not normalised"
    );
}

/// Assert that every derived flight property is finite
#[track_caller]
pub fn assert_telemetry_finite(telemetry: &FlightTelemetry) {
    assert!(telemetry.throttle.is_finite(), "Throttle is not finite");
    assert!(finite(&telemetry.effective_input), "Effective input is not finite");
    assert!(finite(&telemetry.world_velocity), "World velocity is not finite");
    assert!(finite(&telemetry.local_velocity), "Local velocity is not finite");
    assert!(
        finite(&telemetry.local_angular_velocity),
        "Local angular velocity is not finite"
    );
    assert!(finite(&telemetry.local_g_force), "G-force is not finite");
    assert!(telemetry.angle_of_attack.is_finite(), "AOA is not finite");
    assert!(telemetry.angle_of_attack_yaw.is_finite(), "Yaw AOA is not finite");
    assert!(telemetry.load_factor.is_finite(), "Load factor is not finite");
    assert!(
        telemetry.glide.lift_drag_ratio.is_finite()
            && telemetry.glide.sink_rate.is_finite()
            && telemetry.glide.lift_ratio.is_finite()
            && telemetry.glide.bank_angle.is_finite(),
        "Glide metrics are not finite: {:?}",
        telemetry.glide
    );
}

/// Assert two positions are equal within tolerance
#[track_caller]
pub fn assert_position_eq(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert!(
        (actual - expected).norm() <= epsilon,
        "Position mismatch: {:?} != {:?} (epsilon {})",
        actual,
        expected,
        epsilon
    );
}
