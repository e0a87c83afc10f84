use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Component-wise linear interpolation between two vectors
#[inline]
pub fn lerp_vec(start: &Vector3<f64>, end: &Vector3<f64>, factor: f64) -> Vector3<f64> {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Move `value` toward `target` by at most `speed * dt`, keeping the result in `[min, max]`.
pub fn move_to(value: f64, target: f64, speed: f64, dt: f64, min: f64, max: f64) -> f64 {
    let step = (speed * dt).abs();
    let delta = (target - value).clamp(-step, step);
    (value + delta).clamp(min, max)
}

/// Move a vector toward `target` by at most `max_delta` (euclidean distance).
pub fn move_towards(current: &Vector3<f64>, target: &Vector3<f64>, max_delta: f64) -> Vector3<f64> {
    let diff = target - current;
    let dist = diff.norm();
    if dist <= max_delta || dist < f64::EPSILON {
        *target
    } else {
        current + diff / dist * max_delta
    }
}

/// Scale a vector down so its magnitude does not exceed `max`.
pub fn clamp_magnitude(v: &Vector3<f64>, max: f64) -> Vector3<f64> {
    let norm = v.norm();
    if norm > max && norm > 0.0 {
        v * (max / norm)
    } else {
        *v
    }
}

/// Normalized copy of `v`, or zero for a (near) zero vector.
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(1e-12).unwrap_or_else(Vector3::zeros)
}

/// Remove the component of `v` along `normal`.
pub fn project_on_plane(v: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    let n2 = normal.norm_squared();
    if n2 < f64::EPSILON {
        return *v;
    }
    v - normal * (v.dot(normal) / n2)
}

/// Unsigned angle between two vectors in degrees.
pub fn angle_deg(from: &Vector3<f64>, to: &Vector3<f64>) -> f64 {
    let denom = (from.norm_squared() * to.norm_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    rad_to_deg((from.dot(to) / denom).clamp(-1.0, 1.0).acos())
}

/// Angle between two vectors in degrees, signed by the rotation sense around `axis`.
pub fn signed_angle_deg(from: &Vector3<f64>, to: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    let unsigned = angle_deg(from, to);
    let sign = axis.dot(&from.cross(to));
    if sign < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Rotation about the world up axis that keeps only the heading of `rotation`.
///
/// With the nose pointing straight up or down the heading is read from the
/// right wing instead.
pub fn yaw_only(rotation: &UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    let forward = rotation * Vector3::z();
    let yaw = if forward.x.hypot(forward.z) < 1e-6 {
        let right = rotation * Vector3::x();
        (-right.z).atan2(right.x)
    } else {
        forward.x.atan2(forward.z)
    };
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
}

/// Pitch and roll of a body rotation [rad], both wrapped to (-π, π].
///
/// Pitch is positive with the nose below the horizon, roll positive with the
/// right wing raised.
pub fn pitch_and_roll(rotation: &UnitQuaternion<f64>) -> (f64, f64) {
    let forward = rotation * Vector3::z();
    let right = rotation * Vector3::x();
    let up = rotation * Vector3::y();
    let pitch = (-forward.y).atan2((forward.x * forward.x + forward.z * forward.z).sqrt());
    let roll = right.y.atan2(up.y);
    (pitch, roll)
}

/// True when every component of the vector is finite
#[inline]
pub fn is_finite_vec(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}
