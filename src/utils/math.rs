use crate::utils::constants::MIN_DIRECTION_SPEED;
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

/// Cubic Hermite blend rising from 0 at `edge0` to 1 at `edge1`
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn move_toward(current: f64, target: f64, max_delta: f64) -> f64 {
    current + (target - current).clamp(-max_delta, max_delta)
}

/// Normalize a vector, collapsing near-zero input to the zero vector
pub fn safe_normalize(v: &Vector3<f64>) -> Vector3<f64> {
    if v.norm() > MIN_DIRECTION_SPEED {
        v.normalize()
    } else {
        Vector3::zeros()
    }
}

/// Convert a quaternion to Euler angles (roll, pitch, yaw)
pub fn quaternion_to_euler(quat: &UnitQuaternion<f64>) -> Vector3<f64> {
    let (roll, pitch, yaw) = quat.euler_angles();
    Vector3::new(roll, pitch, yaw)
}
