use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Kinematic state of a rigid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Position in world space [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,

    /// Angular velocity in world space [rad/s]
    pub angular_velocity: Vector3<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl SpatialComponent {
    /// Create a new spatial component with initial values
    pub fn new(
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        attitude: UnitQuaternion<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        Self {
            position,
            velocity,
            attitude,
            angular_velocity,
        }
    }

    /// Linear velocity expressed in the body frame [m/s]
    pub fn velocity_body(&self) -> Vector3<f64> {
        self.attitude.inverse_transform_vector(&self.velocity)
    }

    /// Angular velocity expressed in the body frame [rad/s]
    pub fn angular_velocity_body(&self) -> Vector3<f64> {
        self.attitude
            .inverse_transform_vector(&self.angular_velocity)
    }
}
