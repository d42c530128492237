use crate::utils::constants::MIN_DIRECTION_SPEED;
use crate::utils::math::quaternion_to_euler;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Camera pose holder driven by one of several follow strategies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraComponent {
    pub position: Vector3<f64>,
    pub attitude: UnitQuaternion<f64>,
    pub fov: f32,
    pub znear: f32,
    pub zfar: f32,
    pub mode: CameraMode,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum CameraMode {
    /// Pose is driven externally through `set_pose`
    Free,
    /// Rigid chase offset in the target's body frame, roll kept level
    Fixed { offset: Vector3<f64> },
    /// Pursues the point at `radius` from the target, looking at it
    Follow { radius: f64, stiffness: f64 },
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            position: Vector3::new(-40.0, 0.0, 10.0),
            attitude: UnitQuaternion::identity(),
            fov: 90.0,
            znear: 1.0,
            zfar: 10000.0,
            mode: CameraMode::Fixed {
                offset: Vector3::new(-30.0, 0.0, 10.0),
            },
        }
    }
}

impl CameraComponent {
    pub fn pose(&self) -> (Vector3<f64>, UnitQuaternion<f64>) {
        (self.position, self.attitude)
    }

    pub fn set_pose(&mut self, position: Vector3<f64>, attitude: UnitQuaternion<f64>) {
        self.position = position;
        self.attitude = attitude;
    }

    pub fn with_fixed_offset(mut self, offset: Vector3<f64>) -> Self {
        self.mode = CameraMode::Fixed { offset };
        self
    }

    pub fn with_follow(mut self, radius: f64, stiffness: f64) -> Self {
        self.mode = CameraMode::Follow { radius, stiffness };
        self
    }

    pub fn set_free_mode(&mut self) {
        self.mode = CameraMode::Free;
    }

    /// Advance the pose for this tick from the followed target's pose
    pub fn update(
        &mut self,
        target_position: &Vector3<f64>,
        target_attitude: &UnitQuaternion<f64>,
        dt: f64,
    ) {
        match self.mode {
            CameraMode::Free => {}
            CameraMode::Fixed { offset } => {
                self.position = target_position + target_attitude * offset;
                let rpy = quaternion_to_euler(target_attitude);
                self.attitude = UnitQuaternion::from_euler_angles(0.0, rpy.y, rpy.z);
            }
            CameraMode::Follow { radius, stiffness } => {
                let to_camera = self.position - target_position;
                let approach_dir = if to_camera.norm() > MIN_DIRECTION_SPEED {
                    to_camera.normalize()
                } else {
                    // camera sits on the target, back away along its tail
                    target_attitude * -Vector3::x()
                };
                let chase_point = target_position + approach_dir * radius;
                let blend = 1.0 - (-stiffness * dt).exp();
                self.position += (chase_point - self.position) * blend;

                self.look_at(target_position);
            }
        }
    }

    /// Roll-free look-at; keeps the previous attitude when the direction
    /// degenerates or pitch approaches straight up/down
    fn look_at(&mut self, target: &Vector3<f64>) {
        let to_target = target - self.position;
        if to_target.norm() < MIN_DIRECTION_SPEED {
            return;
        }
        let forward = to_target.normalize();
        if forward.z.abs() > 0.999 {
            return;
        }
        let pitch = -forward.z.asin();
        let yaw = forward.y.atan2(forward.x);
        self.attitude = UnitQuaternion::from_euler_angles(0.0, pitch, yaw);
    }
}
