use super::force_calculator::calculate_net_forces;
use crate::components::forces::{Force, MassParameters};
use crate::components::spatial::SpatialComponent;
use crate::utils::constants::MIN_ANGULAR_SPEED;
use nalgebra::{UnitQuaternion, UnitVector3};

/// Advance a rigid body by one explicit Euler step.
///
/// Accelerations are formed in the body frame, rotated to world space and
/// applied to the world-frame velocities. The attitude update pivots
/// around the center of mass rather than the body origin, so a pure spin
/// leaves the center of mass where it is.
///
/// Zero and negative timesteps leave the state untouched.
pub fn integrate_state(
    spatial: &mut SpatialComponent,
    mass: &MassParameters,
    forces: &[Force],
    dt: f64,
) {
    if dt <= 0.0 {
        return;
    }

    spatial.attitude.renormalize();

    let net = calculate_net_forces(forces, &mass.center_of_mass);
    let total_mass = mass.mass();

    let accel_body = net.body_force / total_mass;
    let ang_accel_body = mass.inertia_inv * net.body_torque;

    let accel =
        spatial.attitude.transform_vector(&accel_body) + net.inertial_force / total_mass;
    let ang_accel = spatial.attitude.transform_vector(&ang_accel_body);

    spatial.velocity += accel * dt;
    spatial.position += spatial.velocity * dt;
    spatial.angular_velocity += ang_accel * dt;

    let angular_speed = spatial.angular_velocity.norm();
    if angular_speed > MIN_ANGULAR_SPEED {
        let axis = UnitVector3::new_normalize(spatial.angular_velocity);
        let d_rot = UnitQuaternion::from_axis_angle(&axis, angular_speed * dt);

        // the body origin is not the pivot, shift the position so the
        // rotation happens around the center of mass
        let com_offset = spatial.attitude.transform_vector(&mass.center_of_mass);
        spatial.position -= d_rot.transform_vector(&com_offset) - com_offset;
        spatial.attitude = d_rot * spatial.attitude;
        spatial.attitude.renormalize();
    }
}
