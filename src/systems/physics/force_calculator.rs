use crate::components::forces::{Force, ReferenceFrame};
use nalgebra::Vector3;

/// Net force and torque split by reference frame.
///
/// Body-frame contributions stay in the body frame so the torque can be
/// taken about the center of mass before anything is rotated. World-frame
/// forces act through the center of mass and add no torque.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetForces {
    pub body_force: Vector3<f64>,
    pub body_torque: Vector3<f64>,
    pub inertial_force: Vector3<f64>,
}

/// Fold a force list into net force and torque about the center of mass
pub fn calculate_net_forces(forces: &[Force], center_of_mass: &Vector3<f64>) -> NetForces {
    let mut net = NetForces::default();
    for force in forces {
        match force.frame {
            ReferenceFrame::Body => {
                net.body_force += force.vector;
                if let Some(point) = force.point {
                    net.body_torque += (point - center_of_mass).cross(&force.vector);
                }
            }
            ReferenceFrame::Inertial => {
                net.inertial_force += force.vector;
            }
        }
    }
    net
}
