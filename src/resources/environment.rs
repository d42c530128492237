use crate::components::forces::{Force, ForceCategory};
use crate::utils::constants::{GRAVITY, SEA_LEVEL_AIR_DENSITY};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Uniform atmosphere and gravity field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Air density [kg/m^3]
    pub air_density: f64,

    /// Gravitational acceleration in world coordinates [m/s^2]
    pub gravity: Vector3<f64>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            air_density: SEA_LEVEL_AIR_DENSITY,
            gravity: Vector3::new(0.0, 0.0, -GRAVITY),
        }
    }
}

impl Environment {
    /// Weight of the given mass, acting through the center of mass
    pub fn gravity_force(&self, mass: f64) -> Force {
        Force::inertial(self.gravity * mass, ForceCategory::Gravity)
    }
}
