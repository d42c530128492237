use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// A single force contribution with an optional application point.
///
/// Forces without a point act through the center of mass and add no torque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Force {
    pub vector: Vector3<f64>,
    pub point: Option<Vector3<f64>>,
    pub frame: ReferenceFrame,
    pub category: ForceCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReferenceFrame {
    Body,
    Inertial,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ForceCategory {
    Lift,
    Drag,
    InducedDrag,
    Thrust,
    Gravity,
}

impl Force {
    /// Body-frame force applied at a body-frame point
    pub fn body(vector: Vector3<f64>, point: Vector3<f64>, category: ForceCategory) -> Self {
        Self {
            vector,
            point: Some(point),
            frame: ReferenceFrame::Body,
            category,
        }
    }

    /// World-frame force acting through the center of mass
    pub fn inertial(vector: Vector3<f64>, category: ForceCategory) -> Self {
        Self {
            vector,
            point: None,
            frame: ReferenceFrame::Inertial,
            category,
        }
    }
}

/// Mass model: structure plus remaining fuel, with the inertia tensor and
/// the center of mass in body coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassParameters {
    /// Dry mass of the airframe [kg]
    pub empty_mass: f64,

    /// Remaining fuel as a fraction of the full tank [0-1]
    pub fuel_fraction: f64,

    /// Fuel mass at a full tank [kg]
    pub max_fuel: f64,

    /// Inertia tensor in the body frame [kg m^2]
    pub inertia: Matrix3<f64>,

    pub inertia_inv: Matrix3<f64>,

    /// Center of mass in body coordinates [m]
    pub center_of_mass: Vector3<f64>,
}

impl MassParameters {
    pub fn new(
        empty_mass: f64,
        fuel_fraction: f64,
        max_fuel: f64,
        inertia: Matrix3<f64>,
        center_of_mass: Vector3<f64>,
    ) -> Self {
        let inertia_inv = inertia.try_inverse().unwrap_or_else(Matrix3::identity);
        Self {
            empty_mass,
            fuel_fraction,
            max_fuel,
            inertia,
            inertia_inv,
            center_of_mass,
        }
    }

    /// Current total mass [kg]
    pub fn mass(&self) -> f64 {
        self.empty_mass + self.fuel_fraction * self.max_fuel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mass_tracks_fuel() {
        let mut mass = MassParameters::new(
            22500.0,
            1.0,
            12100.0,
            Matrix3::identity() * 48000.0,
            Vector3::zeros(),
        );
        assert_relative_eq!(mass.mass(), 34600.0);

        mass.fuel_fraction = 0.5;
        assert_relative_eq!(mass.mass(), 28550.0);

        mass.fuel_fraction = 0.0;
        assert_relative_eq!(mass.mass(), 22500.0);
    }

    #[test]
    fn test_inertia_inverse_cached() {
        let mass = MassParameters::new(
            1000.0,
            0.0,
            0.0,
            Matrix3::identity() * 48000.0,
            Vector3::zeros(),
        );
        let expected = Matrix3::identity() / 48000.0;
        assert_relative_eq!(mass.inertia_inv, expected, epsilon = 1e-12);
    }
}
