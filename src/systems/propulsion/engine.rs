use crate::components::forces::{Force, ForceCategory};
use crate::utils::math::deg_to_rad;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Turbofan pair modelled as one thrust vector at the combined nozzle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Combined military thrust [N]
    pub max_thrust_dry: f64,

    /// Combined afterburning thrust [N]
    pub max_thrust_wet: f64,

    /// Upward tilt of the thrust line [deg]
    pub incidence_deg: f64,

    /// Thrust application point in body coordinates [m]
    pub center_of_thrust: Vector3<f64>,

    /// Fuel burned per newton second of dry thrust [kg/(N s)]
    pub sfc_dry: f64,

    /// Fuel burned per newton second in afterburner [kg/(N s)]
    pub sfc_wet: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_thrust_dry: 153000.0,
            max_thrust_wet: 245000.0,
            incidence_deg: 2.5,
            center_of_thrust: Vector3::new(-20.0, 0.0, -0.8),
            sfc_dry: 1.9e-5,
            sfc_wet: 5.4e-5,
        }
    }
}

/// Thrust force and the fuel flow it costs
#[derive(Debug, Clone)]
pub struct EngineOutputs {
    pub force: Force,
    /// Fuel mass leaving the tank [kg/s]
    pub fuel_flow: f64,
}

/// Thrust for the current throttle setting.
///
/// A dry tank produces no thrust and burns nothing.
pub fn calculate_engine_outputs(
    config: &EngineConfig,
    throttle: f64,
    afterburner: bool,
    fuel_fraction: f64,
) -> EngineOutputs {
    let (max_thrust, sfc) = if afterburner {
        (config.max_thrust_wet, config.sfc_wet)
    } else {
        (config.max_thrust_dry, config.sfc_dry)
    };

    let thrust = if fuel_fraction > 0.0 {
        throttle.clamp(0.0, 1.0) * max_thrust
    } else {
        0.0
    };

    // negative angle about +Y pitches the thrust line up
    let incidence =
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -deg_to_rad(config.incidence_deg));
    let vector = incidence.transform_vector(&Vector3::x()) * thrust;

    EngineOutputs {
        force: Force::body(vector, config.center_of_thrust, ForceCategory::Thrust),
        fuel_flow: thrust * sfc,
    }
}
