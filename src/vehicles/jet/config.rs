use crate::components::controls::ControlsConfig;
use crate::components::forces::MassParameters;
use crate::resources::Environment;
use crate::systems::aerodynamics::{AirfoilConfig, WingSection};
use crate::systems::propulsion::EngineConfig;
use crate::utils::errors::SimError;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Airframe mass model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MassConfig {
    pub empty_mass: f64,
    pub max_fuel: f64,

    /// Isotropic inertia about each body axis [kg m^2]
    pub inertia: f64,

    /// Center of mass in body coordinates [m]
    pub center_of_mass: Vector3<f64>,
}

impl Default for MassConfig {
    fn default() -> Self {
        Self {
            empty_mass: 22500.0,
            max_fuel: 12100.0,
            inertia: 48000.0,
            center_of_mass: Vector3::new(-13.0, 0.0, -0.3),
        }
    }
}

impl MassConfig {
    pub fn mass_parameters(&self, fuel_fraction: f64) -> MassParameters {
        MassParameters::new(
            self.empty_mass,
            fuel_fraction,
            self.max_fuel,
            Matrix3::identity() * self.inertia,
            self.center_of_mass,
        )
    }
}

/// One lifting surface pair. The left root is given, the right side uses
/// the same planform at the mirrored position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Left-side root in body coordinates [m]
    pub root_position: Vector3<f64>,

    /// Leading edge up tilt [deg]
    pub incidence_deg: f64,

    pub sections: Vec<WingSection>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            root_position: Vector3::zeros(),
            incidence_deg: 0.0,
            sections: Vec::new(),
        }
    }
}

/// The twin fins. Both are rolled upright from the wing plane, canted
/// outward by `vshape_deg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VStabilizerConfig {
    /// Left-side root in body coordinates [m]
    pub root_position: Vector3<f64>,

    /// Outward lean from vertical [deg]
    pub vshape_deg: f64,

    pub sections: Vec<WingSection>,
}

impl Default for VStabilizerConfig {
    fn default() -> Self {
        Self {
            root_position: Vector3::new(-17.2, 2.2, 0.0),
            vshape_deg: 0.0,
            sections: vec![
                WingSection {
                    span: 2.0,
                    chord: 2.5,
                    has_aileron: true,
                    ..Default::default()
                },
                WingSection {
                    span: 1.1,
                    chord: 1.4,
                    chordwise_shift: 0.8,
                    ..Default::default()
                },
            ],
        }
    }
}

/// Su-34 planform approximation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub main_wing: SurfaceConfig,
    pub h_stabilizer: SurfaceConfig,
    pub v_stabilizer: VStabilizerConfig,
    pub canard: SurfaceConfig,

    /// Oswald span efficiency shared by every surface
    pub span_efficiency: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            main_wing: SurfaceConfig {
                root_position: Vector3::new(-14.4, 2.25, 0.0),
                incidence_deg: 4.0,
                sections: vec![
                    WingSection {
                        span: 3.0,
                        chord: 4.0,
                        has_aileron: true,
                        has_slat: true,
                        ..Default::default()
                    },
                    WingSection {
                        span: 1.5,
                        chord: 2.8,
                        chordwise_shift: 1.4,
                        has_slat: true,
                        ..Default::default()
                    },
                    WingSection {
                        span: 0.7,
                        chord: 2.1,
                        chordwise_shift: 0.4,
                        ..Default::default()
                    },
                ],
            },
            h_stabilizer: SurfaceConfig {
                root_position: Vector3::new(-19.0, 2.2, -0.9),
                incidence_deg: 2.5,
                sections: vec![WingSection {
                    span: 2.3,
                    chord: 2.3,
                    ..Default::default()
                }],
            },
            v_stabilizer: VStabilizerConfig::default(),
            canard: SurfaceConfig {
                root_position: Vector3::new(-9.4, 1.9, 0.1),
                incidence_deg: 2.5,
                sections: vec![WingSection {
                    span: 1.4,
                    chord: 1.0,
                    ..Default::default()
                }],
            },
            span_efficiency: 0.85,
        }
    }
}

/// Spawn state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub fuel_fraction: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::new(100.0, 0.0, 0.0),
            fuel_fraction: 1.0,
        }
    }
}

/// Everything needed to assemble and fly the jet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JetConfig {
    pub name: String,

    /// Normalized lift curve samples on disk
    pub lift_curve_path: PathBuf,

    pub mass: MassConfig,
    pub engine: EngineConfig,
    pub airfoil: AirfoilConfig,
    pub controls: ControlsConfig,
    pub environment: Environment,
    pub geometry: GeometryConfig,
    pub initial: InitialConditions,
}

impl Default for JetConfig {
    fn default() -> Self {
        Self {
            name: "su34".into(),
            lift_curve_path: PathBuf::from("data/su34_lift_aoa.txt"),
            mass: MassConfig::default(),
            engine: EngineConfig::default(),
            airfoil: AirfoilConfig::default(),
            controls: ControlsConfig::default(),
            environment: Environment::default(),
            geometry: GeometryConfig::default(),
            initial: InitialConditions::default(),
        }
    }
}

impl JetConfig {
    /// Read and validate a YAML config
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SimError> {
        let text = serde_yaml::to_string(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.mass.empty_mass > 0.0) {
            return Err(SimError::InvalidConfig("empty_mass must be positive".into()));
        }
        if self.mass.max_fuel < 0.0 {
            return Err(SimError::InvalidConfig("max_fuel cannot be negative".into()));
        }
        if !(self.mass.inertia > 0.0) {
            return Err(SimError::InvalidConfig("inertia must be positive".into()));
        }
        if !(self.geometry.span_efficiency > 0.0) {
            return Err(SimError::InvalidConfig(
                "span_efficiency must be positive".into(),
            ));
        }
        if !(self.environment.air_density > 0.0) {
            return Err(SimError::InvalidConfig("air_density must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.initial.fuel_fraction) {
            return Err(SimError::InvalidConfig(
                "initial fuel_fraction must lie within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_describe_the_airframe() {
        let config = JetConfig::default();

        assert_relative_eq!(config.mass.empty_mass, 22500.0);
        assert_relative_eq!(config.mass.center_of_mass.x, -13.0);
        assert_eq!(config.geometry.main_wing.sections.len(), 3);
        assert!(config.geometry.main_wing.sections[0].has_aileron);
        assert!(config.geometry.main_wing.sections[1].has_slat);
        assert_relative_eq!(config.geometry.h_stabilizer.root_position.z, -0.9);
        assert!(config.geometry.v_stabilizer.sections[0].has_aileron);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mass_parameters_carry_fuel_state() {
        let config = MassConfig::default();
        let mass = config.mass_parameters(0.5);

        assert_relative_eq!(mass.mass(), 22500.0 + 0.5 * 12100.0);
        assert_relative_eq!(mass.center_of_mass.z, -0.3);
        assert_relative_eq!(mass.inertia[(0, 0)], 48000.0);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "mass:\n  empty_mass: 20000.0\nname: testbed\n";
        let config: JetConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.name, "testbed");
        assert_relative_eq!(config.mass.empty_mass, 20000.0);
        // untouched fields keep their defaults
        assert_relative_eq!(config.mass.max_fuel, 12100.0);
        assert_relative_eq!(config.engine.max_thrust_wet, 245000.0);
    }

    #[test]
    fn test_validation_rejects_bad_numbers() {
        let mut config = JetConfig::default();
        config.mass.empty_mass = 0.0;
        assert!(config.validate().is_err());

        let mut config = JetConfig::default();
        config.environment.air_density = -1.0;
        assert!(config.validate().is_err());

        let mut config = JetConfig::default();
        config.initial.fuel_fraction = 1.5;
        assert!(config.validate().is_err());
    }
}
