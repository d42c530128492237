use super::config::{JetConfig, SurfaceConfig, VStabilizerConfig};
use crate::components::controls::{ControlInputs, ControlState};
use crate::components::forces::{Force, MassParameters};
use crate::components::spatial::SpatialComponent;
use crate::systems::aerodynamics::{
    Airfoil, BodyMotion, Curve, MountedWing, Wing, WingControls, WingMount,
};
use crate::systems::physics::integrate_state;
use crate::systems::propulsion::calculate_engine_outputs;
use crate::utils::errors::SimError;
use crate::utils::math::{deg_to_rad, quaternion_to_euler, rad_to_deg};
use nalgebra::{UnitQuaternion, Vector3};
use std::sync::Arc;

/// The eight lifting panels of the airframe
struct Surfaces {
    main_left: MountedWing,
    main_right: MountedWing,
    h_stab_left: MountedWing,
    h_stab_right: MountedWing,
    v_stab_left: MountedWing,
    v_stab_right: MountedWing,
    canard_left: MountedWing,
    canard_right: MountedWing,
}

/// Deflections resolved for the current tick
struct SurfaceCommands {
    main_left: WingControls,
    main_right: WingControls,
    fins: WingControls,
    fixed: WingControls,
}

/// A twin-engine jet assembled from mirrored wing panels.
///
/// Pitch and roll share the main wing ailerons as elevons, yaw drives the
/// aileron channel of both fins. Slats deploy on their own as the angle
/// of attack rises.
pub struct Jet {
    config: JetConfig,
    spatial: SpatialComponent,
    mass: MassParameters,
    controls: ControlState,
    surfaces: Surfaces,
    debug_forces: Vec<Force>,
}

fn incidence_rotation(incidence_deg: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -deg_to_rad(incidence_deg))
}

fn mirror_y(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, -v.y, v.z)
}

fn surface_pair(
    airfoil: &Arc<Airfoil>,
    surface: &SurfaceConfig,
    span_efficiency: f64,
) -> Result<(MountedWing, MountedWing), SimError> {
    let rotation = incidence_rotation(surface.incidence_deg);
    let left = MountedWing::new(
        Wing::new(airfoil.clone(), surface.sections.clone(), span_efficiency)?,
        WingMount::left(surface.root_position, rotation),
    );
    let right = MountedWing::new(
        Wing::new(airfoil.clone(), surface.sections.clone(), span_efficiency)?,
        WingMount::right(mirror_y(&surface.root_position), rotation),
    );
    Ok((left, right))
}

fn fin_pair(
    airfoil: &Arc<Airfoil>,
    config: &VStabilizerConfig,
    span_efficiency: f64,
) -> Result<(MountedWing, MountedWing), SimError> {
    // both fins are rolled upright and keep the left spanwise sense, so
    // their spans rise instead of mirroring across the fuselage
    let left_roll = UnitQuaternion::from_axis_angle(
        &Vector3::x_axis(),
        deg_to_rad(90.0 - config.vshape_deg),
    );
    let right_roll = UnitQuaternion::from_axis_angle(
        &Vector3::x_axis(),
        deg_to_rad(90.0 + config.vshape_deg),
    );
    let left = MountedWing::new(
        Wing::new(airfoil.clone(), config.sections.clone(), span_efficiency)?,
        WingMount::left(config.root_position, left_roll),
    );
    let right = MountedWing::new(
        Wing::new(airfoil.clone(), config.sections.clone(), span_efficiency)?,
        WingMount::left(mirror_y(&config.root_position), right_roll),
    );
    Ok((left, right))
}

impl Jet {
    /// Assemble from config, loading the lift curve from disk
    pub fn new(config: JetConfig) -> Result<Self, SimError> {
        let curve = Curve::from_file(&config.lift_curve_path)?;
        Self::with_curve(config, curve)
    }

    /// Assemble with an already loaded lift curve
    pub fn with_curve(config: JetConfig, curve: Curve) -> Result<Self, SimError> {
        config.validate()?;

        let airfoil = Arc::new(Airfoil::new(curve, config.airfoil.clone())?);
        let geometry = &config.geometry;

        let (main_left, main_right) =
            surface_pair(&airfoil, &geometry.main_wing, geometry.span_efficiency)?;
        let (h_stab_left, h_stab_right) =
            surface_pair(&airfoil, &geometry.h_stabilizer, geometry.span_efficiency)?;
        let (v_stab_left, v_stab_right) =
            fin_pair(&airfoil, &geometry.v_stabilizer, geometry.span_efficiency)?;
        let (canard_left, canard_right) =
            surface_pair(&airfoil, &geometry.canard, geometry.span_efficiency)?;

        let spatial = SpatialComponent::new(
            config.initial.position,
            config.initial.velocity,
            UnitQuaternion::identity(),
            Vector3::zeros(),
        );
        let mass = config.mass.mass_parameters(config.initial.fuel_fraction);
        log::debug!(
            "assembled jet '{}' ({:.0} kg at full fuel)",
            config.name,
            mass.mass()
        );

        Ok(Self {
            config,
            spatial,
            mass,
            controls: ControlState::default(),
            surfaces: Surfaces {
                main_left,
                main_right,
                h_stab_left,
                h_stab_right,
                v_stab_left,
                v_stab_right,
                canard_left,
                canard_right,
            },
            debug_forces: Vec::new(),
        })
    }

    /// Advance the vehicle by one timestep.
    ///
    /// Controls respond first, then thrust, aerodynamics and gravity are
    /// collected and integrated, and finally the burned fuel leaves the
    /// tank. A zero timestep recomputes forces but moves nothing.
    pub fn step(&mut self, inputs: &ControlInputs, dt: f64) -> Result<(), SimError> {
        inputs.validate()?;
        self.spatial.attitude.renormalize();
        self.controls.advance(inputs, &self.config.controls, dt);

        let motion = BodyMotion {
            linear_velocity: self.spatial.velocity_body(),
            angular_velocity: self.spatial.angular_velocity_body(),
            rotation_origin: self.mass.center_of_mass,
        };

        let engine = calculate_engine_outputs(
            &self.config.engine,
            self.controls.throttle_level,
            self.controls.afterburner,
            self.mass.fuel_fraction,
        );
        let mut forces = vec![engine.force.clone()];

        let commands = self.surface_commands(&motion);
        let air_density = self.config.environment.air_density;
        let panels = [
            (&self.surfaces.main_left, commands.main_left),
            (&self.surfaces.main_right, commands.main_right),
            (&self.surfaces.h_stab_left, commands.fixed),
            (&self.surfaces.h_stab_right, commands.fixed),
            (&self.surfaces.v_stab_left, commands.fins),
            (&self.surfaces.v_stab_right, commands.fins),
            (&self.surfaces.canard_left, commands.fixed),
            (&self.surfaces.canard_right, commands.fixed),
        ];
        for (panel, controls) in panels {
            let panel_forces = panel.calc_forces(&motion, controls, air_density)?;
            forces.extend(panel_forces.gather());
        }

        forces.push(self.config.environment.gravity_force(self.mass.mass()));

        self.debug_forces = forces.clone();
        integrate_state(&mut self.spatial, &self.mass, &forces, dt);

        let burned = engine.fuel_flow * dt;
        if burned > 0.0 && self.mass.max_fuel > 0.0 {
            let before = self.mass.fuel_fraction;
            self.mass.fuel_fraction = (before - burned / self.mass.max_fuel).max(0.0);
            if before > 0.0 && self.mass.fuel_fraction == 0.0 {
                log::warn!("fuel exhausted");
            }
        }

        Ok(())
    }

    fn surface_commands(&self, motion: &BodyMotion) -> SurfaceCommands {
        let config = &self.config.controls;
        let throw = config.surface_throw_deg;

        // elevon mixing shares the main wing ailerons between pitch and roll
        let left_elevon = (self.controls.pitch_down_level + self.controls.roll_right_level) * throw;
        let right_elevon =
            (self.controls.pitch_down_level - self.controls.roll_right_level) * throw;
        let rudder = self.controls.rudder_left_level * throw;

        let flap_deg = if self.controls.flaps_down {
            config.flap_throw_deg
        } else {
            0.0
        };

        // slats follow the body angle of attack
        let velocity = motion.linear_velocity;
        let aoa_deg = -rad_to_deg(velocity.z.atan2(velocity.x));
        let slat_deg = config.slat_deflection(aoa_deg);

        SurfaceCommands {
            main_left: WingControls {
                aileron_deg: left_elevon,
                flap_deg,
                slat_deg,
            },
            main_right: WingControls {
                aileron_deg: right_elevon,
                flap_deg,
                slat_deg,
            },
            fins: WingControls {
                aileron_deg: rudder,
                ..Default::default()
            },
            fixed: WingControls::default(),
        }
    }

    pub fn config(&self) -> &JetConfig {
        &self.config
    }

    pub fn spatial(&self) -> &SpatialComponent {
        &self.spatial
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// Current total mass [kg]
    pub fn mass(&self) -> f64 {
        self.mass.mass()
    }

    pub fn fuel_fraction(&self) -> f64 {
        self.mass.fuel_fraction
    }

    /// Center of mass in world coordinates [m]
    pub fn world_center_of_mass(&self) -> Vector3<f64> {
        self.spatial.position
            + self
                .spatial
                .attitude
                .transform_vector(&self.mass.center_of_mass)
    }

    /// Roll, pitch and yaw [deg]
    pub fn attitude_rpy_deg(&self) -> Vector3<f64> {
        quaternion_to_euler(&self.spatial.attitude).map(rad_to_deg)
    }

    /// Every force applied during the latest step, in the order they were
    /// accumulated
    pub fn debug_forces(&self) -> &[Force] {
        &self.debug_forces
    }
}
