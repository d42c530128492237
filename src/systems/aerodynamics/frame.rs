use super::wing::{SectionAirflow, Wing, WingControls, WingForce2D};
use crate::components::forces::{Force, ForceCategory};
use crate::utils::constants::MIN_DIRECTION_SPEED;
use crate::utils::errors::SimError;
use crate::utils::math::{rad_to_deg, safe_normalize};
use nalgebra::{UnitQuaternion, Vector3};

/// Where and how a wing panel hangs on the airframe.
///
/// The panel frame has +X forward, +Y towards the tip of a left wing and
/// +Z up. `position` and `orientation` carry panel coordinates into the
/// frame the body velocities are expressed in. `mirror` flips the spanwise
/// axis, +1.0 for a left panel and -1.0 for a right one. Mirroring through
/// a half-turn in `orientation` instead would negate the computed angle of
/// attack.
#[derive(Debug, Clone, Copy)]
pub struct WingMount {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub mirror: f64,
}

impl WingMount {
    pub fn left(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
            mirror: 1.0,
        }
    }

    pub fn right(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
            mirror: -1.0,
        }
    }
}

/// A force vector with its application point, both in the body frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingForce3D {
    pub force: Vector3<f64>,
    pub origin: Vector3<f64>,
}

#[derive(Debug, Clone)]
pub struct WingForces3D {
    pub sectional_lift: Vec<WingForce3D>,
    pub sectional_drag: Vec<WingForce3D>,
    pub induced_drag: WingForce3D,
}

impl WingForces3D {
    /// Flatten into frame-tagged forces for the force accumulator
    pub fn gather(&self) -> Vec<Force> {
        let mut forces =
            Vec::with_capacity(self.sectional_lift.len() + self.sectional_drag.len() + 1);
        for lift in &self.sectional_lift {
            forces.push(Force::body(lift.force, lift.origin, ForceCategory::Lift));
        }
        for drag in &self.sectional_drag {
            forces.push(Force::body(drag.force, drag.origin, ForceCategory::Drag));
        }
        forces.push(Force::body(
            self.induced_drag.force,
            self.induced_drag.origin,
            ForceCategory::InducedDrag,
        ));
        forces
    }
}

/// Rigid body motion sampled where the wings are evaluated, all three
/// vectors in the same frame as the wing mounts
#[derive(Debug, Clone, Copy)]
pub struct BodyMotion {
    pub linear_velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
    pub rotation_origin: Vector3<f64>,
}

/// Velocity of a point riding on a rotating body
pub fn local_velocity(
    point: Vector3<f64>,
    linear_velocity: Vector3<f64>,
    angular_velocity: Vector3<f64>,
    rotation_origin: Vector3<f64>,
) -> Vector3<f64> {
    linear_velocity + angular_velocity.cross(&(point - rotation_origin))
}

/// Per-section airflow as seen from the mounted panel, plus each
/// section's 3D movement direction
#[derive(Debug, Clone)]
pub struct SectionalAirflow3D {
    pub speed_aoa: Vec<SectionAirflow>,
    pub move_dirs: Vec<Vector3<f64>>,
}

/// A wing panel fixed to an airframe, evaluating its 2D model against the
/// body's motion
#[derive(Debug, Clone)]
pub struct MountedWing {
    wing: Wing,
    mount: WingMount,
}

impl MountedWing {
    pub fn new(wing: Wing, mount: WingMount) -> Self {
        Self { wing, mount }
    }

    pub fn wing(&self) -> &Wing {
        &self.wing
    }

    pub fn mount(&self) -> &WingMount {
        &self.mount
    }

    /// Reduce the body motion to per-section speed and angle of attack.
    ///
    /// Sections with no measurable in-plane flow read as coming dead ahead
    /// at zero angle of attack.
    pub fn sectional_airflow(&self, motion: &BodyMotion) -> SectionalAirflow3D {
        let forward_dir = self.mount.orientation.transform_vector(&Vector3::x());
        let left_dir = self.mount.orientation.transform_vector(&Vector3::y());
        let up_dir = self.mount.orientation.transform_vector(&Vector3::z());

        let sections = self.wing.sections();
        let mut speed_aoa = Vec::with_capacity(sections.len());
        let mut move_dirs = Vec::with_capacity(sections.len());

        let mut cumulative_span = 0.0;
        let mut chordwise_shift = 0.0;
        for section in sections {
            let center_local = Vector3::new(
                -chordwise_shift,
                self.mount.mirror * (cumulative_span + section.span * 0.5),
                0.0,
            );
            let center =
                self.mount.orientation.transform_vector(&center_local) + self.mount.position;

            let section_vel = local_velocity(
                center,
                motion.linear_velocity,
                motion.angular_velocity,
                motion.rotation_origin,
            );
            move_dirs.push(safe_normalize(&section_vel));

            let plane_vel = section_vel - section_vel.dot(&left_dir) * left_dir;
            let airspeed = plane_vel.norm();

            let (cosine_forward, cosine_up) = if airspeed > MIN_DIRECTION_SPEED {
                let dir = plane_vel / airspeed;
                (
                    forward_dir.dot(&dir).clamp(-1.0, 1.0),
                    up_dir.dot(&dir).clamp(-1.0, 1.0),
                )
            } else {
                (1.0, 0.0)
            };
            // a wing moving upwards meets air coming from above, which is
            // a negative angle of attack, so the angle flips
            let aoa_deg = -rad_to_deg(cosine_up.atan2(cosine_forward));

            speed_aoa.push(SectionAirflow {
                speed: airspeed,
                aoa_deg,
            });

            cumulative_span += section.span;
            chordwise_shift += section.chordwise_shift;
        }

        SectionalAirflow3D {
            speed_aoa,
            move_dirs,
        }
    }

    /// Evaluate the panel against the body motion and map the resulting
    /// forces back into the body frame
    pub fn calc_forces(
        &self,
        motion: &BodyMotion,
        controls: WingControls,
        air_density: f64,
    ) -> Result<WingForces3D, SimError> {
        let airflow = self.sectional_airflow(motion);
        let forces = self
            .wing
            .calc_forces(&airflow.speed_aoa, controls, air_density)?;

        // induced drag points against the area weighted movement of the
        // whole panel
        let mut mean_move_dir = Vector3::zeros();
        let mut total_area = 0.0;
        for (section, move_dir) in self.wing.sections().iter().zip(&airflow.move_dirs) {
            let area = section.span * section.chord;
            mean_move_dir += move_dir * area;
            total_area += area;
        }
        mean_move_dir /= total_area;

        let mut sectional_lift = Vec::with_capacity(forces.sectional_lift.len());
        let mut sectional_drag = Vec::with_capacity(forces.sectional_drag.len());
        for i in 0..forces.sectional_lift.len() {
            sectional_lift.push(self.map_force_to_3d(
                &forces.sectional_lift[i],
                false,
                airflow.move_dirs[i],
            ));
            sectional_drag.push(self.map_force_to_3d(
                &forces.sectional_drag[i],
                true,
                airflow.move_dirs[i],
            ));
        }
        let induced_drag = self.map_force_to_3d(&forces.induced_drag, true, mean_move_dir);

        Ok(WingForces3D {
            sectional_lift,
            sectional_drag,
            induced_drag,
        })
    }

    /// Give a planar force its direction and carry its origin into the
    /// body frame. Lift leaves the wing plane perpendicular to the flow,
    /// drag follows the movement direction backwards.
    fn map_force_to_3d(
        &self,
        force: &WingForce2D,
        is_drag: bool,
        move_dir: Vector3<f64>,
    ) -> WingForce3D {
        let left_dir = self.mount.orientation.transform_vector(&Vector3::y());

        let move_dir = safe_normalize(&move_dir);
        let plane_move_dir = move_dir - move_dir.dot(&left_dir) * left_dir;
        let lift_dir = safe_normalize(&plane_move_dir.cross(&left_dir));
        let drag_dir = -move_dir;

        let origin_local = Vector3::new(
            -force.origin_chordwise,
            self.mount.mirror * force.origin_spanwise,
            0.0,
        );

        WingForce3D {
            force: (if is_drag { drag_dir } else { lift_dir }) * force.force,
            origin: self.mount.orientation.transform_vector(&origin_local) + self.mount.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::aerodynamics::{Airfoil, AirfoilConfig, Curve, WingSection};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    /// Lift curve rising linearly to +/-2.4 at +/-15 deg, then falling
    /// back toward +/-1.6 at the domain edges
    fn stalling_curve() -> Curve {
        let samples = (0..=12)
            .map(|i| {
                let x: f64 = -30.0 + i as f64 * 5.0;
                let a = x.abs();
                let magnitude = if a <= 15.0 {
                    a / 15.0 * 2.4
                } else {
                    2.4 - (a - 15.0) / 15.0 * 0.8
                };
                (magnitude.copysign(x) + 2.4) / 4.8
            })
            .collect();
        Curve::new(samples)
    }

    fn unswept_airfoil() -> Arc<Airfoil> {
        let config = AirfoilConfig {
            sweep_deg: 0.0,
            ..Default::default()
        };
        Arc::new(Airfoil::new(stalling_curve(), config).unwrap())
    }

    fn two_section_wing() -> Wing {
        let sections = vec![
            WingSection {
                span: 3.0,
                chord: 4.0,
                ..Default::default()
            },
            WingSection {
                span: 1.5,
                chord: 2.8,
                chordwise_shift: 1.4,
                ..Default::default()
            },
        ];
        Wing::new(unswept_airfoil(), sections, 0.85).unwrap()
    }

    fn still_air(linear_velocity: Vector3<f64>) -> BodyMotion {
        BodyMotion {
            linear_velocity,
            angular_velocity: Vector3::zeros(),
            rotation_origin: Vector3::zeros(),
        }
    }

    #[test]
    fn test_level_flight_reads_zero_aoa() {
        let mounted = MountedWing::new(
            two_section_wing(),
            WingMount::left(Vector3::zeros(), UnitQuaternion::identity()),
        );
        let airflow = mounted.sectional_airflow(&still_air(Vector3::new(100.0, 0.0, 0.0)));

        for section in &airflow.speed_aoa {
            assert_relative_eq!(section.speed, 100.0, epsilon = 1e-9);
            assert_relative_eq!(section.aoa_deg, 0.0, epsilon = 1e-9);
        }
        for move_dir in &airflow.move_dirs {
            assert_relative_eq!(move_dir.x, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_descent_reads_positive_aoa() {
        let mounted = MountedWing::new(
            two_section_wing(),
            WingMount::left(Vector3::zeros(), UnitQuaternion::identity()),
        );

        // sinking at constant attitude, the air comes from below
        let airflow = mounted.sectional_airflow(&still_air(Vector3::new(100.0, 0.0, -10.0)));
        let expected = rad_to_deg((10.0_f64 / 100.0).atan());
        for section in &airflow.speed_aoa {
            assert_relative_eq!(section.aoa_deg, expected, epsilon = 1e-9);
        }

        // climbing flips the sign
        let airflow = mounted.sectional_airflow(&still_air(Vector3::new(100.0, 0.0, 10.0)));
        for section in &airflow.speed_aoa {
            assert_relative_eq!(section.aoa_deg, -expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_roll_rate_splits_aoa_across_sides() {
        let left = MountedWing::new(
            two_section_wing(),
            WingMount::left(Vector3::new(0.0, 2.25, 0.0), UnitQuaternion::identity()),
        );
        let right = MountedWing::new(
            two_section_wing(),
            WingMount::right(Vector3::new(0.0, -2.25, 0.0), UnitQuaternion::identity()),
        );

        let motion = BodyMotion {
            linear_velocity: Vector3::new(100.0, 0.0, 0.0),
            angular_velocity: Vector3::new(0.5, 0.0, 0.0),
            rotation_origin: Vector3::zeros(),
        };

        let left_airflow = left.sectional_airflow(&motion);
        let right_airflow = right.sectional_airflow(&motion);

        for (l, r) in left_airflow.speed_aoa.iter().zip(&right_airflow.speed_aoa) {
            // rising left panel loses incidence, sinking right panel gains it
            assert!(l.aoa_deg < 0.0, "left aoa {}", l.aoa_deg);
            assert!(r.aoa_deg > 0.0, "right aoa {}", r.aoa_deg);
            assert_relative_eq!(l.aoa_deg, -r.aoa_deg, epsilon = 1e-9);
        }

        // the outboard section sees the larger change
        assert!(left_airflow.speed_aoa[1].aoa_deg < left_airflow.speed_aoa[0].aoa_deg);
    }

    #[test]
    fn test_force_directions_in_level_flight() {
        let mounted = MountedWing::new(
            two_section_wing(),
            WingMount::left(Vector3::new(-14.4, 2.25, 0.0), UnitQuaternion::identity()),
        );
        let forces = mounted
            .calc_forces(
                &still_air(Vector3::new(100.0, 0.0, -10.0)),
                WingControls::default(),
                1.225,
            )
            .unwrap();

        for lift in &forces.sectional_lift {
            assert!(lift.force.norm() > 0.0);
            // perpendicular to the flow, mostly upward
            assert!(lift.force.z > lift.force.x.abs());
        }
        for drag in &forces.sectional_drag {
            // opposing the movement direction
            assert!(drag.force.x < 0.0);
            assert!(drag.force.z > 0.0);
        }
        assert!(forces.induced_drag.force.x < 0.0);
    }

    #[test]
    fn test_force_origins_mirror_between_sides() {
        let left = MountedWing::new(
            two_section_wing(),
            WingMount::left(Vector3::new(-14.4, 2.25, 0.0), UnitQuaternion::identity()),
        );
        let right = MountedWing::new(
            two_section_wing(),
            WingMount::right(Vector3::new(-14.4, -2.25, 0.0), UnitQuaternion::identity()),
        );

        let motion = still_air(Vector3::new(100.0, 0.0, -5.0));
        let controls = WingControls::default();
        let left_forces = left.calc_forces(&motion, controls, 1.225).unwrap();
        let right_forces = right.calc_forces(&motion, controls, 1.225).unwrap();

        // root section drag sits at the mid chord of the mount
        assert_relative_eq!(left_forces.sectional_drag[0].origin.x, -14.4);
        assert_relative_eq!(left_forces.sectional_drag[0].origin.y, 2.25 + 1.5);
        assert_relative_eq!(right_forces.sectional_drag[0].origin.y, -2.25 - 1.5);

        // outer section carries its chordwise shift backwards
        assert_relative_eq!(left_forces.sectional_drag[1].origin.x, -14.4 - 1.4);
        assert_relative_eq!(left_forces.sectional_drag[1].origin.y, 2.25 + 3.75);
        assert_relative_eq!(right_forces.sectional_drag[1].origin.y, -2.25 - 3.75);

        for (l, r) in left_forces
            .sectional_lift
            .iter()
            .zip(&right_forces.sectional_lift)
        {
            assert_relative_eq!(l.force.z, r.force.z, epsilon = 1e-9);
            assert_relative_eq!(l.origin.y, -r.origin.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rolled_fin_generates_side_force() {
        let sections = vec![WingSection {
            span: 2.0,
            chord: 2.5,
            ..Default::default()
        }];
        let fin = Wing::new(unswept_airfoil(), sections, 0.85).unwrap();

        // rolled a quarter turn so the panel's up axis points to -Y
        let roll = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::FRAC_PI_2);
        let mounted = MountedWing::new(fin, WingMount::left(Vector3::new(-17.2, 0.0, 2.2), roll));

        // slipping towards +Y, the fin must push back towards -Y
        let forces = mounted
            .calc_forces(
                &still_air(Vector3::new(100.0, 10.0, 0.0)),
                WingControls::default(),
                1.225,
            )
            .unwrap();
        assert!(forces.sectional_lift[0].force.y < 0.0);
        assert!(forces.sectional_lift[0].force.z.abs() < 1e-9);
    }

    #[test]
    fn test_still_air_produces_no_forces() {
        let mounted = MountedWing::new(
            two_section_wing(),
            WingMount::left(Vector3::zeros(), UnitQuaternion::identity()),
        );
        let forces = mounted
            .calc_forces(&still_air(Vector3::zeros()), WingControls::default(), 1.225)
            .unwrap();

        for force in forces.gather() {
            assert_relative_eq!(force.vector.norm(), 0.0);
            assert!(force.vector.x.is_finite());
        }
    }

    #[test]
    fn test_gather_tags_categories() {
        let mounted = MountedWing::new(
            two_section_wing(),
            WingMount::left(Vector3::zeros(), UnitQuaternion::identity()),
        );
        let forces = mounted
            .calc_forces(
                &still_air(Vector3::new(100.0, 0.0, -5.0)),
                WingControls::default(),
                1.225,
            )
            .unwrap();

        let gathered = forces.gather();
        assert_eq!(gathered.len(), 5);
        assert_eq!(
            gathered
                .iter()
                .filter(|f| f.category == ForceCategory::Lift)
                .count(),
            2
        );
        assert_eq!(
            gathered
                .iter()
                .filter(|f| f.category == ForceCategory::InducedDrag)
                .count(),
            1
        );
        assert!(gathered.iter().all(|f| f.point.is_some()));
    }
}
