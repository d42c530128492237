use super::airfoil::Airfoil;
use crate::utils::errors::SimError;
use crate::utils::math::deg_to_rad;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;

/// One spanwise panel of a wing, described in the wing's own 2D plane
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WingSection {
    pub span: f64,
    pub chord: f64,

    /// Backward shift relative to the previous section
    pub chordwise_shift: f64,

    pub has_aileron: bool,
    /// Cannot be paired with `has_aileron`
    pub has_flap: bool,
    pub has_slat: bool,
}

impl Default for WingSection {
    fn default() -> Self {
        Self {
            span: 0.0,
            chord: 0.0,
            chordwise_shift: 0.0,
            has_aileron: false,
            has_flap: false,
            has_slat: false,
        }
    }
}

/// Incident airflow at one section, already reduced to the wing plane
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionAirflow {
    pub speed: f64,
    pub aoa_deg: f64,
}

/// Surface deflections applied to the sections that carry them
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WingControls {
    pub aileron_deg: f64,
    pub flap_deg: f64,
    pub slat_deg: f64,
}

/// A force magnitude with its application point in the wing plane.
///
/// Spanwise grows towards the tip, chordwise towards the trailing edge,
/// with zero at the mid chord of the root section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WingForce2D {
    pub force: f64,
    pub origin_spanwise: f64,
    pub origin_chordwise: f64,
}

#[derive(Debug, Clone, Default)]
pub struct WingForces {
    pub sectional_lift: Vec<WingForce2D>,
    pub sectional_drag: Vec<WingForce2D>,
    pub induced_drag: WingForce2D,
}

/// A single wing panel built from spanwise sections sharing one airfoil.
///
/// All geometry stays in the wing's own 2D plane; mounting the panel on an
/// airframe is the mapping layer's job.
#[derive(Debug, Clone)]
pub struct Wing {
    airfoil: Arc<Airfoil>,
    sections: Vec<WingSection>,
    span_efficiency: f64,
}

impl Wing {
    pub fn new(
        airfoil: Arc<Airfoil>,
        sections: Vec<WingSection>,
        span_efficiency: f64,
    ) -> Result<Self, SimError> {
        if sections.is_empty() {
            return Err(SimError::InvalidConfig(
                "wing needs at least one section".into(),
            ));
        }
        for (i, section) in sections.iter().enumerate() {
            if !(section.span > 0.0) || !(section.chord > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "section {} must have positive span and chord",
                    i
                )));
            }
            if section.has_aileron && section.has_flap {
                return Err(SimError::InvalidConfig(format!(
                    "section {} cannot have both aileron and flap",
                    i
                )));
            }
        }

        Ok(Self {
            airfoil,
            sections,
            span_efficiency,
        })
    }

    pub fn airfoil(&self) -> &Airfoil {
        &self.airfoil
    }

    pub fn sections(&self) -> &[WingSection] {
        &self.sections
    }

    /// Same airflow applied to every section
    pub fn calc_forces_uniform(
        &self,
        speed: f64,
        aoa_deg: f64,
        controls: WingControls,
        air_density: f64,
    ) -> Result<WingForces, SimError> {
        let airflows = vec![SectionAirflow { speed, aoa_deg }; self.sections.len()];
        self.calc_forces(&airflows, controls, air_density)
    }

    /// Lift, drag and induced drag for the given per-section airflow.
    ///
    /// `airflows` must carry exactly one entry per section.
    pub fn calc_forces(
        &self,
        airflows: &[SectionAirflow],
        controls: WingControls,
        air_density: f64,
    ) -> Result<WingForces, SimError> {
        if airflows.len() != self.sections.len() {
            return Err(SimError::PhysicsError(format!(
                "airflow count {} does not match section count {}",
                airflows.len(),
                self.sections.len()
            )));
        }

        let mut sectional_lift = Vec::with_capacity(self.sections.len());
        let mut sectional_drag = Vec::with_capacity(self.sections.len());

        let mut cumulative_span = 0.0;
        let mut chordwise_shift = 0.0;
        for (section, airflow) in self.sections.iter().zip(airflows) {
            let flap_deg = if section.has_aileron {
                controls.aileron_deg
            } else if section.has_flap {
                controls.flap_deg
            } else {
                0.0
            };
            let slat_deg = if section.has_slat { controls.slat_deg } else { 0.0 };
            let coeffs = self.airfoil.calc_coeffs(airflow.aoa_deg, flap_deg, slat_deg)?;

            let area = section.span * section.chord;
            let dynamic_pressure = 0.5 * air_density * airflow.speed * airflow.speed;
            let lift = coeffs.cl * dynamic_pressure * area;
            let drag = coeffs.cd * dynamic_pressure * area;

            cumulative_span += section.span;
            chordwise_shift += section.chordwise_shift;

            // lift acts at the quarter chord, drag at the mid chord
            sectional_lift.push(WingForce2D {
                force: lift,
                origin_spanwise: cumulative_span - section.span * 0.5,
                origin_chordwise: chordwise_shift - section.chord * 0.25,
            });
            sectional_drag.push(WingForce2D {
                force: drag,
                origin_spanwise: cumulative_span - section.span * 0.5,
                origin_chordwise: chordwise_shift,
            });
        }

        // induced drag from the whole panel's lift distribution

        let mut mean_chord = 0.0;
        for section in &self.sections {
            mean_chord += section.chord * section.span;
        }
        mean_chord /= cumulative_span;
        let aspect_ratio = cumulative_span / mean_chord;

        let mut mean_cl = 0.0;
        let mut mean_speed = 0.0;
        let mut total_area = 0.0;
        for (i, section) in self.sections.iter().enumerate() {
            let sec_area = section.span * section.chord;
            let speed = airflows[i].speed;
            let mut sec_cl = sectional_lift[i].force
                / (0.5 * air_density * speed * speed)
                / sec_area;
            // zero airspeed gives 0/0 here, treat as no lift
            if sec_cl.is_nan() {
                sec_cl = 0.0;
            }
            mean_cl += sec_cl * sec_area;
            mean_speed += speed * sec_area;
            total_area += sec_area;
        }
        mean_cl /= total_area;
        mean_speed /= total_area;

        // the aspect ratio covers this panel alone while the coefficient
        // formula wants the full span, so assume a mirrored panel plus a
        // fuselage carry-through of about half a panel
        let cos_sweep = deg_to_rad(self.airfoil.sweep_deg()).cos();
        let mut effective_aspect_ratio = aspect_ratio * cos_sweep * cos_sweep;
        effective_aspect_ratio *= 2.0;
        effective_aspect_ratio *= 1.5;

        let cd = mean_cl * mean_cl / (PI * effective_aspect_ratio * self.span_efficiency);
        let mut induced_drag =
            cd * (0.5 * air_density * mean_speed * mean_speed) * total_area;

        // the coefficient is for the full span, this panel carries half
        induced_drag /= 2.0;

        let induced_drag = WingForce2D {
            force: induced_drag,
            origin_spanwise: cumulative_span * 0.5,
            origin_chordwise: (sectional_drag[0].origin_chordwise
                + sectional_drag[sectional_drag.len() - 1].origin_chordwise)
                * 0.5,
        };

        Ok(WingForces {
            sectional_lift,
            sectional_drag,
            induced_drag,
        })
    }
}
