use super::curve::Curve;
use crate::utils::constants::{
    MAX_DRAG_COEFFICIENT, MAX_FLAP_DEFLECTION_DEG, MAX_SLAT_DEFLECTION_DEG, STALL_SCAN_STEP_DEG,
};
use crate::utils::errors::SimError;
use crate::utils::math::{deg_to_rad, smoothstep};
use serde::{Deserialize, Serialize};

/// Scalar airfoil parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AirfoilConfig {
    /// Lift coefficient at the curve's positive domain edge
    pub curve_max_cl: f64,

    /// Half-width of the curve's AoA domain [deg]
    pub curve_max_aoa_deg: f64,

    /// Quarter-chord sweep [deg]
    pub sweep_deg: f64,

    pub flap_eff_per_deg: f64,
    pub slat_eff_per_deg: f64,

    /// Zero-lift drag coefficient
    pub base_cd: f64,

    /// Quadratic drag growth with AoA [1/deg^2]
    pub cd_aoa2_scale: f64,

    pub flap_cd_eff_per_deg: f64,
    pub slat_cd_eff_per_deg: f64,
}

impl Default for AirfoilConfig {
    fn default() -> Self {
        Self {
            curve_max_cl: 2.4,
            curve_max_aoa_deg: 30.0,
            sweep_deg: 40.0,
            flap_eff_per_deg: 0.015,
            slat_eff_per_deg: 0.015,
            base_cd: 0.02,
            cd_aoa2_scale: 0.0002,
            flap_cd_eff_per_deg: 0.001,
            slat_cd_eff_per_deg: 0.001,
        }
    }
}

/// Lift and drag coefficients at one flight condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub cl: f64,
    pub cd: f64,
}

/// Coefficient model for one airfoil: a tabulated lift curve plus scalar
/// corrections for slats, flaps and sweep.
///
/// The stall peaks are located once at construction by scanning the curve;
/// they are never recomputed, so rebuild the airfoil if the curve changes.
#[derive(Debug, Clone)]
pub struct Airfoil {
    cl_vs_aoa: Curve,
    stall_angle_pos: f64,
    stall_angle_neg: f64,
    cl_max_sampled: f64,
    cl_min_sampled: f64,
    config: AirfoilConfig,
}

impl Airfoil {
    /// Wrap a normalized lift curve, configure its ranges from `config` and
    /// locate the stall peaks.
    pub fn new(mut curve: Curve, config: AirfoilConfig) -> Result<Self, SimError> {
        if config.curve_max_cl <= 0.0 {
            return Err(SimError::InvalidConfig(
                "curve_max_cl must be positive".into(),
            ));
        }
        if config.curve_max_aoa_deg <= 0.0 {
            return Err(SimError::InvalidConfig(
                "curve_max_aoa_deg must be positive".into(),
            ));
        }

        curve.set_x_range(-config.curve_max_aoa_deg, config.curve_max_aoa_deg);
        curve.set_y_range(-config.curve_max_cl, config.curve_max_cl);

        let mut stall_angle_pos = 0.0;
        let mut stall_angle_neg = 0.0;
        let mut cl_max_sampled = 0.0;
        let mut cl_min_sampled = 0.0;

        let steps = (2.0 * config.curve_max_aoa_deg / STALL_SCAN_STEP_DEG).round() as usize;
        for i in 0..=steps {
            let x = -config.curve_max_aoa_deg + i as f64 * STALL_SCAN_STEP_DEG;
            let y = curve.sample(x)?;
            if y > cl_max_sampled {
                cl_max_sampled = y;
                stall_angle_pos = x;
            }
            if y < cl_min_sampled {
                cl_min_sampled = y;
                stall_angle_neg = x;
            }
        }

        Ok(Self {
            cl_vs_aoa: curve,
            stall_angle_pos,
            stall_angle_neg,
            cl_max_sampled,
            cl_min_sampled,
            config,
        })
    }

    /// AoA of the positive stall peak [deg]
    pub fn stall_angle_pos(&self) -> f64 {
        self.stall_angle_pos
    }

    /// AoA of the negative stall peak [deg]
    pub fn stall_angle_neg(&self) -> f64 {
        self.stall_angle_neg
    }

    pub fn cl_max_sampled(&self) -> f64 {
        self.cl_max_sampled
    }

    pub fn cl_min_sampled(&self) -> f64 {
        self.cl_min_sampled
    }

    pub fn sweep_deg(&self) -> f64 {
        self.config.sweep_deg
    }

    /// Lift and drag coefficients for the given flight condition.
    ///
    /// `aoa_deg` is clamped to the curve domain. Deflections are hard
    /// bounds: flap within [-45, 45] and slat within [0, 45], anything
    /// outside is rejected.
    pub fn calc_coeffs(
        &self,
        aoa_deg: f64,
        flap_deg: f64,
        slat_deg: f64,
    ) -> Result<Coefficients, SimError> {
        let aoa_deg = aoa_deg.clamp(self.cl_vs_aoa.x_min(), self.cl_vs_aoa.x_max());
        if !(-MAX_FLAP_DEFLECTION_DEG..=MAX_FLAP_DEFLECTION_DEG).contains(&flap_deg) {
            return Err(SimError::InvalidControl(format!(
                "flap_deg {} outside [-{}, {}]",
                flap_deg, MAX_FLAP_DEFLECTION_DEG, MAX_FLAP_DEFLECTION_DEG
            )));
        }
        if !(0.0..=MAX_SLAT_DEFLECTION_DEG).contains(&slat_deg) {
            return Err(SimError::InvalidControl(format!(
                "slat_deg {} outside [0, {}]",
                slat_deg, MAX_SLAT_DEFLECTION_DEG
            )));
        }

        // slats raise the usable peak cl by stretching the AoA axis,
        // leaving the curve data itself untouched
        let d_cl_max = self.config.slat_eff_per_deg * slat_deg;
        let cl_max = self.cl_vs_aoa.y_max();
        let curve_scale = (cl_max + d_cl_max) / cl_max;

        let mut cl = self.cl_vs_aoa.sample(aoa_deg / curve_scale)? * curve_scale;

        // flap authority fades smoothly between the stall peak and the
        // domain edge on whichever side the AoA sits
        let flap_eff_factor = if aoa_deg > 0.0 {
            1.0 - smoothstep(self.stall_angle_pos, self.cl_vs_aoa.x_max(), aoa_deg)
        } else {
            smoothstep(self.cl_vs_aoa.x_min(), self.stall_angle_neg, aoa_deg)
        };
        cl += flap_eff_factor * self.config.flap_eff_per_deg * flap_deg;

        if self.config.sweep_deg > 0.0 {
            cl *= deg_to_rad(self.config.sweep_deg).cos();
        }

        let mut cd = self.config.base_cd + self.config.cd_aoa2_scale * aoa_deg * aoa_deg;
        cd += self.config.flap_cd_eff_per_deg * flap_deg.abs();
        cd += self.config.slat_cd_eff_per_deg * slat_deg.abs();
        cd = cd.clamp(self.config.base_cd, MAX_DRAG_COEFFICIENT);

        Ok(Coefficients { cl, cd })
    }
}
