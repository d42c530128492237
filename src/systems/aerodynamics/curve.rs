use crate::utils::errors::SimError;
use crate::utils::math::lerp;
use std::fs;
use std::path::Path;

/// A function tabulated uniformly over a normalized domain.
///
/// Samples live in [0, 1] on both axes; the configured x range maps the
/// caller's input onto the table and the y range denormalizes the result.
/// Ranges must satisfy min < max.
#[derive(Debug, Clone, Default)]
pub struct Curve {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    samples: Vec<f64>,
}

impl Curve {
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
            samples,
        }
    }

    /// Load a curve from its text format:
    ///
    /// ```text
    /// <num_control_points> <num_samples>
    /// <x> <y>     (one pair per control point, kept only for tooling)
    /// <sample>    (num_samples values in [0, 1])
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            SimError::AssetError(format!("failed to open curve file {}: {}", path.display(), e))
        })?;

        let truncated =
            || SimError::AssetError(format!("curve file {} is truncated", path.display()));
        let bad_number = |token: &str| {
            SimError::AssetError(format!(
                "curve file {} contains invalid number {:?}",
                path.display(),
                token
            ))
        };

        let mut tokens = text.split_whitespace();
        let mut counts = [0usize; 2];
        for count in counts.iter_mut() {
            let token = tokens.next().ok_or_else(truncated)?;
            *count = token.parse().map_err(|_| bad_number(token))?;
        }
        let [num_control_points, num_samples] = counts;

        // control points are parsed and discarded
        for _ in 0..num_control_points * 2 {
            let token = tokens.next().ok_or_else(truncated)?;
            token.parse::<f64>().map_err(|_| bad_number(token))?;
        }

        let mut samples = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            let token = tokens.next().ok_or_else(truncated)?;
            samples.push(token.parse::<f64>().map_err(|_| bad_number(token))?);
        }

        log::debug!(
            "loaded curve from {} ({} samples)",
            path.display(),
            samples.len()
        );
        Ok(Self::new(samples))
    }

    pub fn set_x_range(&mut self, x_min: f64, x_max: f64) {
        self.x_min = x_min;
        self.x_max = x_max;
    }

    pub fn set_y_range(&mut self, y_min: f64, y_max: f64) {
        self.y_min = y_min;
        self.y_max = y_max;
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Sample the curve at `x`, clamped to the configured domain.
    ///
    /// Linear interpolation between the two nearest table entries; inputs
    /// outside the domain saturate at the boundary value.
    pub fn sample(&self, x: f64) -> Result<f64, SimError> {
        if self.samples.is_empty() {
            return Err(SimError::AssetError("curve data is empty".into()));
        }

        let x = x.clamp(self.x_min, self.x_max);
        let t = (x - self.x_min) / (self.x_max - self.x_min);

        let position = t * (self.samples.len() - 1) as f64;
        let idx_low = position as usize;
        let idx_high = (idx_low + 1).min(self.samples.len() - 1);
        let blend = position - idx_low as f64;
        let val01 = lerp(self.samples[idx_low], self.samples[idx_high], blend);

        Ok(val01 * (self.y_max - self.y_min) + self.y_min)
    }
}
