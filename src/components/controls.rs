use crate::utils::errors::SimError;
use crate::utils::math::move_toward;
use serde::{Deserialize, Serialize};

/// Throttle handling for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThrottleCommand {
    Hold,
    Increase,
    Decrease,
    Max,
    Idle,
}

impl Default for ThrottleCommand {
    fn default() -> Self {
        ThrottleCommand::Hold
    }
}

/// Raw pilot input for one tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ControlInputs {
    pub throttle: ThrottleCommand,

    /// Stick pitch-down channel [-1, 1]
    pub pitch_down: f64,

    /// Stick roll-right channel [-1, 1]
    pub roll_right: f64,

    /// Pedal rudder-left channel [-1, 1]
    pub rudder_left: f64,

    pub flaps_down: bool,
    pub afterburner: bool,
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            throttle: ThrottleCommand::Hold,
            pitch_down: 0.0,
            roll_right: 0.0,
            rudder_left: 0.0,
            flaps_down: false,
            afterburner: false,
        }
    }
}

impl ControlInputs {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(-1.0..=1.0).contains(&self.pitch_down) {
            return Err(SimError::InvalidControl("pitch_down out of bounds".into()));
        }
        if !(-1.0..=1.0).contains(&self.roll_right) {
            return Err(SimError::InvalidControl("roll_right out of bounds".into()));
        }
        if !(-1.0..=1.0).contains(&self.rudder_left) {
            return Err(SimError::InvalidControl("rudder_left out of bounds".into()));
        }
        Ok(())
    }
}

/// Smoothing rates and control-surface throws
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Throttle change rate [fraction/s]
    pub throttle_rate: f64,

    /// Stick level change rate [1/s]
    pub stick_rate: f64,

    /// Full stick deflection of elevons and rudder [deg]
    pub surface_throw_deg: f64,

    /// Flap deflection when flaps are down [deg]
    pub flap_throw_deg: f64,

    /// Maximum automatic slat deflection [deg]
    pub slat_throw_deg: f64,

    /// AoA where slats start extending [deg]
    pub slat_start_aoa_deg: f64,

    /// AoA where slats are fully extended [deg]
    pub slat_full_aoa_deg: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            throttle_rate: 0.5,
            stick_rate: 4.0,
            surface_throw_deg: 20.0,
            flap_throw_deg: 30.0,
            slat_throw_deg: 25.0,
            slat_start_aoa_deg: 8.0,
            slat_full_aoa_deg: 16.0,
        }
    }
}

impl ControlsConfig {
    /// Automatic slat deflection for the current angle of attack [deg]
    pub fn slat_deflection(&self, aoa_deg: f64) -> f64 {
        let range = self.slat_full_aoa_deg - self.slat_start_aoa_deg;
        if range <= 0.0 {
            return 0.0;
        }
        let extension = ((aoa_deg - self.slat_start_aoa_deg) / range).clamp(0.0, 1.0);
        extension * self.slat_throw_deg
    }
}

/// Smoothed control state owned by the vehicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlState {
    /// Engine throttle level [0-1]
    pub throttle_level: f64,

    pub pitch_down_level: f64,
    pub roll_right_level: f64,
    pub rudder_left_level: f64,

    pub flaps_down: bool,
    pub afterburner: bool,
}

impl ControlState {
    /// Advance the smoothed levels toward this tick's raw input.
    ///
    /// Zero and negative timesteps leave the state untouched.
    pub fn advance(&mut self, inputs: &ControlInputs, config: &ControlsConfig, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        match inputs.throttle {
            ThrottleCommand::Hold => {}
            ThrottleCommand::Increase => {
                self.throttle_level = (self.throttle_level + config.throttle_rate * dt).min(1.0);
            }
            ThrottleCommand::Decrease => {
                self.throttle_level = (self.throttle_level - config.throttle_rate * dt).max(0.0);
            }
            ThrottleCommand::Max => self.throttle_level = 1.0,
            ThrottleCommand::Idle => self.throttle_level = 0.0,
        }

        let step = config.stick_rate * dt;
        self.pitch_down_level = move_toward(self.pitch_down_level, inputs.pitch_down, step);
        self.roll_right_level = move_toward(self.roll_right_level, inputs.roll_right, step);
        self.rudder_left_level = move_toward(self.rudder_left_level, inputs.rudder_left, step);

        self.flaps_down = inputs.flaps_down;
        self.afterburner = inputs.afterburner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn increase_input() -> ControlInputs {
        ControlInputs {
            throttle: ThrottleCommand::Increase,
            ..Default::default()
        }
    }

    #[test]
    fn test_throttle_ramp_takes_two_seconds() {
        let config = ControlsConfig::default();
        let mut state = ControlState::default();

        let dt = 0.01;
        let mut elapsed = 0.0;
        while state.throttle_level < 1.0 {
            state.advance(&increase_input(), &config, dt);
            elapsed += dt;
            assert!(elapsed < 2.5, "throttle never reached full");
        }
        assert_relative_eq!(elapsed, 2.0, epsilon = 0.02);

        // clamps at full
        state.advance(&increase_input(), &config, dt);
        assert_relative_eq!(state.throttle_level, 1.0);
    }

    #[test]
    fn test_throttle_direct_commands() {
        let config = ControlsConfig::default();
        let mut state = ControlState::default();

        let input = ControlInputs {
            throttle: ThrottleCommand::Max,
            ..Default::default()
        };
        state.advance(&input, &config, 0.001);
        assert_relative_eq!(state.throttle_level, 1.0);

        let input = ControlInputs {
            throttle: ThrottleCommand::Idle,
            ..Default::default()
        };
        state.advance(&input, &config, 0.001);
        assert_relative_eq!(state.throttle_level, 0.0);
    }

    #[test]
    fn test_stick_smoothing_converges() {
        let config = ControlsConfig::default();
        let mut state = ControlState::default();

        let input = ControlInputs {
            pitch_down: 1.0,
            ..Default::default()
        };

        state.advance(&input, &config, 0.1);
        assert_relative_eq!(state.pitch_down_level, 0.4);

        for _ in 0..20 {
            state.advance(&input, &config, 0.1);
        }
        assert_relative_eq!(state.pitch_down_level, 1.0);
    }

    #[test]
    fn test_nonpositive_timestep_leaves_state() {
        let config = ControlsConfig::default();
        let mut state = ControlState {
            throttle_level: 0.4,
            pitch_down_level: -0.2,
            ..Default::default()
        };
        let before = state.clone();

        let input = ControlInputs {
            throttle: ThrottleCommand::Max,
            pitch_down: 1.0,
            ..Default::default()
        };
        state.advance(&input, &config, 0.0);
        state.advance(&input, &config, -0.01);

        assert_relative_eq!(state.throttle_level, before.throttle_level);
        assert_relative_eq!(state.pitch_down_level, before.pitch_down_level);
    }

    #[test]
    fn test_out_of_range_stick_rejected() {
        let input = ControlInputs {
            roll_right: 1.5,
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_slat_schedule() {
        let config = ControlsConfig::default();
        assert_relative_eq!(config.slat_deflection(0.0), 0.0);
        assert_relative_eq!(config.slat_deflection(8.0), 0.0);
        assert_relative_eq!(config.slat_deflection(12.0), 12.5);
        assert_relative_eq!(config.slat_deflection(16.0), 25.0);
        assert_relative_eq!(config.slat_deflection(40.0), 25.0);
    }
}
