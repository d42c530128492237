pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225; // kg/m^3

// Numerical guards
pub const MIN_DIRECTION_SPEED: f64 = 1e-4; // Below this, normalized directions collapse to zero
pub const MIN_ANGULAR_SPEED: f64 = 1e-6; // Below this, no attitude update (rad/s)

// Aerodynamic model
pub const STALL_SCAN_STEP_DEG: f64 = 0.1; // Resolution of the stall-peak search
pub const MAX_FLAP_DEFLECTION_DEG: f64 = 45.0; // Valid flap range is +/- this
pub const MAX_SLAT_DEFLECTION_DEG: f64 = 45.0; // Valid slat range is [0, this]
pub const MAX_DRAG_COEFFICIENT: f64 = 1.5;
