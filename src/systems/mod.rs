pub mod aerodynamics;
pub mod physics;
pub mod propulsion;
