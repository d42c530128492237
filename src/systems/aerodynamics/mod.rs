mod airfoil;
mod curve;
mod frame;
mod wing;

pub use airfoil::{Airfoil, AirfoilConfig, Coefficients};
pub use curve::Curve;
pub use frame::{
    local_velocity, BodyMotion, MountedWing, SectionalAirflow3D, WingForce3D, WingForces3D,
    WingMount,
};
pub use wing::{SectionAirflow, Wing, WingControls, WingForce2D, WingForces, WingSection};
