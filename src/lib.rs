pub mod components;
pub mod resources;
pub mod systems;
pub mod utils;
pub mod vehicles;

pub use components::{
    CameraComponent, CameraMode, ControlInputs, ControlState, Force, ForceCategory,
    MassParameters, ReferenceFrame, SpatialComponent, ThrottleCommand,
};
pub use resources::Environment;
pub use systems::aerodynamics::{
    Airfoil, AirfoilConfig, BodyMotion, Curve, MountedWing, Wing, WingControls, WingMount,
    WingSection,
};
pub use systems::physics::integrate_state;
pub use utils::errors::SimError;
pub use vehicles::{Jet, JetConfig};
