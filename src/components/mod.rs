pub mod camera;
pub mod controls;
pub mod forces;
pub mod spatial;

pub use camera::{CameraComponent, CameraMode};
pub use controls::{ControlInputs, ControlState, ControlsConfig, ThrottleCommand};
pub use forces::{Force, ForceCategory, MassParameters, ReferenceFrame};
pub use spatial::SpatialComponent;
