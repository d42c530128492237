mod config;
mod jet;

pub use config::{
    GeometryConfig, InitialConditions, JetConfig, MassConfig, SurfaceConfig, VStabilizerConfig,
};
pub use jet::Jet;
