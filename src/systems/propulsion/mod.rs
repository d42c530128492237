mod engine;

pub use engine::{calculate_engine_outputs, EngineConfig, EngineOutputs};
