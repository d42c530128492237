use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Asset error: {0}")]
    AssetError(String),

    #[error("Invalid control input: {0}")]
    InvalidControl(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),
}
