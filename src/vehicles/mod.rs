pub mod jet;

pub use jet::{Jet, JetConfig};
