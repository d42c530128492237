mod force_calculator;
mod integrator;

pub use force_calculator::{calculate_net_forces, NetForces};
pub use integrator::integrate_state;
