pub mod flight;
pub mod state;

pub use flight::{FlightDynamics, local_rotation, MIN_ANGULAR_RATE_SQ, PRECISION_SCALE};
pub use state::RigidBodyState;
