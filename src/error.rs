use thiserror::Error;

/// Rejected ship configuration.
///
/// The dynamics divide by mass and by each principal moment of inertia, so
/// those must be strictly positive. Actuator outputs may be zero (a ship
/// with dead thrusters is still a valid ship) but never negative or NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ship mass must be finite and > 0 kg, got {0}")]
    Mass(f64),
    #[error("moment of inertia about {axis} must be finite and > 0 kg·m^2, got {value}")]
    Inertia { axis: char, value: f64 },
    #[error("{name} must be finite and >= 0, got {value}")]
    Actuator { name: &'static str, value: f64 },
}
