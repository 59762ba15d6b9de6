//! Six-degree-of-freedom docking simulator core.
//!
//! [`input::InputSampler`] turns held keys into a [`input::ControlSnapshot`],
//! [`dynamics::FlightDynamics`] integrates the ship under pure Newtonian
//! motion, and [`sim::Session`] runs both once per frame and hands back a
//! [`telemetry::Telemetry`] view for the HUD and renderer.

pub mod dynamics;
pub mod error;
pub mod input;
pub mod sim;
pub mod telemetry;
pub mod vehicle;

pub use error::ConfigError;
