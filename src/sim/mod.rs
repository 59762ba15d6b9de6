pub mod pilot;
pub mod runner;
pub mod session;

pub use pilot::{KeyboardPilot, Phase, Pilot, ScriptedPilot};
pub use runner::{fly, FlightSample};
pub use session::{sanitize_dt, Session, SessionConfig};
