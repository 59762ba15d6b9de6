pub mod ship;

pub use ship::{ShipBuilder, ShipConstants, presets};
