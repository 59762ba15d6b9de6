use nalgebra::Vector3;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Ship mass properties and actuator ratings
// ---------------------------------------------------------------------------

/// Immutable ship constants for one session.
///
/// Thrust and RCS torque are uniform per axis; inertia is three independent
/// principal moments (no products of inertia).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipConstants {
    pub mass: f64,                // kg
    pub thruster_force: f64,      // N per axis
    pub rcs_torque: f64,          // N·m per axis
    pub inertia: Vector3<f64>,    // [Ixx, Iyy, Izz] principal moments, kg·m^2
}

impl Default for ShipConstants {
    fn default() -> Self {
        Self {
            mass: 5000.0,
            thruster_force: 500.0,
            rcs_torque: 100.0,
            inertia: Vector3::new(5000.0, 5000.0, 3000.0),
        }
    }
}

impl ShipConstants {
    /// Linear acceleration from one axis at full thrust, m/s^2.
    pub fn max_linear_accel(&self) -> f64 {
        self.thruster_force / self.mass
    }

    /// Per-axis angular acceleration at full RCS torque, rad/s^2.
    pub fn max_angular_accel(&self) -> Vector3<f64> {
        Vector3::new(
            self.rcs_torque / self.inertia.x,
            self.rcs_torque / self.inertia.y,
            self.rcs_torque / self.inertia.z,
        )
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::Mass(self.mass));
        }
        for (axis, value) in [('x', self.inertia.x), ('y', self.inertia.y), ('z', self.inertia.z)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Inertia { axis, value });
            }
        }
        for (name, value) in [("thruster force", self.thruster_force), ("rcs torque", self.rcs_torque)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Actuator { name, value });
            }
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Ship builder
// ---------------------------------------------------------------------------

pub struct ShipBuilder {
    constants: ShipConstants,
}

impl ShipBuilder {
    pub fn new() -> Self {
        Self { constants: ShipConstants::default() }
    }

    pub fn mass(mut self, v: f64) -> Self { self.constants.mass = v; self }
    pub fn thruster_force(mut self, v: f64) -> Self { self.constants.thruster_force = v; self }
    pub fn rcs_torque(mut self, v: f64) -> Self { self.constants.rcs_torque = v; self }
    pub fn inertia(mut self, v: Vector3<f64>) -> Self { self.constants.inertia = v; self }

    pub fn build(self) -> Result<ShipConstants, ConfigError> {
        self.constants.validate()
    }
}

impl Default for ShipBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Preset ships
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Stock docking tug: 5 t, 500 N per axis, 100 N·m RCS.
    pub fn tug() -> ShipConstants {
        ShipConstants::default()
    }

    /// Heavier cargo hauler, sluggish in every axis.
    pub fn hauler() -> ShipConstants {
        ShipConstants {
            mass: 20_000.0,
            thruster_force: 1200.0,
            rcs_torque: 250.0,
            inertia: Vector3::new(40_000.0, 40_000.0, 18_000.0),
        }
    }
}
