use nalgebra::{UnitQuaternion, Vector3};

// ---------------------------------------------------------------------------
// Rigid-body kinematic state
// ---------------------------------------------------------------------------

/// Ship kinematic state. World frame is right-handed with the ship's nose
/// along local -Z at identity orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyState {
    pub position: Vector3<f64>,               // m, world
    pub orientation: UnitQuaternion<f64>,     // body→world rotation
    pub velocity: Vector3<f64>,               // m/s, world
    pub angular_velocity: Vector3<f64>,       // rad/s, body frame [pitch, yaw, roll]
}

impl RigidBodyState {
    /// At rest at `position`, identity attitude.
    pub fn at_rest(position: Vector3<f64>) -> Self {
        Self {
            position,
            orientation: UnitQuaternion::identity(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        }
    }

    /// Nose direction (body -Z) in world frame.
    pub fn forward(&self) -> Vector3<f64> {
        self.orientation * -Vector3::z()
    }

    /// Body +Y in world frame.
    pub fn up(&self) -> Vector3<f64> {
        self.orientation * Vector3::y()
    }
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self::at_rest(Vector3::zeros())
    }
}
