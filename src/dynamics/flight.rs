use nalgebra::{UnitQuaternion, Vector3};

use crate::dynamics::state::RigidBodyState;
use crate::vehicle::ShipConstants;

/// Output scale applied to thrusters and RCS in precision mode.
pub const PRECISION_SCALE: f64 = 0.1;

/// Below this |omega|^2 (rad^2/s^2) the attitude is not updated.
pub const MIN_ANGULAR_RATE_SQ: f64 = 1e-7;

// ---------------------------------------------------------------------------
// 6DOF Newtonian flight dynamics (no damping, no drag)
// ---------------------------------------------------------------------------

/// Owns the ship's rigid-body state and advances it with explicit Euler steps.
///
/// Thrust and torque inputs are held constant over each call's `dt`.
/// Velocity and angular velocity persist indefinitely unless thrust
/// counters them or a kill command zeroes them.
#[derive(Debug, Clone)]
pub struct FlightDynamics {
    state: RigidBodyState,
    constants: ShipConstants,
}

impl FlightDynamics {
    pub fn new(constants: ShipConstants, state: RigidBodyState) -> Self {
        Self { state, constants }
    }

    /// Ship at rest at `position` with identity attitude.
    pub fn spawn(constants: ShipConstants, position: Vector3<f64>) -> Self {
        Self::new(constants, RigidBodyState::at_rest(position))
    }

    /// Translate in ship-local axes.
    ///
    /// `intent` components are expected in {-1, 0, 1}. The vector is not
    /// normalized, so a diagonal command produces sqrt(2) or sqrt(3) times
    /// the single-axis force.
    pub fn apply_thrust(&mut self, intent: &Vector3<f64>, dt: f64, precision: bool) {
        if *intent == Vector3::zeros() {
            return;
        }
        let force = self.constants.thruster_force * output_scale(precision);
        let f_body = intent * force;
        let f_world = self.state.orientation * f_body;
        let accel = f_world / self.constants.mass;
        self.state.velocity += accel * dt;
    }

    /// Rotate about ship-local axes: x = pitch, y = yaw, z = roll.
    /// Each axis is driven independently by its own principal moment.
    pub fn apply_torque(&mut self, intent: &Vector3<f64>, dt: f64, precision: bool) {
        if *intent == Vector3::zeros() {
            return;
        }
        let torque = self.constants.rcs_torque * output_scale(precision);
        let i_vec = self.constants.inertia;
        let domega = Vector3::new(
            intent.x * torque / i_vec.x,
            intent.y * torque / i_vec.y,
            intent.z * torque / i_vec.z,
        );
        self.state.angular_velocity += domega * dt;
    }

    pub fn kill_rotation(&mut self) {
        self.state.angular_velocity = Vector3::zeros();
    }

    pub fn kill_translation(&mut self) {
        self.state.velocity = Vector3::zeros();
    }

    /// Advance position and attitude by `dt`.
    pub fn integrate(&mut self, dt: f64) {
        self.state.position += self.state.velocity * dt;

        if self.state.angular_velocity.norm_squared() > MIN_ANGULAR_RATE_SQ {
            let delta = local_rotation(&(self.state.angular_velocity * dt));
            // Right-multiply: the increment is expressed in the body frame.
            let q_raw = self.state.orientation.into_inner() * delta.into_inner();
            self.state.orientation = UnitQuaternion::new_normalize(q_raw);
        }
    }

    // --- Read-only views ---

    pub fn state(&self) -> &RigidBodyState {
        &self.state
    }

    pub fn constants(&self) -> &ShipConstants {
        &self.constants
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.state.position
    }

    pub fn orientation(&self) -> &UnitQuaternion<f64> {
        &self.state.orientation
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.state.velocity
    }

    pub fn angular_velocity(&self) -> &Vector3<f64> {
        &self.state.angular_velocity
    }

    /// |v|, m/s.
    pub fn speed(&self) -> f64 {
        self.state.velocity.norm()
    }

    /// |omega|, deg/s.
    pub fn angular_speed_deg(&self) -> f64 {
        self.state.angular_velocity.norm().to_degrees()
    }
}

fn output_scale(precision: bool) -> f64 {
    if precision { PRECISION_SCALE } else { 1.0 }
}

/// Body-frame rotation increment from Euler angles [pitch, yaw, roll].
///
/// Composed intrinsically yaw, then pitch, then roll: R_y * R_x * R_z.
/// Changing this order changes how coupled inputs handle.
pub fn local_rotation(angles: &Vector3<f64>) -> UnitQuaternion<f64> {
    let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y);
    let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x);
    let roll = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z);
    yaw * pitch * roll
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Quaternion;
    use std::f64::consts::FRAC_PI_2;

    fn tug_at(z: f64) -> FlightDynamics {
        FlightDynamics::spawn(ShipConstants::default(), Vector3::new(0.0, 0.0, z))
    }

    #[test]
    fn no_input_leaves_rates_and_keeps_coasting() {
        let mut fd = tug_at(100.0);
        fd.state.velocity = Vector3::new(0.5, 0.0, -1.0);
        fd.state.angular_velocity = Vector3::new(0.0, 0.1, 0.0);
        let q0 = *fd.orientation();

        let zero = Vector3::zeros();
        fd.apply_thrust(&zero, 0.016, false);
        fd.apply_torque(&zero, 0.016, true);
        assert_eq!(*fd.velocity(), Vector3::new(0.5, 0.0, -1.0));
        assert_eq!(*fd.angular_velocity(), Vector3::new(0.0, 0.1, 0.0));

        fd.integrate(0.5);
        assert_relative_eq!(*fd.position(), Vector3::new(0.25, 0.0, 99.5), epsilon = 1e-12);
        let expected = q0 * local_rotation(&Vector3::new(0.0, 0.05, 0.0));
        assert_relative_eq!(fd.orientation().coords, expected.coords, epsilon = 1e-12);
    }

    #[test]
    fn velocity_never_decays() {
        let mut fd = tug_at(0.0);
        fd.apply_thrust(&Vector3::new(1.0, 0.0, 0.0), 1.0, false);
        fd.apply_torque(&Vector3::new(0.0, 0.0, 1.0), 1.0, false);
        let v = *fd.velocity();
        let w = *fd.angular_velocity();
        for _ in 0..10_000 {
            fd.integrate(0.016);
        }
        assert_eq!(*fd.velocity(), v);
        assert_eq!(*fd.angular_velocity(), w);
    }

    #[test]
    fn kill_is_idempotent() {
        let mut fd = tug_at(0.0);
        fd.apply_thrust(&Vector3::new(1.0, 1.0, -1.0), 2.0, false);
        fd.apply_torque(&Vector3::new(-1.0, 1.0, 1.0), 2.0, false);

        fd.kill_rotation();
        let once = fd.state().clone();
        fd.kill_rotation();
        fd.kill_rotation();
        assert_eq!(*fd.state(), once);
        assert_eq!(*fd.angular_velocity(), Vector3::zeros());
        assert_ne!(*fd.velocity(), Vector3::zeros());

        fd.kill_translation();
        fd.kill_translation();
        assert_eq!(*fd.velocity(), Vector3::zeros());
    }

    #[test]
    fn orientation_stays_unit() {
        let mut fd = tug_at(0.0);
        fd.state.angular_velocity = Vector3::new(1.7, -2.3, 0.9);
        for i in 0..5_000 {
            fd.integrate(0.016 + (i % 7) as f64 * 1e-3);
            let norm = fd.orientation().quaternion().norm();
            assert!(
                (norm - 1.0).abs() < 1e-6,
                "Quaternion norm drifted to {} at step {}",
                norm,
                i
            );
        }
    }

    #[test]
    fn precision_is_one_tenth() {
        let t = 1.5;
        let mut full = tug_at(0.0);
        let mut fine = tug_at(0.0);
        full.apply_thrust(&Vector3::new(1.0, 0.0, 0.0), t, false);
        fine.apply_thrust(&Vector3::new(1.0, 0.0, 0.0), t, true);

        let c = ShipConstants::default();
        assert_relative_eq!(full.speed(), c.thruster_force / c.mass * t, epsilon = 1e-12);
        assert_relative_eq!(fine.speed(), full.speed() / 10.0, epsilon = 1e-12);

        full.apply_torque(&Vector3::new(0.0, 1.0, 0.0), t, false);
        fine.apply_torque(&Vector3::new(0.0, 1.0, 0.0), t, true);
        assert_relative_eq!(fine.angular_velocity().y, full.angular_velocity().y / 10.0, epsilon = 1e-12);
    }

    #[test]
    fn single_axis_thrusts_superpose() {
        let dt = 0.1;
        let mut split = tug_at(0.0);
        split.apply_thrust(&Vector3::new(1.0, 0.0, 0.0), dt, false);
        split.apply_thrust(&Vector3::new(0.0, 0.0, -1.0), dt, false);

        let mut combined = tug_at(0.0);
        combined.apply_thrust(&Vector3::new(1.0, 0.0, -1.0), dt, false);

        assert_relative_eq!(*split.velocity(), *combined.velocity(), epsilon = 1e-12);
    }

    #[test]
    fn diagonal_thrust_is_not_normalized() {
        // Known calibration property: corner input sums the axes.
        let mut single = tug_at(0.0);
        single.apply_thrust(&Vector3::new(0.0, 1.0, 0.0), 1.0, false);
        let mut diag = tug_at(0.0);
        diag.apply_thrust(&Vector3::new(1.0, 1.0, -1.0), 1.0, false);
        assert_relative_eq!(diag.speed(), single.speed() * 3f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn thrust_follows_attitude() {
        let mut fd = tug_at(0.0);
        fd.state.orientation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        // Forward (-Z body) now points along -X world.
        fd.apply_thrust(&Vector3::new(0.0, 0.0, -1.0), 1.0, false);
        assert_abs_diff_eq!(*fd.velocity(), Vector3::new(-0.1, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn forward_approach_from_hundred_metres() {
        let mut fd = tug_at(100.0);
        let forward = Vector3::new(0.0, 0.0, -1.0);
        let dt = 0.1;

        let mut expected_z = 100.0;
        let mut expected_vz = 0.0;
        for _ in 0..10 {
            fd.apply_thrust(&forward, dt, false);
            fd.integrate(dt);
            expected_vz -= 500.0 / 5000.0 * dt;
            expected_z += expected_vz * dt;
        }

        assert_relative_eq!(fd.velocity().z, -0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(fd.velocity().x, 0.0);
        assert_relative_eq!(fd.position().z, expected_z, epsilon = 1e-9);
        // 0.01 + 0.02 + ... + 0.10 m/s, each held for 0.1 s
        assert_relative_eq!(fd.position().z, 99.945, epsilon = 1e-9);
        assert_eq!(*fd.orientation(), UnitQuaternion::identity());
    }

    #[test]
    fn pitch_rate_then_kill() {
        let mut fd = tug_at(100.0);
        fd.apply_torque(&Vector3::new(1.0, 0.0, 0.0), 1.0, false);
        assert_relative_eq!(fd.angular_velocity().x, 0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(fd.angular_velocity().y, 0.0);

        for _ in 0..50 {
            fd.apply_torque(&Vector3::new(1.0, -1.0, 1.0), 0.1, false);
            fd.integrate(0.1);
        }
        fd.kill_rotation();
        assert_eq!(*fd.angular_velocity(), Vector3::zeros());

        let q = *fd.orientation();
        fd.integrate(1.0);
        assert_eq!(*fd.orientation(), q);
    }

    #[test]
    fn tiny_rates_do_not_touch_attitude() {
        let mut fd = tug_at(0.0);
        fd.state.angular_velocity = Vector3::new(2e-4, 0.0, 1e-4);
        assert!(fd.angular_velocity().norm_squared() < MIN_ANGULAR_RATE_SQ);
        fd.integrate(10.0);
        assert_eq!(*fd.orientation(), UnitQuaternion::identity());
    }

    #[test]
    fn local_rotation_is_yxz() {
        let (x, y, z) = (0.3_f64, -0.7_f64, 1.1_f64);
        let (s1, c1) = (x / 2.0).sin_cos();
        let (s2, c2) = (y / 2.0).sin_cos();
        let (s3, c3) = (z / 2.0).sin_cos();
        let expected = Quaternion::new(
            c1 * c2 * c3 + s1 * s2 * s3,
            s1 * c2 * c3 + c1 * s2 * s3,
            c1 * s2 * c3 - s1 * c2 * s3,
            c1 * c2 * s3 - s1 * s2 * c3,
        );
        let q = local_rotation(&Vector3::new(x, y, z));
        assert_relative_eq!(q.coords, expected.coords, epsilon = 1e-12);
    }

    #[test]
    fn local_rotation_order_matters() {
        let angles = Vector3::new(0.4, 0.6, 0.0);
        let yxz = local_rotation(&angles);
        let xyz = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y);
        assert!(yxz.angle_to(&xyz) > 1e-3);
    }

    #[test]
    fn rotation_composes_in_body_frame() {
        let mut fd = tug_at(0.0);
        // Roll 90° first, then a pure body pitch rate.
        fd.state.orientation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);
        fd.state.angular_velocity = Vector3::new(FRAC_PI_2, 0.0, 0.0);
        fd.integrate(1.0);
        // Body pitch after a 90° roll swings the nose toward world ∓X, not ±Y.
        let fwd = fd.state().forward();
        assert_abs_diff_eq!(fwd.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fwd.x.abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn speed_readouts() {
        let mut fd = tug_at(0.0);
        fd.state.velocity = Vector3::new(3.0, 4.0, 0.0);
        fd.state.angular_velocity = Vector3::new(0.0, 0.0, std::f64::consts::PI);
        assert_relative_eq!(fd.speed(), 5.0);
        assert_relative_eq!(fd.angular_speed_deg(), 180.0, epsilon = 1e-9);
    }
}
