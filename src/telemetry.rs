use nalgebra::{UnitQuaternion, Vector3};

use crate::dynamics::RigidBodyState;

// ---------------------------------------------------------------------------
// Approach telemetry (read-only view for HUD and renderer)
// ---------------------------------------------------------------------------

/// Closure rate magnitude below which the approach is considered gentle, m/s.
pub const CLOSURE_NOMINAL: f64 = 0.3;
/// Closure rate magnitude at and above which the approach is too hot, m/s.
pub const CLOSURE_DANGER: f64 = 1.0;

/// Snapshot of the ship relative to the target, copied out once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub velocity: Vector3<f64>,           // m/s, world
    pub angular_velocity: Vector3<f64>,   // rad/s, body
    pub distance: f64,                    // m
    pub closure_rate: f64,                // m/s, -(v · û) toward target
}

impl Telemetry {
    pub fn capture(state: &RigidBodyState, target: &Vector3<f64>) -> Self {
        Telemetry {
            position: state.position,
            orientation: state.orientation,
            velocity: state.velocity,
            angular_velocity: state.angular_velocity,
            distance: distance_to(&state.position, target),
            closure_rate: closure_rate(&state.position, &state.velocity, target),
        }
    }

    pub fn closure_tier(&self) -> ClosureTier {
        ClosureTier::classify(self.closure_rate)
    }
}

pub fn distance_to(position: &Vector3<f64>, target: &Vector3<f64>) -> f64 {
    (target - position).norm()
}

/// Closure rate, m/s: the negated component of velocity along the unit
/// vector from the ship to the target. Flying straight at the target reads
/// negative; only the magnitude feeds [`ClosureTier`].
///
/// Zero when the ship sits exactly on the target (no defined direction).
pub fn closure_rate(position: &Vector3<f64>, velocity: &Vector3<f64>, target: &Vector3<f64>) -> f64 {
    match (target - position).try_normalize(0.0) {
        Some(to_target) => -velocity.dot(&to_target),
        None => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Closure classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureTier {
    Nominal,
    Caution,
    Danger,
}

impl ClosureTier {
    /// Classify by magnitude; opening and closing are treated alike.
    pub fn classify(closure_rate: f64) -> Self {
        let c = closure_rate.abs();
        if c < CLOSURE_NOMINAL {
            ClosureTier::Nominal
        } else if c < CLOSURE_DANGER {
            ClosureTier::Caution
        } else {
            ClosureTier::Danger
        }
    }

    /// HUD color as 0xRRGGBB.
    pub const fn color(self) -> u32 {
        match self {
            ClosureTier::Nominal => 0x00ff88,
            ClosureTier::Caution => 0xffff00,
            ClosureTier::Danger => 0xff4444,
        }
    }

    pub const fn rgb(self) -> [u8; 3] {
        let c = self.color();
        [(c >> 16) as u8, (c >> 8) as u8, c as u8]
    }
}

// ---------------------------------------------------------------------------
// HUD text
// ---------------------------------------------------------------------------

pub fn format_distance(distance: f64) -> String {
    format!("{:.1}", distance)
}

pub fn format_closure(closure_rate: f64) -> String {
    format!("{:.2}", closure_rate)
}

pub fn format_velocity(v: &Vector3<f64>) -> String {
    format!("{:.2}, {:.2}, {:.2}", v.x, v.y, v.z)
}

/// Angular velocity in rad/s, shown in deg/s.
pub fn format_angular_velocity(w: &Vector3<f64>) -> String {
    format!(
        "{:.1}, {:.1}, {:.1} deg/s",
        w.x.to_degrees(),
        w.y.to_degrees(),
        w.z.to_degrees()
    )
}

/// All four HUD fields for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudReadout {
    pub distance: String,
    pub closure: String,
    pub closure_tier: ClosureTier,
    pub velocity: String,
    pub angular: String,
}

impl From<&Telemetry> for HudReadout {
    fn from(t: &Telemetry) -> Self {
        HudReadout {
            distance: format_distance(t.distance),
            closure: format_closure(t.closure_rate),
            closure_tier: t.closure_tier(),
            velocity: format_velocity(&t.velocity),
            angular: format_angular_velocity(&t.angular_velocity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(pos: Vector3<f64>, vel: Vector3<f64>) -> RigidBodyState {
        RigidBodyState {
            velocity: vel,
            ..RigidBodyState::at_rest(pos)
        }
    }

    #[test]
    fn closing_on_target_reads_negative() {
        let s = state(Vector3::new(0.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -0.5));
        let t = Telemetry::capture(&s, &Vector3::zeros());
        assert_relative_eq!(t.distance, 100.0);
        assert_relative_eq!(t.closure_rate, -0.5);
        assert_eq!(t.closure_tier(), ClosureTier::Caution);
    }

    #[test]
    fn opening_reads_positive_and_lateral_is_zero() {
        let pos = Vector3::new(0.0, 0.0, 100.0);
        let away = Telemetry::capture(&state(pos, Vector3::new(0.0, 0.0, 2.0)), &Vector3::zeros());
        assert_relative_eq!(away.closure_rate, 2.0);
        assert_eq!(away.closure_tier(), ClosureTier::Danger);

        let sideways = Telemetry::capture(&state(pos, Vector3::new(3.0, 0.0, 0.0)), &Vector3::zeros());
        assert_relative_eq!(sideways.closure_rate, 0.0);
        assert_eq!(sideways.closure_tier(), ClosureTier::Nominal);
    }

    #[test]
    fn target_need_not_be_origin() {
        let target = Vector3::new(10.0, 0.0, 0.0);
        let s = state(Vector3::new(10.0, 30.0, 40.0), Vector3::new(0.0, -3.0, -4.0));
        let t = Telemetry::capture(&s, &target);
        assert_relative_eq!(t.distance, 50.0);
        assert_relative_eq!(t.closure_rate, -5.0, epsilon = 1e-12);
    }

    #[test]
    fn closure_on_top_of_target_is_zero() {
        let s = state(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let t = Telemetry::capture(&s, &Vector3::zeros());
        assert_eq!(t.distance, 0.0);
        assert_eq!(t.closure_rate, 0.0);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(ClosureTier::classify(0.0), ClosureTier::Nominal);
        assert_eq!(ClosureTier::classify(0.299), ClosureTier::Nominal);
        assert_eq!(ClosureTier::classify(0.3), ClosureTier::Caution);
        assert_eq!(ClosureTier::classify(-0.3), ClosureTier::Caution);
        assert_eq!(ClosureTier::classify(0.999), ClosureTier::Caution);
        assert_eq!(ClosureTier::classify(1.0), ClosureTier::Danger);
        assert_eq!(ClosureTier::classify(-7.5), ClosureTier::Danger);
    }

    #[test]
    fn tier_colors() {
        assert_eq!(ClosureTier::Nominal.rgb(), [0x00, 0xff, 0x88]);
        assert_eq!(ClosureTier::Caution.rgb(), [0xff, 0xff, 0x00]);
        assert_eq!(ClosureTier::Danger.rgb(), [0xff, 0x44, 0x44]);
    }

    #[test]
    fn hud_formats() {
        assert_eq!(format_distance(99.945), "99.9");
        assert_eq!(format_closure(0.1), "0.10");
        assert_eq!(format_closure(-1.234), "-1.23");
        assert_eq!(format_velocity(&Vector3::new(0.0, -0.1, 12.346)), "0.00, -0.10, 12.35");
        assert_eq!(
            format_angular_velocity(&Vector3::new(std::f64::consts::PI, 0.02, 0.0)),
            "180.0, 1.1, 0.0 deg/s"
        );
    }

    #[test]
    fn readout_from_telemetry() {
        let s = state(Vector3::new(0.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -0.1));
        let hud = HudReadout::from(&Telemetry::capture(&s, &Vector3::zeros()));
        assert_eq!(hud.distance, "100.0");
        assert_eq!(hud.closure, "-0.10");
        assert_eq!(hud.closure_tier, ClosureTier::Nominal);
        assert_eq!(hud.velocity, "0.00, 0.00, -0.10");
        assert_eq!(hud.angular, "0.0, 0.0, 0.0 deg/s");
    }
}
