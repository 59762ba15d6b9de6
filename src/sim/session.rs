use nalgebra::Vector3;

use crate::dynamics::FlightDynamics;
use crate::input::ControlSnapshot;
use crate::telemetry::Telemetry;
use crate::vehicle::ShipConstants;

// ---------------------------------------------------------------------------
// Session configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub spawn_position: Vector3<f64>,     // m, world
    pub station_position: Vector3<f64>,   // m, world (never moves)
    pub max_dt: f64,                      // s, upper bound on a single frame
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            spawn_position: Vector3::new(0.0, 0.0, 100.0),
            station_position: Vector3::zeros(),
            max_dt: 0.25, // a backgrounded window can report seconds
        }
    }
}

/// Frame duration as the dynamics may use it.
///
/// NaN, infinite and negative values become 0; anything above `max_dt` is
/// clamped to it.
pub fn sanitize_dt(raw: f64, max_dt: f64) -> f64 {
    if !raw.is_finite() || raw < 0.0 {
        0.0
    } else {
        raw.min(max_dt)
    }
}

// ---------------------------------------------------------------------------
// Per-frame control loop
// ---------------------------------------------------------------------------

/// One docking session: the player ship and the fixed target station.
#[derive(Debug, Clone)]
pub struct Session {
    dynamics: FlightDynamics,
    config: SessionConfig,
    elapsed: f64,
    frames: u64,
    killing: (bool, bool),
}

impl Session {
    pub fn new(ship: ShipConstants, config: SessionConfig) -> Self {
        tracing::info!(
            spawn = ?config.spawn_position.as_slice(),
            station = ?config.station_position.as_slice(),
            mass = ship.mass,
            "docking session started"
        );
        Self {
            dynamics: FlightDynamics::spawn(ship, config.spawn_position),
            config,
            elapsed: 0.0,
            frames: 0,
            killing: (false, false),
        }
    }

    /// Run one frame: kill commands, thrust, torque, then integration.
    pub fn step(&mut self, controls: &ControlSnapshot, raw_dt: f64) -> Telemetry {
        let dt = sanitize_dt(raw_dt, self.config.max_dt);
        if dt != raw_dt {
            tracing::warn!(raw_dt, dt, frame = self.frames, "frame time out of range, clamped");
        }

        if controls.kill_rotation {
            self.dynamics.kill_rotation();
        }
        if controls.kill_translation {
            self.dynamics.kill_translation();
        }
        self.log_kill_edges(controls);

        self.dynamics.apply_thrust(&controls.translation, dt, controls.precision);
        self.dynamics.apply_torque(&controls.rotation, dt, controls.precision);
        self.dynamics.integrate(dt);

        self.elapsed += dt;
        self.frames += 1;
        self.telemetry()
    }

    fn log_kill_edges(&mut self, controls: &ControlSnapshot) {
        let (rot, trans) = self.killing;
        if controls.kill_rotation && !rot {
            tracing::debug!(t = self.elapsed, "kill rotation");
        }
        if controls.kill_translation && !trans {
            tracing::debug!(t = self.elapsed, "kill translation");
        }
        self.killing = (controls.kill_rotation, controls.kill_translation);
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry::capture(self.dynamics.state(), &self.config.station_position)
    }

    pub fn dynamics(&self) -> &FlightDynamics {
        &self.dynamics
    }

    pub fn station_position(&self) -> &Vector3<f64> {
        &self.config.station_position
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Simulated time, s (sum of sanitized frame durations).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ShipConstants::default(), SessionConfig::default())
    }
}
