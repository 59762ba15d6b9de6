use crate::input::ControlSnapshot;
use crate::telemetry::Telemetry;
use super::pilot::Pilot;
use super::session::{sanitize_dt, Session};

/// One recorded frame of a flight.
#[derive(Debug, Clone, Copy)]
pub struct FlightSample {
    pub time: f64,                  // s, session time after the frame
    pub controls: ControlSnapshot,  // controls applied during the frame
    pub telemetry: Telemetry,
}

// ---------------------------------------------------------------------------
// Fixed-step flight
// ---------------------------------------------------------------------------

/// Fly `session` with `pilot` at a fixed frame time for `duration` seconds.
/// The first sample is the state before any frame, with idle controls.
///
/// `dt` goes through the session's frame guard first, so the pilot's clock
/// and the frame count agree with the time the session actually simulates.
pub fn fly(
    session: &mut Session,
    pilot: &mut dyn Pilot,
    duration: f64,
    dt: f64,
) -> Vec<FlightSample> {
    let requested = dt;
    let dt = sanitize_dt(dt, session.config().max_dt);
    if dt != requested {
        tracing::warn!(requested, dt, "flight frame time clamped");
    }
    let frames = if dt > 0.0 { (duration / dt).round() as usize } else { 0 };
    let mut log = Vec::with_capacity(frames.min(200_000) + 1);

    let mut telemetry = session.telemetry();
    log.push(FlightSample {
        time: session.elapsed(),
        controls: ControlSnapshot::default(),
        telemetry,
    });

    tracing::info!(pilot = pilot.name(), frames, dt, "flight started");

    for _ in 0..frames {
        let controls = pilot.control(&telemetry, dt);
        telemetry = session.step(&controls, dt);
        log.push(FlightSample { time: session.elapsed(), controls, telemetry });
    }

    if let Some(last) = log.last() {
        tracing::info!(
            t = last.time,
            distance = last.telemetry.distance,
            closure = last.telemetry.closure_rate,
            "flight finished"
        );
    }
    log
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
