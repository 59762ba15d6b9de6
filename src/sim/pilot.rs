use crate::input::{ControlSnapshot, InputSampler, Key};
use crate::telemetry::Telemetry;

/// Source of per-frame control input.
///
/// Implement this to drive a [`Session`](super::Session) from something
/// other than a live keyboard.
pub trait Pilot {
    /// Controls for the frame about to be simulated.
    fn control(&mut self, telemetry: &Telemetry, dt: f64) -> ControlSnapshot;

    /// Reset internal state (clocks, held keys).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Live keyboard
// ---------------------------------------------------------------------------

/// Pilot backed by an [`InputSampler`] that the host feeds with key events.
#[derive(Debug, Default)]
pub struct KeyboardPilot {
    sampler: InputSampler,
}

impl KeyboardPilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sampler(&self) -> &InputSampler {
        &self.sampler
    }

    pub fn sampler_mut(&mut self) -> &mut InputSampler {
        &mut self.sampler
    }
}

impl Pilot for KeyboardPilot {
    fn control(&mut self, _telemetry: &Telemetry, _dt: f64) -> ControlSnapshot {
        self.sampler.sample()
    }

    fn reset(&mut self) {
        self.sampler.release_all();
    }

    fn name(&self) -> &str {
        "keyboard"
    }
}

// ---------------------------------------------------------------------------
// Scripted key sequences
// ---------------------------------------------------------------------------

/// A span of time during which a fixed set of keys is held.
#[derive(Debug, Clone)]
pub struct Phase {
    pub label: String,
    pub duration: f64, // s
    pub keys: Vec<Key>,
}

impl Phase {
    pub fn new(label: impl Into<String>, duration: f64, keys: &[Key]) -> Self {
        Self { label: label.into(), duration, keys: keys.to_vec() }
    }
}

/// Replays timed key phases through a real [`InputSampler`], so scripted
/// flights use the same key mapping as a player. Idle after the last phase.
#[derive(Debug, Clone)]
pub struct ScriptedPilot {
    phases: Vec<Phase>,
    sampler: InputSampler,
    clock: f64,
    active: Option<usize>,
}

// Phase boundaries are compared with this slack so accumulated frame times
// like 0.1 * 10 land in the next phase.
const BOUNDARY_EPS: f64 = 1e-9;

impl ScriptedPilot {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases, sampler: InputSampler::new(), clock: 0.0, active: None }
    }

    /// Phase index in effect at time `t`, if any.
    pub fn phase_index_at(&self, t: f64) -> Option<usize> {
        let mut start = 0.0;
        for (i, phase) in self.phases.iter().enumerate() {
            let end = start + phase.duration;
            if t + BOUNDARY_EPS >= start && t + BOUNDARY_EPS < end {
                return Some(i);
            }
            start = end;
        }
        None
    }

    pub fn phase_at(&self, t: f64) -> Option<&Phase> {
        self.phase_index_at(t).map(|i| &self.phases[i])
    }

    pub fn total_duration(&self) -> f64 {
        self.phases.iter().map(|p| p.duration).sum()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    fn enter(&mut self, idx: Option<usize>) {
        if idx == self.active {
            return;
        }
        self.sampler.release_all();
        if let Some(phase) = idx.and_then(|i| self.phases.get(i)) {
            tracing::debug!(t = self.clock, phase = %phase.label, "scripted phase");
            for &key in &phase.keys {
                self.sampler.handle_key(key, true);
            }
        }
        self.active = idx;
    }

    /// Scripted approach for the stock tug spawned 100 m out: burn in,
    /// coast, brake, null residual drift, then show off a pitch and stop it.
    pub fn approach() -> Self {
        Self::new(vec![
            Phase::new("burn", 10.0, &[Key::W]),
            Phase::new("coast", 70.0, &[]),
            Phase::new("brake", 8.0, &[Key::S]),
            Phase::new("coast", 50.0, &[]),
            Phase::new("trim", 4.0, &[Key::S, Key::ShiftLeft]),
            Phase::new("pitch", 2.0, &[Key::I]),
            Phase::new("hold", 5.0, &[]),
            Phase::new("kill", 0.5, &[Key::Space, Key::X]),
        ])
    }
}

impl Pilot for ScriptedPilot {
    fn control(&mut self, _telemetry: &Telemetry, dt: f64) -> ControlSnapshot {
        let idx = self.phase_index_at(self.clock);
        self.enter(idx);
        self.clock += dt;
        self.sampler.sample()
    }

    fn reset(&mut self) {
        self.clock = 0.0;
        self.active = None;
        self.sampler.release_all();
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
