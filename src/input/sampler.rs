use nalgebra::Vector3;

use super::key::{Key, KeyTable};

// ---------------------------------------------------------------------------
// Per-frame control snapshot
// ---------------------------------------------------------------------------

/// Pilot intent for one frame. Axis components are -1, 0 or +1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlSnapshot {
    pub translation: Vector3<f64>,   // body [right, up, back]
    pub rotation: Vector3<f64>,      // body [pitch, yaw, roll]
    pub precision: bool,
    pub kill_rotation: bool,
    pub kill_translation: bool,
}

impl ControlSnapshot {
    /// True if nothing is commanded this frame.
    pub fn is_idle(&self) -> bool {
        self.translation == Vector3::zeros()
            && self.rotation == Vector3::zeros()
            && !self.kill_rotation
            && !self.kill_translation
    }
}

/// What the host should do with a key event after the sampler has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Flight control key: cancel the host's default action (scrolling etc).
    Suppress,
    /// Let the host handle it normally.
    PassThrough,
}

// ---------------------------------------------------------------------------
// Input sampler
// ---------------------------------------------------------------------------

/// Keyboard state for one session.
///
/// The host forwards key-down/key-up events through [`handle_key`] as they
/// arrive and reads a [`ControlSnapshot`] once per frame. After
/// [`teardown`] the sampler is detached: it holds no keys and ignores
/// further events.
///
/// [`handle_key`]: InputSampler::handle_key
/// [`teardown`]: InputSampler::teardown
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    keys: KeyTable,
    detached: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: Key, pressed: bool) -> KeyDisposition {
        if self.detached {
            return KeyDisposition::PassThrough;
        }
        self.keys.set(key, pressed);
        if key.is_modifier() {
            KeyDisposition::PassThrough
        } else {
            KeyDisposition::Suppress
        }
    }

    /// Convenience for hosts that report `KeyboardEvent.code` strings.
    pub fn handle_code(&mut self, code: &str, pressed: bool) -> KeyDisposition {
        match Key::from_code(code) {
            Some(key) => self.handle_key(key, pressed),
            None => KeyDisposition::PassThrough,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.is_held(key)
    }

    /// Forget every held key, e.g. when the window loses focus and key-up
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// Detach from the host. Idempotent.
    pub fn teardown(&mut self) {
        if !self.detached {
            tracing::debug!("input sampler detached");
        }
        self.keys.clear();
        self.detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// W forward (-Z), S back (+Z); A left (-X), D right (+X);
    /// R up (+Y), F down (-Y).
    pub fn sample_translation(&self) -> Vector3<f64> {
        Vector3::new(
            self.keys.axis(Key::A, Key::D),
            self.keys.axis(Key::F, Key::R),
            self.keys.axis(Key::W, Key::S),
        )
    }

    /// I/K pitch (+/-), J/L yaw (+/-), Q/E roll (+/-).
    pub fn sample_rotation(&self) -> Vector3<f64> {
        Vector3::new(
            self.keys.axis(Key::K, Key::I),
            self.keys.axis(Key::L, Key::J),
            self.keys.axis(Key::E, Key::Q),
        )
    }

    pub fn is_precision_active(&self) -> bool {
        self.keys.is_held(Key::ShiftLeft) || self.keys.is_held(Key::ShiftRight)
    }

    pub fn is_kill_rotation_requested(&self) -> bool {
        self.keys.is_held(Key::Space)
    }

    pub fn is_kill_translation_requested(&self) -> bool {
        self.keys.is_held(Key::X)
    }

    pub fn sample(&self) -> ControlSnapshot {
        ControlSnapshot {
            translation: self.sample_translation(),
            rotation: self.sample_rotation(),
            precision: self.is_precision_active(),
            kill_rotation: self.is_kill_rotation_requested(),
            kill_translation: self.is_kill_translation_requested(),
        }
    }
}
