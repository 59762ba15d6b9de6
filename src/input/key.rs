//! Logical keys the sampler understands and the held-key table.
//!
//! Keys are identified by physical position (DOM `KeyboardEvent.code`
//! naming), so the layout is the same on QWERTY and AZERTY keyboards.

/// A key the flight controls respond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    // Translation
    W,
    S,
    A,
    D,
    R,
    F,
    // Rotation
    I,
    K,
    J,
    L,
    Q,
    E,
    // Commands
    Space,
    X,
    // Precision modifier
    ShiftLeft,
    ShiftRight,
}

impl Key {
    pub const ALL: [Key; 16] = [
        Key::W,
        Key::S,
        Key::A,
        Key::D,
        Key::R,
        Key::F,
        Key::I,
        Key::K,
        Key::J,
        Key::L,
        Key::Q,
        Key::E,
        Key::Space,
        Key::X,
        Key::ShiftLeft,
        Key::ShiftRight,
    ];

    /// Map a `KeyboardEvent.code` string. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Key> {
        let key = match code {
            "KeyW" => Key::W,
            "KeyS" => Key::S,
            "KeyA" => Key::A,
            "KeyD" => Key::D,
            "KeyR" => Key::R,
            "KeyF" => Key::F,
            "KeyI" => Key::I,
            "KeyK" => Key::K,
            "KeyJ" => Key::J,
            "KeyL" => Key::L,
            "KeyQ" => Key::Q,
            "KeyE" => Key::E,
            "Space" => Key::Space,
            "KeyX" => Key::X,
            "ShiftLeft" => Key::ShiftLeft,
            "ShiftRight" => Key::ShiftRight,
            _ => return None,
        };
        Some(key)
    }

    pub const fn code(self) -> &'static str {
        match self {
            Key::W => "KeyW",
            Key::S => "KeyS",
            Key::A => "KeyA",
            Key::D => "KeyD",
            Key::R => "KeyR",
            Key::F => "KeyF",
            Key::I => "KeyI",
            Key::K => "KeyK",
            Key::J => "KeyJ",
            Key::L => "KeyL",
            Key::Q => "KeyQ",
            Key::E => "KeyE",
            Key::Space => "Space",
            Key::X => "KeyX",
            Key::ShiftLeft => "ShiftLeft",
            Key::ShiftRight => "ShiftRight",
        }
    }

    /// Modifiers are tracked but left to the host's default handling.
    pub const fn is_modifier(self) -> bool {
        matches!(self, Key::ShiftLeft | Key::ShiftRight)
    }

    #[inline]
    const fn bit(self) -> u16 {
        1 << self as u8
    }
}

/// Set of currently held keys, one bit per [`Key`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyTable {
    bits: u16,
}

impl KeyTable {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    pub const fn is_held(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    #[inline]
    pub fn set(&mut self, key: Key, held: bool) {
        if held {
            self.bits |= key.bit();
        } else {
            self.bits &= !key.bit();
        }
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// -1, 0 or +1 from an opposing key pair.
    pub fn axis(&self, negative: Key, positive: Key) -> f64 {
        let mut v = 0.0;
        if self.is_held(negative) {
            v -= 1.0;
        }
        if self.is_held(positive) {
            v += 1.0;
        }
        v
    }
}
