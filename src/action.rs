//! Static action tables.
//!
//! Each physical key owns one [`KeyConfig`]: the kind of output it drives,
//! up to [`MAX_COMBINATION_KEYS`] modifier codes and a fixed-size sequence of
//! [`ActionStep`]s. Sequences end at the first step whose duration and first
//! code are both zero.
//!
//! ## Mouse steps
//!
//! Mouse keys reuse the step layout for two meanings:
//!
//! ```text
//! duration <  10000  → codes are mouse buttons, held for `duration` ms
//! duration >= 10000  → codes[0..3] = (dx, dy, wheel) + 10000,
//!                      wait `duration - 10000` ms after the move
//! ```
//!
//! ## Limitations
//!
//! Tables built through the `const fn` constructors are truncated at
//! capacity: extra modifiers, codes or steps are dropped, never rejected.
//! Mouse move deltas are clamped to `-127..=127` when encoded.
//!
//! A consumer report carries one usage, so a Consumer step should hold a
//! single code. Pressing a second code replaces the first on the host.

use crate::config::{MAX_COMBINATION_KEYS, MAX_SEQUENCE_KEYS, MOUSE_MOVE_BIAS};

/// Which output capability a key drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyType {
    /// Keyboard usages, with optional held modifiers.
    Keyboard,
    /// Consumer control usages (media, volume, launchers).
    Consumer,
    /// One system control usage (sleep, power down, wake).
    System,
    /// Mouse buttons and relative movement.
    Mouse,
    /// No output; raises the modifier flag while held.
    Modifier,
}

/// One press/wait/release step of a key's sequence.
///
/// Consumer steps should hold one code; the consumer report has one usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActionStep {
    /// Hold time in ms, or the biased wait of a mouse movement step.
    pub duration: u16,
    /// Zero-terminated codes pressed together.
    pub codes: [u16; MAX_COMBINATION_KEYS],
}

/// A decoded mouse step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseStep {
    /// Press the step's codes as buttons for `hold_ms`.
    Buttons { hold_ms: u16 },
    /// Move once, then wait `wait_ms`.
    Move { dx: i8, dy: i8, wheel: i8, wait_ms: u16 },
}

impl ActionStep {
    /// The end-of-sequence marker.
    pub const END: Self = Self {
        duration: 0,
        codes: [0; MAX_COMBINATION_KEYS],
    };

    /// Build a step from a slice of codes, keeping at most
    /// [`MAX_COMBINATION_KEYS`] of them.
    pub const fn new(duration: u16, codes: &[u16]) -> Self {
        Self {
            duration,
            codes: copy_codes(codes),
        }
    }

    /// Press and immediately release `codes`.
    pub const fn tap(codes: &[u16]) -> Self {
        Self::new(0, codes)
    }

    /// Encode a relative mouse move followed by a wait.
    pub const fn mouse_move(dx: i16, dy: i16, wheel: i16, wait_ms: u16) -> Self {
        Self {
            duration: MOUSE_MOVE_BIAS.saturating_add(wait_ms),
            codes: [bias(dx), bias(dy), bias(wheel), 0],
        }
    }

    /// `true` for the step that terminates a sequence.
    pub const fn is_end(&self) -> bool {
        self.duration == 0 && self.codes[0] == 0
    }

    /// Codes up to the first zero.
    pub fn codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.codes.iter().copied().take_while(|&code| code != 0)
    }

    /// Interpret this step as a mouse step.
    pub fn mouse(&self) -> MouseStep {
        if self.duration < MOUSE_MOVE_BIAS {
            return MouseStep::Buttons {
                hold_ms: self.duration,
            };
        }
        MouseStep::Move {
            dx: unbias(self.codes[0]),
            dy: unbias(self.codes[1]),
            wheel: unbias(self.codes[2]),
            wait_ms: self.duration - MOUSE_MOVE_BIAS,
        }
    }
}

impl Default for ActionStep {
    fn default() -> Self {
        Self::END
    }
}

const fn copy_codes(src: &[u16]) -> [u16; MAX_COMBINATION_KEYS] {
    let mut codes = [0; MAX_COMBINATION_KEYS];
    let mut i = 0;
    while i < src.len() && i < MAX_COMBINATION_KEYS {
        codes[i] = src[i];
        i += 1;
    }
    codes
}

/// Clamp to the HID relative range, then add the bias.
const fn bias(delta: i16) -> u16 {
    let delta = if delta < -127 {
        -127
    } else if delta > 127 {
        127
    } else {
        delta
    };
    (MOUSE_MOVE_BIAS as i32 + delta as i32) as u16
}

/// Remove the bias and clamp to the HID relative range.
fn unbias(raw: u16) -> i8 {
    (i32::from(raw) - i32::from(MOUSE_MOVE_BIAS)).clamp(-127, 127) as i8
}

/// Build-time configuration of one physical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyConfig {
    /// Line index in the board's key pin bank.
    pub pin: u8,
    pub key_type: KeyType,
    /// Zero-terminated modifier codes, held for the whole sequence
    /// (keyboard keys only).
    pub modifiers: [u16; MAX_COMBINATION_KEYS],
    pub steps: [ActionStep; MAX_SEQUENCE_KEYS],
}

impl KeyConfig {
    /// Build an entry, truncating modifiers and steps at capacity.
    pub const fn new(pin: u8, key_type: KeyType, modifiers: &[u16], steps: &[ActionStep]) -> Self {
        let mut seq = [ActionStep::END; MAX_SEQUENCE_KEYS];
        let mut i = 0;
        while i < steps.len() && i < MAX_SEQUENCE_KEYS {
            seq[i] = steps[i];
            i += 1;
        }
        Self {
            pin,
            key_type,
            modifiers: copy_codes(modifiers),
            steps: seq,
        }
    }

    pub const fn keyboard(pin: u8, modifiers: &[u16], steps: &[ActionStep]) -> Self {
        Self::new(pin, KeyType::Keyboard, modifiers, steps)
    }

    pub const fn consumer(pin: u8, steps: &[ActionStep]) -> Self {
        Self::new(pin, KeyType::Consumer, &[], steps)
    }

    /// A system key sends exactly one usage.
    pub const fn system(pin: u8, code: u16) -> Self {
        Self::new(pin, KeyType::System, &[], &[ActionStep::tap(&[code])])
    }

    pub const fn mouse(pin: u8, steps: &[ActionStep]) -> Self {
        Self::new(pin, KeyType::Mouse, &[], steps)
    }

    pub const fn modifier(pin: u8) -> Self {
        Self::new(pin, KeyType::Modifier, &[], &[])
    }

    /// Modifier codes up to the first zero.
    pub fn modifiers(&self) -> impl Iterator<Item = u16> + '_ {
        self.modifiers.iter().copied().take_while(|&code| code != 0)
    }

    /// Steps up to the end-of-sequence marker.
    pub fn steps(&self) -> impl Iterator<Item = &ActionStep> + '_ {
        self.steps.iter().take_while(|step| !step.is_end())
    }
}

/// One output produced by the encoder: a single rotation unit or a
/// classified button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderAction {
    /// Vertical wheel step.
    Wheel(i8),
    /// Horizontal pan step.
    Pan(i8),
    /// Press and release one consumer usage.
    Consumer(u16),
    /// Press and release one keyboard usage.
    Key(u16),
    /// Flip the modifier flag.
    ToggleModifier,
}
