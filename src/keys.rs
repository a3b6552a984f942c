//! Per-key debounce and hold/repeat state machine.
//!
//! ```text
//!            pressed          pressed > debounce       pressed > first_repeat
//! Inactive ──────────► Debouncing ─────────────► Active ──────────────────► Holding ─┐
//!    ▲                    │ released               │ released                 │  ▲    │ pressed > repeat
//!    └────────────────────┴────────────────────────┴──────────────────────────┘  └────┘
//! ```
//!
//! Entering `Active`, entering `Holding` and every repeat while `Holding`
//! fire the key's action. Timestamps are `u32` milliseconds and compared
//! with wrapping subtraction, so the ~49 day counter wrap is harmless.

use crate::config::Timing;

/// Sampled level of a key input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    Pressed,
    Released,
}

/// Lifecycle of one physical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyLifecycle {
    Inactive,
    Debouncing,
    Active,
    Holding,
}

/// What one tick of the state machine asks the caller to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeySignal {
    /// Nothing to do.
    Idle,
    /// Run the key's action.
    Fire,
    /// A registered press ended (from `Active` or `Holding`).
    Released,
}

/// Mutable state of one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyRuntimeState {
    state: KeyLifecycle,
    since: u32,
}

impl KeyRuntimeState {
    pub const fn new() -> Self {
        Self {
            state: KeyLifecycle::Inactive,
            since: 0,
        }
    }

    pub fn state(&self) -> KeyLifecycle {
        self.state
    }

    /// Timestamp of the last recorded transition (ms).
    pub fn since(&self) -> u32 {
        self.since
    }

    /// Advance by one sample taken at `now`.
    pub fn advance(&mut self, level: PinLevel, now: u32, timing: &Timing) -> KeySignal {
        let elapsed = now.wrapping_sub(self.since);
        let pressed = level == PinLevel::Pressed;

        match self.state {
            KeyLifecycle::Inactive => {
                if pressed {
                    self.enter(KeyLifecycle::Debouncing, now);
                }
                KeySignal::Idle
            }
            KeyLifecycle::Debouncing => {
                if !pressed {
                    self.enter(KeyLifecycle::Inactive, now);
                    KeySignal::Idle
                } else if elapsed > timing.debounce_ms {
                    self.enter(KeyLifecycle::Active, now);
                    KeySignal::Fire
                } else {
                    KeySignal::Idle
                }
            }
            KeyLifecycle::Active => {
                if !pressed {
                    self.enter(KeyLifecycle::Inactive, now);
                    KeySignal::Released
                } else if elapsed > timing.first_repeat_ms {
                    self.enter(KeyLifecycle::Holding, now);
                    KeySignal::Fire
                } else {
                    KeySignal::Idle
                }
            }
            KeyLifecycle::Holding => {
                if !pressed {
                    self.enter(KeyLifecycle::Inactive, now);
                    KeySignal::Released
                } else if elapsed > timing.repeat_ms {
                    self.since = now;
                    KeySignal::Fire
                } else {
                    KeySignal::Idle
                }
            }
        }
    }

    fn enter(&mut self, state: KeyLifecycle, now: u32) {
        self.state = state;
        self.since = now;
    }
}

impl Default for KeyRuntimeState {
    fn default() -> Self {
        Self::new()
    }
}
