//! Application-wide constants and compile-time configuration.
//!
//! Table capacities, key timing, encoder sampling and USB identity live
//! here so they can be tuned in one place.

// Action table

/// Number of physical keys on the pad.
pub const NUMBER_OF_KEYS: usize = 8;

/// Maximum number of codes held at the same time in one step
/// (and maximum number of modifier codes per key).
pub const MAX_COMBINATION_KEYS: usize = 4;

/// Maximum number of steps in one key's action sequence.
pub const MAX_SEQUENCE_KEYS: usize = 16;

/// Offset applied to mouse movement deltas and to the duration of a
/// movement step. A mouse step with `duration >= MOUSE_MOVE_BIAS` is a move.
pub const MOUSE_MOVE_BIAS: u16 = 10_000;

// Key timing

/// A key must read pressed for longer than this before it fires (ms).
pub const DEBOUNCE_MS: u32 = 20;

/// Hold time after the first fire before auto-repeat starts (ms).
pub const FIRST_REPEAT_MS: u32 = 500;

/// Interval between auto-repeat fires while a key stays held (ms).
pub const REPEAT_MS: u32 = 150;

/// Period of the control loop poll (ms).
pub const CONTROL_LOOP_PERIOD_MS: u64 = 1;

/// Debounce/hold thresholds used by the key state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Continuous press time required before the first fire.
    pub debounce_ms: u32,
    /// Time in `Active` before the first repeat.
    pub first_repeat_ms: u32,
    /// Time between repeats in `Holding`.
    pub repeat_ms: u32,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        debounce_ms: DEBOUNCE_MS,
        first_repeat_ms: FIRST_REPEAT_MS,
        repeat_ms: REPEAT_MS,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Rotary encoder
//
//   Encoder DT  (A) → P0.29
//   Encoder CLK (B) → P0.31
//   Encoder SW      → P0.30   (active-low, internal pull-up)

/// Sampling period of the encoder service task (µs).
pub const ENCODER_SERVICE_PERIOD_US: u64 = 1000;

/// Quadrature pulses per mechanical detent.
pub const ENCODER_STEPS_PER_NOTCH: u8 = 4;

/// Shortest press of the encoder button counted as a click (ms).
pub const BUTTON_MIN_PRESS_MS: u32 = 10;

/// Presses at least this long are holds, not clicks (ms).
pub const BUTTON_HOLD_MS: u32 = 1200;

/// Window after a click in which a second click makes a double click (ms).
pub const DOUBLE_CLICK_MS: u32 = 600;

/// Click classification thresholds for the encoder push-button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTiming {
    pub min_press_ms: u32,
    pub hold_ms: u32,
    pub double_click_ms: u32,
}

impl ButtonTiming {
    pub const DEFAULT: Self = Self {
        min_press_ms: BUTTON_MIN_PRESS_MS,
        hold_ms: BUTTON_HOLD_MS,
        double_click_ms: DOUBLE_CLICK_MS,
    };
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "macropad";
pub const USB_PRODUCT: &str = "Macro Pad with Encoder";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

// GPIO pin assignments (nRF52840-DK defaults)
//
// `KeyConfig::pin` is a line index into the board's key pin bank, built in
// `main.rs` in this order. Adjust for your custom PCB.
//
//   Line 0 → P0.02    Line 4 → P0.28
//   Line 1 → P0.03    Line 5 → P0.11
//   Line 2 → P0.04    Line 6 → P0.12
//   Line 3 → P0.05    Line 7 → P0.24
