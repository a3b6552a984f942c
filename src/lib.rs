//! Library interface for the macropad firmware.
//!
//! Everything between the GPIO lines and the USB endpoints lives here and
//! builds for the host: the action tables, the per-key debounce and repeat
//! state machine, the dispatcher, the encoder processor and sampler, and the
//! HID report backends. The embedded binary (`main.rs`) only wires these to
//! Embassy tasks and the nRF52840 peripherals.
//!
//! Usage: `cargo test` runs every module's unit tests plus
//! `tests/integration.rs` without hardware.
//!
//! Build the firmware with `cargo build --release --features embedded`
//! (add `media-deck` for the volume/transport profile).

#![cfg_attr(not(test), no_std)]

pub mod action;
pub mod config;
pub mod dispatch;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod hid;
pub mod input;
pub mod keycodes;
pub mod keymap;
pub mod keys;
pub mod mode;
pub mod output;
pub mod sampler;

#[cfg(test)]
mod testing;

pub use action::{ActionStep, EncoderAction, KeyConfig, KeyType};
pub use config::{ButtonTiming, Timing};
pub use encoder::{ButtonEvent, EncoderPolicy};
pub use engine::MacroPad;
pub use error::Error;
pub use input::{Clock, InputSource, PinBank};
pub use keys::PinLevel;
pub use mode::Mode;
pub use output::{ConsumerOutput, KeyboardOutput, MouseOutput, Outputs, SystemOutput};
pub use sampler::{EncoderSampler, EncoderService, Sampler};
