//! Rotary encoder processing.
//!
//! The sampler accumulates detents into a wrapping `i32`. Each poll the
//! processor compares it with the last value it handled and emits one unit
//! action per detent, so a fast spin becomes `|diff|` separate wheel or
//! volume reports rather than one large jump.
//!
//! ## Policies
//!
//! | Policy            | Rotation                          | Click           | Double click        |
//! |-------------------|-----------------------------------|-----------------|---------------------|
//! | `WheelPan`        | wheel ±1, pan ±1 while modified    | toggle modifier | tap `double_click_key` |
//! | `VolumeTransport` | volume up/down                    | play/pause      | mute                |

use crate::action::EncoderAction;
use crate::dispatch::dispatch_encoder;
use crate::keycodes::consumer;
use crate::mode::Mode;
use crate::output::{ConsumerOutput, KeyboardOutput, MouseOutput, Outputs, SystemOutput};

/// Classified state of the encoder push-button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonEvent {
    Open = 0,
    Clicked = 1,
    DoubleClicked = 2,
}

impl From<u8> for ButtonEvent {
    fn from(raw: u8) -> Self {
        match raw {
            1 => ButtonEvent::Clicked,
            2 => ButtonEvent::DoubleClicked,
            _ => ButtonEvent::Open,
        }
    }
}

/// Direction of one detent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Unit step in this direction.
    pub fn unit(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// What the encoder drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderPolicy {
    /// Mouse wheel, horizontal pan while the modifier flag is up.
    WheelPan {
        /// Keyboard usage tapped on a double click.
        double_click_key: u16,
    },
    /// Volume up/down with play/pause and mute on the button.
    VolumeTransport,
}

impl EncoderPolicy {
    /// Action for one detent.
    pub fn rotation(&self, direction: Direction, mode: &Mode) -> EncoderAction {
        match self {
            EncoderPolicy::WheelPan { .. } if mode.is_modified() => {
                EncoderAction::Pan(direction.unit())
            }
            EncoderPolicy::WheelPan { .. } => EncoderAction::Wheel(direction.unit()),
            EncoderPolicy::VolumeTransport => match direction {
                Direction::Clockwise => EncoderAction::Consumer(consumer::VOLUME_UP),
                Direction::CounterClockwise => EncoderAction::Consumer(consumer::VOLUME_DOWN),
            },
        }
    }

    /// Action for a classified button event, if any.
    pub fn button(&self, event: ButtonEvent) -> Option<EncoderAction> {
        match (self, event) {
            (_, ButtonEvent::Open) => None,
            (EncoderPolicy::WheelPan { .. }, ButtonEvent::Clicked) => {
                Some(EncoderAction::ToggleModifier)
            }
            (EncoderPolicy::WheelPan { double_click_key }, ButtonEvent::DoubleClicked) => {
                Some(EncoderAction::Key(*double_click_key))
            }
            (EncoderPolicy::VolumeTransport, ButtonEvent::Clicked) => {
                Some(EncoderAction::Consumer(consumer::PLAY_PAUSE))
            }
            (EncoderPolicy::VolumeTransport, ButtonEvent::DoubleClicked) => {
                Some(EncoderAction::Consumer(consumer::MUTE))
            }
        }
    }
}

/// Detents still to be emitted in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation {
    remaining: u32,
    direction: Direction,
}

impl Rotation {
    /// Split a signed detent count into unit steps.
    pub fn from_delta(delta: i32) -> Self {
        let direction = if delta < 0 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        };
        Self {
            remaining: delta.unsigned_abs(),
            direction,
        }
    }
}

impl Iterator for Rotation {
    type Item = Direction;

    fn next(&mut self) -> Option<Direction> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.direction)
    }
}

/// Processor-side view of the tick counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncoderState {
    last_processed: Option<i32>,
}

impl EncoderState {
    pub const fn new() -> Self {
        Self {
            last_processed: None,
        }
    }

    /// Detents since the previous call. The first call only records the
    /// counter.
    pub fn take_delta(&mut self, raw: i32) -> i32 {
        let delta = match self.last_processed {
            Some(last) => raw.wrapping_sub(last),
            None => 0,
        };
        self.last_processed = Some(raw);
        delta
    }

    /// Emit one action per detent between the last handled count and `raw`.
    pub async fn process_rotation<K, C, S, M>(
        &mut self,
        raw: i32,
        policy: &EncoderPolicy,
        mode: &mut Mode,
        out: &mut Outputs<K, C, S, M>,
    ) where
        K: KeyboardOutput,
        C: ConsumerOutput,
        S: SystemOutput,
        M: MouseOutput,
    {
        let delta = self.take_delta(raw);
        if delta == 0 {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("Encoder delta {}", delta);

        for direction in Rotation::from_delta(delta) {
            let action = policy.rotation(direction, mode);
            dispatch_encoder(action, out, mode).await;
        }
    }
}

/// React to a classified button event.
pub async fn process_button<K, C, S, M>(
    event: ButtonEvent,
    policy: &EncoderPolicy,
    mode: &mut Mode,
    out: &mut Outputs<K, C, S, M>,
) where
    K: KeyboardOutput,
    C: ConsumerOutput,
    S: SystemOutput,
    M: MouseOutput,
{
    if let Some(action) = policy.button(event) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Encoder button {} -> {}", event, action);
        dispatch_encoder(action, out, mode).await;
    }
}
