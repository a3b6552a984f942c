//! Encoder sampling.
//!
//! A periodic service routine reads the two quadrature lines and the push
//! button, decodes detents, classifies clicks and publishes both through a
//! [`Sampler`]. The control loop reads the sampler through
//! [`EncoderSampler`] from another task, so the shared state is atomic.

use core::sync::atomic::{AtomicI32, AtomicU8, Ordering};

use crate::config::ButtonTiming;
use crate::encoder::ButtonEvent;

/// Read side of the encoder, as seen by the control loop.
pub trait EncoderSampler {
    /// Detents counted since boot. Wraps on overflow.
    fn raw_tick_count(&self) -> i32;

    /// Latest classified button event. Reading consumes it.
    fn button_event(&self) -> ButtonEvent;
}

// Indexed by (previous << 2) | current, with state = (a << 1) | b.
const QUADRATURE_LUT: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Gray-code decoder that turns raw A/B transitions into detents.
#[derive(Clone, Copy, Debug)]
pub struct QuadratureDecoder {
    previous: Option<u8>,
    pulses: i8,
    steps_per_notch: i8,
}

impl QuadratureDecoder {
    pub fn new(steps_per_notch: u8) -> Self {
        Self {
            previous: None,
            pulses: 0,
            steps_per_notch: steps_per_notch.clamp(1, 8) as i8,
        }
    }

    /// Feed one sample. Returns `1`, `-1` or `0` detents.
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        let current = (u8::from(a) << 1) | u8::from(b);
        let Some(previous) = self.previous.replace(current) else {
            return 0;
        };

        self.pulses += QUADRATURE_LUT[usize::from((previous << 2) | current)];
        if self.pulses >= self.steps_per_notch {
            self.pulses -= self.steps_per_notch;
            1
        } else if self.pulses <= -self.steps_per_notch {
            self.pulses += self.steps_per_notch;
            -1
        } else {
            0
        }
    }
}

/// Turns the sampled button level into click and double-click events.
///
/// Presses shorter than `min_press_ms` are bounce and presses of
/// `hold_ms` or longer are ignored. A click is only reported once the
/// double-click window has passed without a second click.
#[derive(Clone, Copy, Debug)]
pub struct ClickClassifier {
    timing: ButtonTiming,
    held_ms: u32,
    pending_ms: Option<u32>,
}

impl ClickClassifier {
    pub fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            held_ms: 0,
            pending_ms: None,
        }
    }

    /// Feed one sample taken `dt_ms` after the previous one.
    pub fn update(&mut self, pressed: bool, dt_ms: u32) -> Option<ButtonEvent> {
        let mut event = None;

        if let Some(waited) = self.pending_ms {
            let waited = waited.saturating_add(dt_ms);
            if waited >= self.timing.double_click_ms {
                self.pending_ms = None;
                event = Some(ButtonEvent::Clicked);
            } else {
                self.pending_ms = Some(waited);
            }
        }

        if pressed {
            self.held_ms = self.held_ms.saturating_add(dt_ms);
            return event;
        }

        let held = core::mem::take(&mut self.held_ms);
        if held < self.timing.min_press_ms || held >= self.timing.hold_ms {
            return event;
        }

        if self.timing.double_click_ms == 0 {
            Some(ButtonEvent::Clicked)
        } else if self.pending_ms.take().is_some() {
            Some(ButtonEvent::DoubleClicked)
        } else {
            self.pending_ms = Some(0);
            event
        }
    }
}

/// Lock-free mailbox between the encoder service and the control loop.
pub struct Sampler {
    ticks: AtomicI32,
    button: AtomicU8,
}

impl Sampler {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicI32::new(0),
            button: AtomicU8::new(ButtonEvent::Open as u8),
        }
    }

    /// Add detents to the counter (wrapping).
    pub fn add_ticks(&self, detents: i32) {
        self.ticks.fetch_add(detents, Ordering::Relaxed);
    }

    /// Replace the pending button event.
    pub fn publish_button(&self, event: ButtonEvent) {
        self.button.store(event as u8, Ordering::Release);
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderSampler for Sampler {
    fn raw_tick_count(&self) -> i32 {
        self.ticks.load(Ordering::Relaxed)
    }

    fn button_event(&self) -> ButtonEvent {
        ButtonEvent::from(self.button.swap(ButtonEvent::Open as u8, Ordering::Acquire))
    }
}

/// Periodic routine run by the sampling task.
#[derive(Clone, Copy, Debug)]
pub struct EncoderService {
    decoder: QuadratureDecoder,
    classifier: ClickClassifier,
}

impl EncoderService {
    pub fn new(steps_per_notch: u8, timing: ButtonTiming) -> Self {
        Self {
            decoder: QuadratureDecoder::new(steps_per_notch),
            classifier: ClickClassifier::new(timing),
        }
    }

    /// Sample once and publish the result.
    pub fn service(&mut self, a: bool, b: bool, pressed: bool, dt_ms: u32, sampler: &Sampler) {
        let detents = self.decoder.update(a, b);
        if detents != 0 {
            sampler.add_ticks(i32::from(detents));
        }
        if let Some(event) = self.classifier.update(pressed, dt_ms) {
            sampler.publish_button(event);
        }
    }
}
