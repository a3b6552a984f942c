//! Recording fakes for host tests.

use core::cell::RefCell;

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use crate::output::{ConsumerOutput, KeyboardOutput, MouseOutput, Outputs, SystemOutput};

/// One observable side effect of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    KeyPress(u16),
    KeyRelease(u16),
    KeyReleaseAll,
    ConsumerPress(u16),
    ConsumerRelease(u16),
    ConsumerReleaseAll,
    SystemWrite(u16),
    MousePress(u8),
    MouseRelease(u8),
    MouseReleaseAll,
    MouseMove(i8, i8, i8),
    MousePan(i8),
    Wait(u32),
}

/// Ordered call log shared by all fakes.
#[derive(Default)]
pub struct Log(RefCell<Vec<Call, 256>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call).unwrap();
    }

    pub fn calls(&self) -> Vec<Call, 256> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct RecKeyboard<'a>(pub &'a Log);
pub struct RecConsumer<'a>(pub &'a Log);
pub struct RecSystem<'a>(pub &'a Log);
pub struct RecMouse<'a>(pub &'a Log);
pub struct RecDelay<'a>(pub &'a Log);

pub type RecOutputs<'a> = Outputs<RecKeyboard<'a>, RecConsumer<'a>, RecSystem<'a>, RecMouse<'a>>;

pub fn outputs(log: &Log) -> RecOutputs<'_> {
    Outputs::new(
        RecKeyboard(log),
        RecConsumer(log),
        RecSystem(log),
        RecMouse(log),
    )
}

impl KeyboardOutput for RecKeyboard<'_> {
    async fn press(&mut self, code: u16) {
        self.0.push(Call::KeyPress(code));
    }

    async fn release(&mut self, code: u16) {
        self.0.push(Call::KeyRelease(code));
    }

    async fn release_all(&mut self) {
        self.0.push(Call::KeyReleaseAll);
    }
}

impl ConsumerOutput for RecConsumer<'_> {
    async fn press(&mut self, code: u16) {
        self.0.push(Call::ConsumerPress(code));
    }

    async fn release(&mut self, code: u16) {
        self.0.push(Call::ConsumerRelease(code));
    }

    async fn release_all(&mut self) {
        self.0.push(Call::ConsumerReleaseAll);
    }
}

impl SystemOutput for RecSystem<'_> {
    async fn write(&mut self, code: u16) {
        self.0.push(Call::SystemWrite(code));
    }
}

impl MouseOutput for RecMouse<'_> {
    async fn press(&mut self, buttons: u8) {
        self.0.push(Call::MousePress(buttons));
    }

    async fn release(&mut self, buttons: u8) {
        self.0.push(Call::MouseRelease(buttons));
    }

    async fn release_all(&mut self) {
        self.0.push(Call::MouseReleaseAll);
    }

    async fn move_by(&mut self, x: i8, y: i8, wheel: i8) {
        self.0.push(Call::MouseMove(x, y, wheel));
    }

    async fn pan(&mut self, amount: i8) {
        self.0.push(Call::MousePan(amount));
    }
}

impl DelayNs for RecDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.push(Call::Wait(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.push(Call::Wait(ms));
    }
}
