//! Output capabilities the action engine drives.
//!
//! One trait per HID function. The engine only sees these traits; the
//! report-building implementations live in [`crate::hid`], and tests plug in
//! recorders.
//!
//! Every call is awaited before the next one is issued, so implementations
//! may block on the USB endpoint without reordering output.

use core::future::Future;

/// Keyboard usages, including the `0xE0..=0xE7` modifiers.
pub trait KeyboardOutput {
    fn press(&mut self, code: u16) -> impl Future<Output = ()>;

    fn release(&mut self, code: u16) -> impl Future<Output = ()>;

    fn release_all(&mut self) -> impl Future<Output = ()>;

    /// Press and release one code.
    fn write(&mut self, code: u16) -> impl Future<Output = ()> {
        async move {
            self.press(code).await;
            self.release(code).await;
        }
    }
}

/// Consumer control usages.
pub trait ConsumerOutput {
    fn press(&mut self, code: u16) -> impl Future<Output = ()>;

    fn release(&mut self, code: u16) -> impl Future<Output = ()>;

    fn release_all(&mut self) -> impl Future<Output = ()>;

    /// Press and release one usage.
    fn write(&mut self, code: u16) -> impl Future<Output = ()> {
        async move {
            self.press(code).await;
            self.release(code).await;
        }
    }
}

/// System control usages. These are one-shot, never held.
pub trait SystemOutput {
    fn write(&mut self, code: u16) -> impl Future<Output = ()>;
}

/// Mouse buttons and relative movement.
pub trait MouseOutput {
    fn press(&mut self, buttons: u8) -> impl Future<Output = ()>;

    fn release(&mut self, buttons: u8) -> impl Future<Output = ()>;

    fn release_all(&mut self) -> impl Future<Output = ()>;

    /// Relative pointer move plus vertical wheel.
    fn move_by(&mut self, x: i8, y: i8, wheel: i8) -> impl Future<Output = ()>;

    /// Horizontal scroll (AC Pan).
    fn pan(&mut self, amount: i8) -> impl Future<Output = ()>;
}

/// The full capability set, one field per key type.
pub struct Outputs<K, C, S, M> {
    pub keyboard: K,
    pub consumer: C,
    pub system: S,
    pub mouse: M,
}

impl<K, C, S, M> Outputs<K, C, S, M>
where
    K: KeyboardOutput,
    C: ConsumerOutput,
    S: SystemOutput,
    M: MouseOutput,
{
    pub fn new(keyboard: K, consumer: C, system: S, mouse: M) -> Self {
        Self {
            keyboard,
            consumer,
            system,
            mouse,
        }
    }
}
