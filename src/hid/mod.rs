//! HID report backends for the output capabilities.
//!
//! Each backend keeps the state of one USB HID report (held keys, held
//! buttons, active usage) and pushes a fresh report through a
//! [`ReportWriter`] after every change. Report layouts and descriptors come
//! from `usbd-hid`.
//!
//! Failures (full rollover, codes that do not fit, endpoint errors) are
//! logged and dropped: a lost report must never stall the control loop.

pub mod consumer;
pub mod keyboard;
pub mod mouse;
pub mod system;


use core::future::Future;

use crate::error::Error;

pub use consumer::HidConsumer;
pub use keyboard::HidKeyboard;
pub use mouse::HidMouse;
pub use system::HidSystem;

/// Sink for one kind of input report.
pub trait ReportWriter<R> {
    fn write_report(&mut self, report: &R) -> impl Future<Output = Result<(), Error>>;
}
