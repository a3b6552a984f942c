//! USB HID mouse backend.
//!
//! Layout (5 bytes):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Scroll wheel  (signed, -127..127)
//! Byte 4: AC Pan        (signed, -127..127)
//! ```
//!
//! Movement is relative, so a report is sent per call and never repeated.
//! Held buttons ride along with every movement report.

use usbd_hid::descriptor::MouseReport;

use super::ReportWriter;
use crate::output::MouseOutput;

pub struct HidMouse<W> {
    writer: W,
    buttons: u8,
}

impl<W: ReportWriter<MouseReport>> HidMouse<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, buttons: 0 }
    }

    /// Buttons currently held.
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Report a new button mask; an unchanged mask sends nothing.
    async fn set_buttons(&mut self, mask: u8) {
        if mask == self.buttons {
            return;
        }
        self.buttons = mask;
        self.send(0, 0, 0, 0).await;
    }

    async fn send(&mut self, x: i8, y: i8, wheel: i8, pan: i8) {
        let report = MouseReport {
            buttons: self.buttons,
            x,
            y,
            wheel,
            pan,
        };
        if let Err(_e) = self.writer.write_report(&report).await {
            #[cfg(feature = "defmt")]
            defmt::warn!("Mouse report dropped: {}", _e);
        }
    }
}

impl<W: ReportWriter<MouseReport>> MouseOutput for HidMouse<W> {
    async fn press(&mut self, buttons: u8) {
        self.set_buttons(self.buttons | buttons).await;
    }

    async fn release(&mut self, buttons: u8) {
        self.set_buttons(self.buttons & !buttons).await;
    }

    async fn release_all(&mut self) {
        self.buttons = 0;
        self.send(0, 0, 0, 0).await;
    }

    async fn move_by(&mut self, x: i8, y: i8, wheel: i8) {
        self.send(x, y, wheel, 0).await;
    }

    async fn pan(&mut self, amount: i8) {
        self.send(0, 0, 0, amount).await;
    }
}
