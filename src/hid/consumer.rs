//! Consumer Control backend - media keys, volume, launchers.
//!
//! Consumer Control is a separate HID usage page (0x0C), transmitted as its
//! own report alongside the keyboard and mouse reports. A report carries a
//! single 16-bit usage; zero means nothing is pressed.
//!
//! Only one usage can be held at a time: pressing a second usage replaces
//! the first, and releasing the replaced one sends nothing.

use usbd_hid::descriptor::MediaKeyboardReport;

use super::ReportWriter;
use crate::output::ConsumerOutput;

pub struct HidConsumer<W> {
    writer: W,
    usage: u16,
}

impl<W: ReportWriter<MediaKeyboardReport>> HidConsumer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, usage: 0 }
    }

    /// Usage carried by the next report.
    pub fn usage(&self) -> u16 {
        self.usage
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    async fn send(&mut self) {
        let report = MediaKeyboardReport {
            usage_id: self.usage,
        };
        if let Err(_e) = self.writer.write_report(&report).await {
            #[cfg(feature = "defmt")]
            defmt::warn!("Consumer report dropped: {}", _e);
        }
    }
}

impl<W: ReportWriter<MediaKeyboardReport>> ConsumerOutput for HidConsumer<W> {
    async fn press(&mut self, code: u16) {
        self.usage = code;
        self.send().await;
    }

    /// Only reports if `code` is the usage currently held.
    async fn release(&mut self, code: u16) {
        if self.usage != code {
            return;
        }
        self.usage = 0;
        self.send().await;
    }

    async fn release_all(&mut self) {
        self.usage = 0;
        self.send().await;
    }
}
