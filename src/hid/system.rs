//! System Control backend (power down, sleep, wake up).

use usbd_hid::descriptor::SystemControlReport;

use super::ReportWriter;
use crate::error::Error;
use crate::output::SystemOutput;

pub struct HidSystem<W> {
    writer: W,
}

impl<W: ReportWriter<SystemControlReport>> HidSystem<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    async fn send(&mut self, usage: u8) -> Result<(), Error> {
        self.writer
            .write_report(&SystemControlReport { usage_id: usage })
            .await
    }
}

impl<W: ReportWriter<SystemControlReport>> SystemOutput for HidSystem<W> {
    /// Sends the usage followed by an empty report.
    async fn write(&mut self, code: u16) {
        let Ok(usage) = u8::try_from(code) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("System usage {=u16:#x} out of range", code);
            return;
        };
        if let Err(_e) = self.send(usage).await {
            #[cfg(feature = "defmt")]
            defmt::warn!("System report dropped: {}", _e);
        }
        if let Err(_e) = self.send(0).await {
            #[cfg(feature = "defmt")]
            defmt::warn!("System release dropped: {}", _e);
        }
    }
}
