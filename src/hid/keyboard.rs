//! USB HID keyboard backend (boot protocol layout).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```
//!
//! Usages `0xE0..=0xE7` set modifier bits; everything else takes one of the
//! six rollover slots.

use usbd_hid::descriptor::KeyboardReport;

use super::ReportWriter;
use crate::error::Error;
use crate::output::KeyboardOutput;

/// Number of non-modifier keys one report can carry.
pub const ROLLOVER: usize = 6;

const FIRST_MODIFIER: u16 = 0xE0;
const LAST_MODIFIER: u16 = 0xE7;

pub struct HidKeyboard<W> {
    writer: W,
    modifier: u8,
    keycodes: [u8; ROLLOVER],
}

impl<W: ReportWriter<KeyboardReport>> HidKeyboard<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            modifier: 0,
            keycodes: [0; ROLLOVER],
        }
    }

    /// Modifier bitfield of the next report.
    pub fn modifier(&self) -> u8 {
        self.modifier
    }

    /// Rollover slots of the next report.
    pub fn keycodes(&self) -> &[u8; ROLLOVER] {
        &self.keycodes
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn add(&mut self, code: u16) -> Result<(), Error> {
        if let Some(bit) = modifier_bit(code) {
            self.modifier |= bit;
            return Ok(());
        }
        let usage = u8::try_from(code).map_err(|_| Error::InvalidCode(code))?;
        if self.keycodes.contains(&usage) {
            return Ok(());
        }
        let slot = self
            .keycodes
            .iter_mut()
            .find(|slot| **slot == 0)
            .ok_or(Error::RolloverFull)?;
        *slot = usage;
        Ok(())
    }

    fn remove(&mut self, code: u16) -> Result<(), Error> {
        if let Some(bit) = modifier_bit(code) {
            self.modifier &= !bit;
            return Ok(());
        }
        let usage = u8::try_from(code).map_err(|_| Error::InvalidCode(code))?;
        for slot in self.keycodes.iter_mut().filter(|slot| **slot == usage) {
            *slot = 0;
        }
        Ok(())
    }

    async fn send(&mut self) {
        let report = KeyboardReport {
            modifier: self.modifier,
            reserved: 0,
            leds: 0,
            keycodes: self.keycodes,
        };
        if let Err(_e) = self.writer.write_report(&report).await {
            #[cfg(feature = "defmt")]
            defmt::warn!("Keyboard report dropped: {}", _e);
        }
    }
}

fn modifier_bit(code: u16) -> Option<u8> {
    (FIRST_MODIFIER..=LAST_MODIFIER)
        .contains(&code)
        .then(|| 1 << (code - FIRST_MODIFIER))
}

impl<W: ReportWriter<KeyboardReport>> KeyboardOutput for HidKeyboard<W> {
    async fn press(&mut self, code: u16) {
        match self.add(code) {
            Ok(()) => self.send().await,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Key {=u16:#x} not pressed: {}", code, _e);
            }
        }
    }

    async fn release(&mut self, code: u16) {
        match self.remove(code) {
            Ok(()) => self.send().await,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Key {=u16:#x} not released: {}", code, _e);
            }
        }
    }

    async fn release_all(&mut self) {
        self.modifier = 0;
        self.keycodes = [0; ROLLOVER];
        self.send().await;
    }
}
