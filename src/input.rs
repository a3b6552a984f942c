//! Key inputs and time source.

use embedded_hal::digital::InputPin;

use crate::keys::PinLevel;

/// Instantaneous level of a key line.
pub trait InputSource {
    fn read_pin(&mut self, pin: u8) -> PinLevel;
}

/// Millisecond uptime, wrapping at `u32::MAX`.
pub trait Clock {
    fn now_millis(&self) -> u32;
}

/// Active-low key lines with pull-ups, indexed by line number.
///
/// Unknown lines and read errors report [`PinLevel::Released`] so a faulty
/// line can never fire an action.
pub struct PinBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: InputPin, const N: usize> PinBank<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }
}

impl<P: InputPin, const N: usize> InputSource for PinBank<P, N> {
    fn read_pin(&mut self, pin: u8) -> PinLevel {
        let Some(line) = self.pins.get_mut(usize::from(pin)) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Key line {} is not wired", pin);
            return PinLevel::Released;
        };
        match line.is_low() {
            Ok(true) => PinLevel::Pressed,
            Ok(false) => PinLevel::Released,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Key line {} read failed", pin);
                PinLevel::Released
            }
        }
    }
}
