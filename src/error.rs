//! Unified error type for macropad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! The action engine itself is infallible; these errors stay inside the
//! HID report backends, which log them and carry on.

/// Errors raised while turning output calls into HID reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// All six keyboard rollover slots are taken.
    RolloverFull,

    /// The code does not fit the report field it targets.
    InvalidCode(u16),

    /// The USB endpoint rejected the report (disabled or overflowed).
    Usb,
}
