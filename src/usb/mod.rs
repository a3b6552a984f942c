//! USB Device subsystem - presents a composite HID device to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. We create a **composite device** with four HID
//! interfaces:
//!
//! - Interface 0: Keyboard (boot protocol)
//! - Interface 1: Mouse with wheel and AC Pan
//! - Interface 2: Consumer Control
//! - Interface 3: System Control
//!
//! Each interface gets its own [`hid_device::UsbReportWriter`], which the
//! library's HID backends drive directly.

pub mod hid_device;
