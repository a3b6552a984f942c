//! Symbolic codes used in action tables.
//!
//! Keyboard codes are USB HID Keyboard/Keypad usages (page 0x07); the
//! `0xE0..=0xE7` range are the modifier keys. Consumer codes are Consumer
//! Control usages (page 0x0C), system codes Generic Desktop system control
//! usages, and mouse codes button bits.

/// Keyboard/Keypad usages.
pub mod key {
    pub const A: u16 = 0x04;
    pub const B: u16 = 0x05;
    pub const C: u16 = 0x06;
    pub const H: u16 = 0x0B;
    pub const I: u16 = 0x0C;
    pub const V: u16 = 0x19;
    pub const X: u16 = 0x1B;
    pub const Z: u16 = 0x1D;
    pub const ENTER: u16 = 0x28;
    pub const ESC: u16 = 0x29;
    pub const TAB: u16 = 0x2B;
    pub const PRINTSCREEN: u16 = 0x46;
    pub const HOME: u16 = 0x4A;
    pub const PAGE_UP: u16 = 0x4B;
    pub const END: u16 = 0x4D;
    pub const PAGE_DOWN: u16 = 0x4E;
    pub const F13: u16 = 0x68;
    pub const F14: u16 = 0x69;
    pub const F15: u16 = 0x6A;
    pub const F16: u16 = 0x6B;
    pub const F17: u16 = 0x6C;
    pub const F18: u16 = 0x6D;
    pub const F19: u16 = 0x6E;
    pub const F20: u16 = 0x6F;
    pub const F21: u16 = 0x70;
    pub const F22: u16 = 0x71;
    pub const F23: u16 = 0x72;
    pub const F24: u16 = 0x73;

    pub const LEFT_CTRL: u16 = 0xE0;
    pub const LEFT_SHIFT: u16 = 0xE1;
    pub const LEFT_ALT: u16 = 0xE2;
    pub const LEFT_GUI: u16 = 0xE3;
    pub const RIGHT_CTRL: u16 = 0xE4;
    pub const RIGHT_SHIFT: u16 = 0xE5;
    pub const RIGHT_ALT: u16 = 0xE6;
    pub const RIGHT_GUI: u16 = 0xE7;
}

/// Consumer Control usages.
pub mod consumer {
    pub const BRIGHTNESS_UP: u16 = 0x006F;
    pub const BRIGHTNESS_DOWN: u16 = 0x0070;
    pub const NEXT_TRACK: u16 = 0x00B5;
    pub const PREV_TRACK: u16 = 0x00B6;
    pub const STOP: u16 = 0x00B7;
    pub const PLAY_PAUSE: u16 = 0x00CD;
    pub const MUTE: u16 = 0x00E2;
    pub const VOLUME_UP: u16 = 0x00E9;
    pub const VOLUME_DOWN: u16 = 0x00EA;
    pub const LAUNCH_EMAIL: u16 = 0x018A;
    pub const LAUNCH_CALCULATOR: u16 = 0x0192;
    pub const LAUNCH_FILE_BROWSER: u16 = 0x0194;
    pub const BROWSER_HOME: u16 = 0x0223;
    pub const BROWSER_BACK: u16 = 0x0224;
    pub const BROWSER_FORWARD: u16 = 0x0225;
}

/// Generic Desktop system control usages.
pub mod system {
    pub const POWER_DOWN: u16 = 0x81;
    pub const SLEEP: u16 = 0x82;
    pub const WAKE_UP: u16 = 0x83;
}

/// Mouse button bits.
pub mod mouse {
    pub const LEFT: u16 = 0x01;
    pub const RIGHT: u16 = 0x02;
    pub const MIDDLE: u16 = 0x04;
}
