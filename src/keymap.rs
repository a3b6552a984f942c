//! Built-in device profiles.
//!
//! Two boards share this firmware. The wheel deck scrolls with the encoder
//! and toggles horizontal pan on a click; the media deck drives volume and
//! transport. `media-deck` selects the second one at build time.
//!
//! Consumer keys should put one usage per step: the consumer report holds a
//! single usage, so extra codes in a step replace each other.

use crate::action::{ActionStep, KeyConfig};
use crate::config::NUMBER_OF_KEYS;
use crate::encoder::EncoderPolicy;
use crate::keycodes::key;

/// Key table plus encoder behaviour for one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    pub keys: [KeyConfig; NUMBER_OF_KEYS],
    pub policy: EncoderPolicy,
}

/// F13-F20 on the eight keys, wheel/pan encoder, F21 on double click.
pub static WHEEL_DECK: Profile = Profile {
    keys: [
        KeyConfig::keyboard(0, &[], &[ActionStep::tap(&[key::F13])]),
        KeyConfig::keyboard(1, &[], &[ActionStep::tap(&[key::F14])]),
        KeyConfig::keyboard(2, &[], &[ActionStep::tap(&[key::F15])]),
        KeyConfig::keyboard(3, &[], &[ActionStep::tap(&[key::F16])]),
        KeyConfig::keyboard(4, &[], &[ActionStep::tap(&[key::F17])]),
        KeyConfig::keyboard(5, &[], &[ActionStep::tap(&[key::F18])]),
        KeyConfig::keyboard(6, &[], &[ActionStep::new(50, &[key::F19])]),
        KeyConfig::keyboard(7, &[], &[ActionStep::new(50, &[key::F20])]),
    ],
    policy: EncoderPolicy::WheelPan {
        double_click_key: key::F21,
    },
};

/// Shortcut keys with a volume/transport encoder.
pub static MEDIA_DECK: Profile = Profile {
    keys: [
        KeyConfig::keyboard(0, &[], &[ActionStep::tap(&[key::F13])]),
        KeyConfig::keyboard(1, &[], &[ActionStep::tap(&[key::F14])]),
        KeyConfig::keyboard(2, &[], &[ActionStep::tap(&[key::F15])]),
        KeyConfig::keyboard(3, &[], &[ActionStep::tap(&[key::F16])]),
        KeyConfig::keyboard(4, &[], &[ActionStep::tap(&[key::PRINTSCREEN])]),
        KeyConfig::keyboard(5, &[key::LEFT_GUI], &[ActionStep::tap(&[key::V])]),
        KeyConfig::keyboard(6, &[], &[ActionStep::new(50, &[key::HOME])]),
        KeyConfig::keyboard(7, &[], &[ActionStep::new(50, &[key::END])]),
    ],
    policy: EncoderPolicy::VolumeTransport,
};

/// The profile this firmware was built for.
pub fn active() -> &'static Profile {
    if cfg!(feature = "media-deck") {
        &MEDIA_DECK
    } else {
        &WHEEL_DECK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::KeyType;

    #[test]
    fn every_line_is_mapped_once() {
        for profile in [&WHEEL_DECK, &MEDIA_DECK] {
            for (index, entry) in profile.keys.iter().enumerate() {
                assert_eq!(usize::from(entry.pin), index);
                assert_eq!(entry.key_type, KeyType::Keyboard);
                assert_eq!(entry.steps().count(), 1);
            }
        }
    }

    #[test]
    fn media_deck_paste_holds_gui() {
        let paste = &MEDIA_DECK.keys[5];
        assert_eq!(paste.modifiers().next(), Some(key::LEFT_GUI));
        assert_eq!(paste.steps[0].codes[0], key::V);
    }

    #[test]
    fn active_profile_follows_feature() {
        let expected = if cfg!(feature = "media-deck") {
            EncoderPolicy::VolumeTransport
        } else {
            EncoderPolicy::WheelPan {
                double_click_key: key::F21,
            }
        };
        assert_eq!(active().policy, expected);
    }
}
