//! Device context and the control-loop iteration.
//!
//! [`MacroPad`] owns every piece of runtime state: one [`KeyRuntimeState`]
//! per table entry, the encoder's last processed count and the modifier
//! [`Mode`]. Platform collaborators are passed into [`MacroPad::poll`] so
//! the same engine runs on hardware and against recorders in tests.

use embedded_hal_async::delay::DelayNs;

use crate::action::{KeyConfig, KeyType};
use crate::config::Timing;
use crate::dispatch::dispatch;
use crate::encoder::{process_button, EncoderPolicy, EncoderState};
use crate::input::{Clock, InputSource};
use crate::keys::{KeyRuntimeState, KeySignal};
use crate::mode::Mode;
use crate::output::{ConsumerOutput, KeyboardOutput, MouseOutput, Outputs, SystemOutput};
use crate::sampler::EncoderSampler;

/// Runtime state of the pad: key states, encoder position and modifier flag.
pub struct MacroPad<'a, const N: usize> {
    keys: &'a [KeyConfig; N],
    states: [KeyRuntimeState; N],
    timing: Timing,
    policy: EncoderPolicy,
    encoder: EncoderState,
    mode: Mode,
}

impl<'a, const N: usize> MacroPad<'a, N> {
    pub fn new(keys: &'a [KeyConfig; N], policy: EncoderPolicy) -> Self {
        Self {
            keys,
            states: [KeyRuntimeState::new(); N],
            timing: Timing::DEFAULT,
            policy,
            encoder: EncoderState::new(),
            mode: Mode::new(),
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn policy(&self) -> &EncoderPolicy {
        &self.policy
    }

    /// Runtime state of the key at table index `index`.
    pub fn key_state(&self, index: usize) -> Option<&KeyRuntimeState> {
        self.states.get(index)
    }

    /// One control-loop iteration.
    ///
    /// Keys are serviced in table order and each fired sequence runs to
    /// completion before the next key is read. Encoder rotation and then
    /// the encoder button are serviced after the keys on every call.
    pub async fn poll<I, E, K, C, S, M, D>(
        &mut self,
        clock: &impl Clock,
        input: &mut I,
        sampler: &E,
        out: &mut Outputs<K, C, S, M>,
        delay: &mut D,
    ) where
        I: InputSource,
        E: EncoderSampler,
        K: KeyboardOutput,
        C: ConsumerOutput,
        S: SystemOutput,
        M: MouseOutput,
        D: DelayNs,
    {
        for (key, state) in self.keys.iter().zip(self.states.iter_mut()) {
            let level = input.read_pin(key.pin);
            match state.advance(level, clock.now_millis(), &self.timing) {
                KeySignal::Idle => {}
                KeySignal::Fire => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Key on line {} fired ({})", key.pin, key.key_type);
                    dispatch(key, out, &mut self.mode, delay).await;
                }
                KeySignal::Released => {
                    if key.key_type == KeyType::Modifier {
                        self.mode.clear();
                    }
                }
            }
        }

        self.encoder
            .process_rotation(sampler.raw_tick_count(), &self.policy, &mut self.mode, out)
            .await;
        process_button(sampler.button_event(), &self.policy, &mut self.mode, out).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionStep;
    use crate::encoder::ButtonEvent;
    use crate::keycodes::{consumer, key};
    use crate::keys::{KeyLifecycle, PinLevel};
    use crate::testing::{outputs, Call, Log, RecDelay};
    use core::cell::Cell;
    use embassy_futures::block_on;

    struct FakeClock(Cell<u32>);

    impl Clock for FakeClock {
        fn now_millis(&self) -> u32 {
            self.0.get()
        }
    }

    struct Lines([PinLevel; 3]);

    impl InputSource for Lines {
        fn read_pin(&mut self, pin: u8) -> PinLevel {
            self.0.get(usize::from(pin)).copied().unwrap_or(PinLevel::Released)
        }
    }

    struct FakeSampler {
        ticks: Cell<i32>,
        button: Cell<ButtonEvent>,
    }

    impl FakeSampler {
        fn new() -> Self {
            Self {
                ticks: Cell::new(0),
                button: Cell::new(ButtonEvent::Open),
            }
        }
    }

    impl EncoderSampler for FakeSampler {
        fn raw_tick_count(&self) -> i32 {
            self.ticks.get()
        }

        fn button_event(&self) -> ButtonEvent {
            self.button.replace(ButtonEvent::Open)
        }
    }

    static TABLE: [KeyConfig; 3] = [
        KeyConfig::keyboard(0, &[], &[ActionStep::tap(&[key::A])]),
        KeyConfig::modifier(1),
        KeyConfig::consumer(2, &[ActionStep::tap(&[consumer::MUTE])]),
    ];

    const WHEEL: EncoderPolicy = EncoderPolicy::WheelPan {
        double_click_key: key::F21,
    };

    struct Rig {
        log: Log,
        clock: FakeClock,
        lines: Lines,
        sampler: FakeSampler,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                log: Log::new(),
                clock: FakeClock(Cell::new(1000)),
                lines: Lines([PinLevel::Released; 3]),
                sampler: FakeSampler::new(),
            }
        }

        fn poll_at(&mut self, pad: &mut MacroPad<'_, 3>, now: u32) {
            self.clock.0.set(now);
            let mut out = outputs(&self.log);
            let mut delay = RecDelay(&self.log);
            block_on(pad.poll(&self.clock, &mut self.lines, &self.sampler, &mut out, &mut delay));
        }
    }

    #[test]
    fn key_fires_once_after_debounce() {
        let mut rig = Rig::new();
        let mut pad = MacroPad::new(&TABLE, WHEEL);

        rig.lines.0[0] = PinLevel::Pressed;
        rig.poll_at(&mut pad, 1000);
        rig.poll_at(&mut pad, 1020);
        assert!(rig.log.calls().is_empty());

        rig.poll_at(&mut pad, 1021);
        assert_eq!(
            rig.log.calls().as_slice(),
            &[Call::KeyPress(key::A), Call::KeyRelease(key::A), Call::KeyReleaseAll]
        );
        assert_eq!(pad.key_state(0).map(|s| s.state()), Some(KeyLifecycle::Active));
    }

    #[test]
    fn modifier_key_gates_encoder_while_held() {
        let mut rig = Rig::new();
        let mut pad = MacroPad::new(&TABLE, WHEEL);
        rig.poll_at(&mut pad, 1000);

        rig.lines.0[1] = PinLevel::Pressed;
        rig.poll_at(&mut pad, 1001);
        rig.poll_at(&mut pad, 1030);
        assert!(pad.mode().is_modified());

        rig.sampler.ticks.set(1);
        rig.poll_at(&mut pad, 1031);
        assert_eq!(rig.log.calls().as_slice(), &[Call::MousePan(1)]);

        rig.lines.0[1] = PinLevel::Released;
        rig.poll_at(&mut pad, 1040);
        assert!(!pad.mode().is_modified());

        rig.log.clear();
        rig.sampler.ticks.set(2);
        rig.poll_at(&mut pad, 1041);
        assert_eq!(rig.log.calls().as_slice(), &[Call::MouseMove(0, 0, 1)]);
    }

    #[test]
    fn encoder_is_serviced_after_keys() {
        let mut rig = Rig::new();
        let mut pad = MacroPad::new(&TABLE, EncoderPolicy::VolumeTransport);
        rig.poll_at(&mut pad, 1000);

        rig.lines.0[2] = PinLevel::Pressed;
        rig.poll_at(&mut pad, 1001);
        rig.sampler.ticks.set(-1);
        rig.sampler.button.set(ButtonEvent::Clicked);
        rig.poll_at(&mut pad, 1030);

        assert_eq!(
            rig.log.calls().as_slice(),
            &[
                Call::ConsumerPress(consumer::MUTE),
                Call::ConsumerRelease(consumer::MUTE),
                Call::ConsumerReleaseAll,
                Call::ConsumerPress(consumer::VOLUME_DOWN),
                Call::ConsumerRelease(consumer::VOLUME_DOWN),
                Call::ConsumerPress(consumer::PLAY_PAUSE),
                Call::ConsumerRelease(consumer::PLAY_PAUSE),
            ]
        );
    }

    #[test]
    fn custom_timing_shortens_debounce() {
        let mut rig = Rig::new();
        let timing = Timing {
            debounce_ms: 5,
            ..Timing::DEFAULT
        };
        let mut pad = MacroPad::new(&TABLE, WHEEL).with_timing(timing);

        rig.lines.0[0] = PinLevel::Pressed;
        rig.poll_at(&mut pad, 1000);
        rig.poll_at(&mut pad, 1006);
        assert_eq!(rig.log.calls().first(), Some(&Call::KeyPress(key::A)));
    }
}
