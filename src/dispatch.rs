//! Action dispatcher - plays one key's action sequence on the outputs.
//!
//! Waits are awaited on the caller's task: while a sequence runs nothing
//! else is polled, and the sequence always runs to completion. Keyboard,
//! consumer and mouse sequences finish with `release_all` so a short or
//! truncated table can never leave a key held on the host.

use embedded_hal_async::delay::DelayNs;

use crate::action::{ActionStep, EncoderAction, KeyConfig, KeyType, MouseStep};
use crate::mode::Mode;
use crate::output::{ConsumerOutput, KeyboardOutput, MouseOutput, Outputs, SystemOutput};

/// Run the action configured for `key`.
pub async fn dispatch<K, C, S, M, D>(
    key: &KeyConfig,
    out: &mut Outputs<K, C, S, M>,
    mode: &mut Mode,
    delay: &mut D,
) where
    K: KeyboardOutput,
    C: ConsumerOutput,
    S: SystemOutput,
    M: MouseOutput,
    D: DelayNs,
{
    match key.key_type {
        KeyType::Keyboard => {
            let keyboard = &mut out.keyboard;
            for code in key.modifiers() {
                keyboard.press(code).await;
            }
            for step in key.steps() {
                hold_step(step, step.duration, &mut Keys(&mut *keyboard), delay).await;
            }
            for code in key.modifiers() {
                keyboard.release(code).await;
            }
            keyboard.release_all().await;
        }
        KeyType::Consumer => {
            for step in key.steps() {
                hold_step(step, step.duration, &mut Media(&mut out.consumer), delay).await;
            }
            out.consumer.release_all().await;
        }
        KeyType::System => {
            let code = key.steps[0].codes[0];
            if code != 0 {
                out.system.write(code).await;
            }
        }
        KeyType::Mouse => {
            for step in key.steps() {
                match step.mouse() {
                    MouseStep::Buttons { hold_ms } => {
                        hold_step(step, hold_ms, &mut Buttons(&mut out.mouse), delay).await;
                    }
                    MouseStep::Move {
                        dx,
                        dy,
                        wheel,
                        wait_ms,
                    } => {
                        out.mouse.move_by(dx, dy, wheel).await;
                        if wait_ms > 0 {
                            delay.delay_ms(u32::from(wait_ms)).await;
                        }
                    }
                }
            }
            out.mouse.release_all().await;
        }
        KeyType::Modifier => {
            mode.set();
        }
    }
}

/// Run one encoder action.
pub async fn dispatch_encoder<K, C, S, M>(
    action: EncoderAction,
    out: &mut Outputs<K, C, S, M>,
    mode: &mut Mode,
) where
    K: KeyboardOutput,
    C: ConsumerOutput,
    S: SystemOutput,
    M: MouseOutput,
{
    match action {
        EncoderAction::Wheel(amount) => out.mouse.move_by(0, 0, amount).await,
        EncoderAction::Pan(amount) => out.mouse.pan(amount).await,
        EncoderAction::Consumer(code) => out.consumer.write(code).await,
        EncoderAction::Key(code) => out.keyboard.write(code).await,
        EncoderAction::ToggleModifier => {
            mode.toggle();
            #[cfg(feature = "defmt")]
            defmt::debug!("Modifier toggled: {}", mode.is_modified());
        }
    }
}

/// Press a step's codes, wait, then release the same codes.
async fn hold_step<H: Hold, D: DelayNs>(step: &ActionStep, hold_ms: u16, out: &mut H, delay: &mut D) {
    for code in step.codes() {
        out.press(code).await;
    }
    if hold_ms > 0 {
        delay.delay_ms(u32::from(hold_ms)).await;
    }
    for code in step.codes() {
        out.release(code).await;
    }
}

/// Press/release view of a capability, shared by the step loops.
trait Hold {
    async fn press(&mut self, code: u16);
    async fn release(&mut self, code: u16);
}

struct Keys<'a, K>(&'a mut K);
struct Media<'a, C>(&'a mut C);
struct Buttons<'a, M>(&'a mut M);

impl<K: KeyboardOutput> Hold for Keys<'_, K> {
    async fn press(&mut self, code: u16) {
        self.0.press(code).await;
    }

    async fn release(&mut self, code: u16) {
        self.0.release(code).await;
    }
}

impl<C: ConsumerOutput> Hold for Media<'_, C> {
    async fn press(&mut self, code: u16) {
        self.0.press(code).await;
    }

    async fn release(&mut self, code: u16) {
        self.0.release(code).await;
    }
}

impl<M: MouseOutput> Hold for Buttons<'_, M> {
    async fn press(&mut self, code: u16) {
        match u8::try_from(code) {
            Ok(buttons) => self.0.press(buttons).await,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Mouse button code {=u16:#x} out of range", code);
            }
        }
    }

    async fn release(&mut self, code: u16) {
        if let Ok(buttons) = u8::try_from(code) {
            self.0.release(buttons).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_SEQUENCE_KEYS;
    use crate::keycodes::{consumer, key, mouse, system};
    use crate::testing::{outputs, Call, Log, RecDelay};
    use embassy_futures::block_on;

    fn run(cfg: &KeyConfig, log: &Log, mode: &mut Mode) {
        let mut out = outputs(log);
        let mut delay = RecDelay(log);
        block_on(dispatch(cfg, &mut out, mode, &mut delay));
    }

    #[test]
    fn keyboard_sequence_with_modifier() {
        let cfg = KeyConfig::keyboard(
            0,
            &[key::LEFT_SHIFT],
            &[ActionStep::new(100, &[key::A]), ActionStep::END],
        );
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        assert_eq!(
            log.calls().as_slice(),
            &[
                Call::KeyPress(key::LEFT_SHIFT),
                Call::KeyPress(key::A),
                Call::Wait(100),
                Call::KeyRelease(key::A),
                Call::KeyRelease(key::LEFT_SHIFT),
                Call::KeyReleaseAll,
            ]
        );
    }

    #[test]
    fn keyboard_never_presses_past_end_marker() {
        let cfg = KeyConfig::keyboard(
            0,
            &[],
            &[
                ActionStep::tap(&[key::H]),
                ActionStep::END,
                ActionStep::tap(&[key::I]),
            ],
        );
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        assert!(!log.calls().contains(&Call::KeyPress(key::I)));
        assert_eq!(log.calls().last(), Some(&Call::KeyReleaseAll));
    }

    #[test]
    fn zero_duration_step_does_not_wait() {
        let cfg = KeyConfig::keyboard(0, &[], &[ActionStep::tap(&[key::LEFT_GUI, key::V])]);
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        assert_eq!(
            log.calls().as_slice(),
            &[
                Call::KeyPress(key::LEFT_GUI),
                Call::KeyPress(key::V),
                Call::KeyRelease(key::LEFT_GUI),
                Call::KeyRelease(key::V),
                Call::KeyReleaseAll,
            ]
        );
    }

    #[test]
    fn empty_keyboard_sequence_only_toggles_modifiers() {
        let cfg = KeyConfig::keyboard(0, &[key::LEFT_CTRL, key::LEFT_ALT], &[]);
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        assert_eq!(
            log.calls().as_slice(),
            &[
                Call::KeyPress(key::LEFT_CTRL),
                Call::KeyPress(key::LEFT_ALT),
                Call::KeyRelease(key::LEFT_CTRL),
                Call::KeyRelease(key::LEFT_ALT),
                Call::KeyReleaseAll,
            ]
        );
    }

    #[test]
    fn truncated_sequence_runs_every_kept_step() {
        let steps = [ActionStep::new(1, &[key::A]); MAX_SEQUENCE_KEYS + 2];
        let cfg = KeyConfig::keyboard(0, &[], &steps);
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        let waits = log
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Wait(_)))
            .count();
        assert_eq!(waits, MAX_SEQUENCE_KEYS);
    }

    #[test]
    fn consumer_sequence_releases_all_at_end() {
        let cfg = KeyConfig::consumer(
            0,
            &[
                ActionStep::new(100, &[consumer::MUTE, consumer::BRIGHTNESS_UP]),
                ActionStep::new(100, &[consumer::LAUNCH_CALCULATOR]),
            ],
        );
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        assert_eq!(
            log.calls().as_slice(),
            &[
                Call::ConsumerPress(consumer::MUTE),
                Call::ConsumerPress(consumer::BRIGHTNESS_UP),
                Call::Wait(100),
                Call::ConsumerRelease(consumer::MUTE),
                Call::ConsumerRelease(consumer::BRIGHTNESS_UP),
                Call::ConsumerPress(consumer::LAUNCH_CALCULATOR),
                Call::Wait(100),
                Call::ConsumerRelease(consumer::LAUNCH_CALCULATOR),
                Call::ConsumerReleaseAll,
            ]
        );
    }

    #[test]
    fn system_key_writes_only_first_code() {
        let cfg = KeyConfig::new(
            0,
            KeyType::System,
            &[],
            &[
                ActionStep::new(100, &[system::SLEEP, system::WAKE_UP]),
                ActionStep::tap(&[system::POWER_DOWN]),
            ],
        );
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        assert_eq!(log.calls().as_slice(), &[Call::SystemWrite(system::SLEEP)]);
    }

    #[test]
    fn system_key_without_code_is_silent() {
        let cfg = KeyConfig::new(0, KeyType::System, &[], &[]);
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());
        assert!(log.calls().is_empty());
    }

    #[test]
    fn mouse_move_then_click() {
        let cfg = KeyConfig::mouse(
            0,
            &[
                ActionStep::new(10200, &[10005, 9995, 10000]),
                ActionStep::new(150, &[mouse::LEFT, mouse::MIDDLE]),
            ],
        );
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        assert_eq!(
            log.calls().as_slice(),
            &[
                Call::MouseMove(5, -5, 0),
                Call::Wait(200),
                Call::MousePress(1),
                Call::MousePress(4),
                Call::Wait(150),
                Call::MouseRelease(1),
                Call::MouseRelease(4),
                Call::MouseReleaseAll,
            ]
        );
    }

    #[test]
    fn mouse_move_without_wait_skips_delay() {
        let cfg = KeyConfig::mouse(0, &[ActionStep::mouse_move(0, 0, 3, 0)]);
        let log = Log::new();
        run(&cfg, &log, &mut Mode::new());

        assert_eq!(
            log.calls().as_slice(),
            &[Call::MouseMove(0, 0, 3), Call::MouseReleaseAll]
        );
    }

    #[test]
    fn modifier_key_sets_flag_without_output() {
        let cfg = KeyConfig::modifier(0);
        let log = Log::new();
        let mut mode = Mode::new();
        run(&cfg, &log, &mut mode);

        assert!(mode.is_modified());
        assert!(log.calls().is_empty());
    }

    #[test]
    fn encoder_actions_map_to_single_calls() {
        let log = Log::new();
        let mut out = outputs(&log);
        let mut mode = Mode::new();

        block_on(async {
            dispatch_encoder(EncoderAction::Wheel(-1), &mut out, &mut mode).await;
            dispatch_encoder(EncoderAction::Pan(1), &mut out, &mut mode).await;
            dispatch_encoder(EncoderAction::Consumer(consumer::PLAY_PAUSE), &mut out, &mut mode)
                .await;
            dispatch_encoder(EncoderAction::Key(key::F21), &mut out, &mut mode).await;
            dispatch_encoder(EncoderAction::ToggleModifier, &mut out, &mut mode).await;
        });

        assert_eq!(
            log.calls().as_slice(),
            &[
                Call::MouseMove(0, 0, -1),
                Call::MousePan(1),
                Call::ConsumerPress(consumer::PLAY_PAUSE),
                Call::ConsumerRelease(consumer::PLAY_PAUSE),
                Call::KeyPress(key::F21),
                Call::KeyRelease(key::F21),
            ]
        );
        assert!(mode.is_modified());
    }
}
