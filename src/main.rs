//! Macro pad firmware for the nRF52840.
//!
//! Three concurrent pieces:
//! - the USB device task (enumeration, suspend/resume),
//! - the encoder task, sampling the quadrature lines and push-button every
//!   millisecond into a shared [`Sampler`],
//! - the control loop on the main task, polling the key bank and the
//!   sampler through [`MacroPad`] and writing HID reports.

#![no_std]
#![no_main]

mod usb;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::config::{Config as NrfConfig, HfclkSource};
use embassy_nrf::gpio::{Input, Pull};
use embassy_time::{Delay, Duration, Instant, Ticker};
use macropad::config::{self, ButtonTiming};
use macropad::hid::{HidConsumer, HidKeyboard, HidMouse, HidSystem};
use macropad::{keymap, Clock, EncoderService, MacroPad, Outputs, PinBank, Sampler};
use {defmt_rtt as _, panic_probe as _};

use crate::usb::hid_device::{self, UsbDriver};

static SAMPLER: Sampler = Sampler::new();

/// Milliseconds since boot, truncated to `u32`.
struct Uptime;

impl Clock for Uptime {
    fn now_millis(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

#[embassy_executor::task]
async fn usb_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn encoder_task(dt: Input<'static>, clk: Input<'static>, sw: Input<'static>) -> ! {
    let mut service = EncoderService::new(config::ENCODER_STEPS_PER_NOTCH, ButtonTiming::DEFAULT);
    let period = Duration::from_micros(config::ENCODER_SERVICE_PERIOD_US);
    let dt_ms = (period.as_millis() as u32).max(1);
    let mut ticker = Ticker::every(period);

    info!("Encoder task started");
    loop {
        service.service(dt.is_high(), clk.is_high(), sw.is_low(), dt_ms, &SAMPLER);
        ticker.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut nrf_config = NrfConfig::default();
    nrf_config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(nrf_config);

    info!(
        "macropad v{} starting (VID:PID {=u16:#x}:{=u16:#x})",
        env!("CARGO_PKG_VERSION"),
        config::USB_VID,
        config::USB_PID
    );

    let usb = hid_device::init(p.USBD);
    unwrap!(spawner.spawn(usb_task(usb.device)));

    let dt = Input::new(p.P0_29, Pull::Up);
    let clk = Input::new(p.P0_31, Pull::Up);
    let sw = Input::new(p.P0_30, Pull::Up);
    unwrap!(spawner.spawn(encoder_task(dt, clk, sw)));

    let mut keys = PinBank::new([
        Input::new(p.P0_02, Pull::Up),
        Input::new(p.P0_03, Pull::Up),
        Input::new(p.P0_04, Pull::Up),
        Input::new(p.P0_05, Pull::Up),
        Input::new(p.P0_28, Pull::Up),
        Input::new(p.P0_11, Pull::Up),
        Input::new(p.P0_12, Pull::Up),
        Input::new(p.P0_24, Pull::Up),
    ]);

    let mut out = Outputs::new(
        HidKeyboard::new(usb.keyboard),
        HidConsumer::new(usb.consumer),
        HidSystem::new(usb.system),
        HidMouse::new(usb.mouse),
    );

    let profile = keymap::active();
    let mut pad = MacroPad::new(&profile.keys, profile.policy);
    let mut delay = Delay;
    let clock = Uptime;

    info!("Control loop running with {}", profile.policy);

    let mut ticker = Ticker::every(Duration::from_millis(config::CONTROL_LOOP_PERIOD_MS));
    let mut suspended = false;
    loop {
        if suspended {
            suspended = hid_device::suspend_signal().wait().await;
            if !suspended {
                info!("USB resumed, polling again");
                ticker.reset();
            }
            continue;
        }

        pad.poll(&clock, &mut keys, &SAMPLER, &mut out, &mut delay).await;

        let tick = select(ticker.next(), hid_device::suspend_signal().wait()).await;
        if let Either::Second(state) = tick {
            suspended = state;
            if suspended {
                info!("USB suspended, pausing control loop");
            }
        }
    }
}
