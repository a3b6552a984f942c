//! USB HID composite device - keyboard, mouse, consumer and system control.
//!
//! One HID interface per report type on the nRF52840 USBD peripheral, each
//! wrapped as a [`ReportWriter`] for the library's HID backends.

use defmt::info;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use macropad::config;
use macropad::hid::ReportWriter;
use macropad::Error;
use static_cell::StaticCell;
use usbd_hid::descriptor::{
    AsInputReport, KeyboardReport, MediaKeyboardReport, MouseReport, SerializedDescriptor,
    SystemControlReport,
};

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Largest report of the four interfaces fits one 8-byte packet.
const HID_PACKET_SIZE: usize = 8;

/// Descriptor and control buffers handed to the USB builder.
struct UsbBuffers {
    config_descriptor: [u8; 256],
    bos_descriptor: [u8; 256],
    msos_descriptor: [u8; 256],
    control: [u8; 128],
}

static BUFFERS: StaticCell<UsbBuffers> = StaticCell::new();
static HID_STATES: StaticCell<[State; 4]> = StaticCell::new();
static BUS_HANDLER: StaticCell<BusHandler> = StaticCell::new();
static BUS_SUSPENDED: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Forwards bus suspend/resume to [`suspend_signal`].
struct BusHandler;

impl embassy_usb::Handler for BusHandler {
    fn suspended(&mut self, suspended: bool) {
        BUS_SUSPENDED.signal(suspended);
    }
}

/// Latest bus state: `true` once the host suspends, `false` on resume.
pub fn suspend_signal() -> &'static Signal<CriticalSectionRawMutex, bool> {
    &BUS_SUSPENDED
}

/// One HID IN endpoint, fed with `usbd-hid` reports.
pub struct UsbReportWriter(HidWriter<'static, UsbDriver, HID_PACKET_SIZE>);

impl<R: AsInputReport> ReportWriter<R> for UsbReportWriter {
    async fn write_report(&mut self, report: &R) -> Result<(), Error> {
        self.0.write_serialize(report).await.map_err(|_| Error::Usb)
    }
}

/// Build result containing the USB device runner and one writer per interface.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard: UsbReportWriter,
    pub mouse: UsbReportWriter,
    pub consumer: UsbReportWriter,
    pub system: UsbReportWriter,
}

fn add_interface(
    builder: &mut Builder<'static, UsbDriver>,
    state: &'static mut State<'static>,
    report_descriptor: &'static [u8],
) -> UsbReportWriter {
    let config = HidConfig {
        report_descriptor,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: HID_PACKET_SIZE as u16,
    };
    UsbReportWriter(HidWriter::new(builder, state, config))
}

/// Bring up the USB driver and register the four HID interfaces.
///
/// Call once; the static buffers are taken here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut device_config = Config::new(config::USB_VID, config::USB_PID);
    device_config.manufacturer = Some(config::USB_MANUFACTURER);
    device_config.product = Some(config::USB_PRODUCT);
    device_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    device_config.max_power = 100; // mA
    device_config.max_packet_size_0 = 64;

    let buffers = BUFFERS.init(UsbBuffers {
        config_descriptor: [0; 256],
        bos_descriptor: [0; 256],
        msos_descriptor: [0; 256],
        control: [0; 128],
    });
    let mut builder = Builder::new(
        driver,
        device_config,
        &mut buffers.config_descriptor,
        &mut buffers.bos_descriptor,
        &mut buffers.msos_descriptor,
        &mut buffers.control,
    );
    builder.handler(BUS_HANDLER.init(BusHandler));

    let [kb_state, mouse_state, consumer_state, system_state] =
        HID_STATES.init([State::new(), State::new(), State::new(), State::new()]);

    let keyboard = add_interface(&mut builder, kb_state, KeyboardReport::desc());
    let mouse = add_interface(&mut builder, mouse_state, MouseReport::desc());
    let consumer = add_interface(&mut builder, consumer_state, MediaKeyboardReport::desc());
    let system = add_interface(&mut builder, system_state, SystemControlReport::desc());

    info!("USB HID composite device ready (keyboard, mouse, consumer, system)");

    UsbHidDevice {
        device: builder.build(),
        keyboard,
        mouse,
        consumer,
        system,
    }
}

/// Service the bus forever. Spawn on its own task.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device running");
    device.run().await
}
