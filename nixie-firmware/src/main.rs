//! Nixie clock firmware
//!
//! Four-tube Nixie clock on an RP2040. The DS3231 keeps the time, the tubes
//! are refreshed from it on a fixed period, and a BLE coprocessor on UART0
//! lets a phone read and set the time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nixie_core::clock::{StartupReport, TimeSource};
use nixie_core::display::RenderLoop;
use nixie_core::time::WallClockTime;
use nixie_drivers::{Ds3231, NixieMultiplexer};
use nixie_hal::I2cConfig;
use nixie_hal_rp2040::{PinBank, RpI2c, RpOutput};
use nixie_protocol::ControllerCommand;

mod channels;
mod config;
mod link;
mod tasks;

use crate::channels::OUTBOUND;

/// DS3231 on I2C0
pub type Rtc = Ds3231<RpI2c<'static, I2C0>>;

/// Wall-clock time shared by the render and sync tasks
pub type ClockSource = TimeSource<CriticalSectionRawMutex, Rtc>;

/// The four tube multiplexers
pub type Tubes = NixieMultiplexer<RpOutput>;

/// Firmware build time (UTC), set by build.rs
const BUILD_TIMESTAMP: &str = env!("NIXIE_BUILD_TIMESTAMP");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

static TIME_SOURCE: StaticCell<ClockSource> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nixie clock firmware starting...");

    let p = embassy_rp::init(Default::default());
    let (mut bank, board) = PinBank::split(p);
    info!("Peripherals initialized");

    let config = config::load();

    // Tube multiplexers
    let mapping = match config.mapping() {
        Ok(mapping) => mapping,
        Err(e) => {
            error!("Tube mapping rejected: {}", e);
            halt();
        }
    };
    let lines = match bank.take_outputs(&mapping) {
        Ok(lines) => lines,
        Err(e) => {
            error!("Tube select lines unavailable: {}", e);
            halt();
        }
    };
    let mut tubes = NixieMultiplexer::new(lines);
    tubes.init();
    info!("Tubes initialized: {}", mapping);

    let layout = match config.digit_layout() {
        Ok(layout) => layout,
        Err(e) => {
            error!("Digit layout rejected: {}", e);
            halt();
        }
    };

    // RTC
    let i2c = RpI2c::new(board.i2c0, board.rtc_scl, board.rtc_sda, I2cConfig::default());
    let rtc = Ds3231::with_address(i2c, config.rtc.i2c_address);

    let fallback = WallClockTime::parse_timestamp(BUILD_TIMESTAMP).unwrap_or_else(|| {
        warn!("Unparseable build timestamp {}", BUILD_TIMESTAMP);
        WallClockTime::EPOCH
    });

    let (source, report) = match TimeSource::start(rtc, fallback) {
        Ok(started) => started,
        Err(e) => {
            error!("RTC unavailable: {}", e);
            halt();
        }
    };
    match report {
        StartupReport::Running => info!("RTC running"),
        StartupReport::RestoredFromBuildTime(time) => {
            warn!("RTC lost power, set to build time {}", time)
        }
    }
    let source: &'static ClockSource = TIME_SOURCE.init(source);

    // Radio coprocessor link
    let tx_buf = TX_BUF.init([0u8; 128]);
    let rx_buf = RX_BUF.init([0u8; 128]);

    let uart = Uart::new_blocking(
        board.uart0,
        board.radio_tx,
        board.radio_rx,
        UartConfig::default(), // 115200 baud
    );
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for radio link");

    match ControllerCommand::advertise(config.radio.name.as_str()) {
        Ok(command) => {
            if OUTBOUND.try_send(command).is_err() {
                warn!("Outbound channel full, not advertising");
            }
        }
        Err(e) => warn!("Cannot advertise name: {}", e),
    }

    let sweep_step = Duration::from_millis(u64::from(config.display.sweep_step_ms));
    let sweep = config.boot_sweep().map(|sweep| (sweep, sweep_step));
    let settings = tasks::RenderSettings {
        render: RenderLoop::new(layout),
        period: Duration::from_millis(u64::from(config.display.render_period_ms)),
        sweep,
    };

    // Spawn tasks
    spawner
        .spawn(tasks::render_task(source, tubes, settings))
        .unwrap();
    spawner.spawn(tasks::radio_rx_task(rx)).unwrap();
    spawner.spawn(tasks::radio_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::sync_task(source, config.sync.bounds))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Stop for good; only a reset recovers
fn halt() -> ! {
    error!("Halted");
    loop {
        cortex_m::asm::wfi();
    }
}
