//! Firewatch Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-cadence main loop and
//! interrupt-driven operator inputs.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            LogEventSink      MonotonicClock   │
//! │  (Sensor+Alert+Display)     (EventSink)                        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              MonitorService (pure logic)               │    │
//! │  │  Classifier · AlertSequencer · ReportLatch             │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  GPIO ISRs ──▶ InputEventSource ──▶ SharedStatus (atomics)     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info, warn};

use esp_idf_svc::hal::delay::Ets;
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::FromValueType;

use firewatch::adapters::hardware::HardwareAdapter;
use firewatch::adapters::log_sink::LogEventSink;
use firewatch::adapters::time::MonotonicClock;
use firewatch::app::service::MonitorService;
use firewatch::config::MonitorConfig;
use firewatch::drivers::buzzer::{Buzzer, BuzzerPattern};
use firewatch::drivers::display::OledDisplay;
use firewatch::drivers::hw_init;
use firewatch::drivers::led_matrix::{LedMatrix, RmtWs2812};
use firewatch::drivers::status_led::StatusLed;
use firewatch::inputs::InputEventSource;
use firewatch::pins;
use firewatch::sensors::SensorHub;
use firewatch::status::SharedStatus;

// ── ISR-shared state ──────────────────────────────────────────
//
// Both live for the whole program so the GPIO ISRs can hold plain
// `'static` references.  The debounce interval is fixed at build time
// because the ISR table is wired before any config could be loaded.

static STATUS: SharedStatus = SharedStatus::new();
static INPUTS: InputEventSource<'static> = InputEventSource::new(&STATUS, DEBOUNCE_MS);

const DEBOUNCE_MS: u32 = 200;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Firewatch v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = MonitorConfig::default();
    config.validate()?;
    if config.debounce_ms != DEBOUNCE_MS {
        warn!(
            "Configured debounce {}ms ignored, ISR gates use {}ms",
            config.debounce_ms, DEBOUNCE_MS
        );
    }

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without inputs and ADC there is nothing to monitor.
        error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service(&INPUTS) {
        error!("ISR service init failed: {}, continuing without buttons", e);
    }

    // ── 3. Construct drivers ──────────────────────────────────
    let p = Peripherals::take()?;

    let i2c = I2cDriver::new(
        p.i2c0,
        p.pins.gpio14,
        p.pins.gpio15,
        &I2cConfig::new().baudrate(pins::DISPLAY_I2C_FREQ_HZ.Hz().into()),
    )?;
    let display = match OledDisplay::new(i2c) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!("Display init failed ({}), continuing headless", e);
            None
        }
    };

    let matrix = LedMatrix::new(RmtWs2812::new(p.rmt.channel0, p.pins.gpio7)?);
    let buzzer = Buzzer::new(
        PinDriver::output(p.pins.gpio21)?,
        Ets,
        BuzzerPattern::from_config(&config),
    );

    let mut hw = HardwareAdapter::new(
        SensorHub::new(&config),
        StatusLed::new(),
        matrix,
        buzzer,
        display,
    );
    let mut log_sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 4. Construct the monitor service ──────────────────────
    let loop_interval = std::time::Duration::from_millis(u64::from(config.loop_interval_ms));
    let mut monitor = MonitorService::new(config, &STATUS)?;
    monitor.start(&mut hw, &mut log_sink);

    info!("System ready at {}ms. Entering main loop.", clock.uptime_ms());

    // ── 5. Main loop ──────────────────────────────────────────
    loop {
        monitor.tick(&mut hw, &mut log_sink);
        std::thread::sleep(loop_interval);
    }
}
