//! Luxpanel Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single fixed-period control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Tsl2591           ShiftRegisterButtons   TextPanel<Oled>      │
//! │  (SensorPort)      (InputPort)            (DisplaySink)        │
//! │  Esp32Clock        LogEventSink                                │
//! │  (Clock)           (EventSink)                                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ControlLoop (pure logic)                  │    │
//! │  │  Debouncer · SettingCycle<Gain> · SettingCycle<IWin>   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info};

use luxpanel::Error;
use luxpanel::adapters::log_sink::LogEventSink;
use luxpanel::adapters::time::Esp32Clock;
use luxpanel::app::service::ControlLoop;
use luxpanel::config::LoopConfig;
use luxpanel::drivers::oled;
use luxpanel::drivers::panel::TextPanel;
use luxpanel::drivers::shift_buttons::ShiftRegisterButtons;
use luxpanel::pins;
use luxpanel::sensors::tsl2591::Tsl2591;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Luxpanel v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    // Fails before any peripheral is touched if a default is bad.
    let config = LoopConfig::default();
    let mut app = ControlLoop::new(&config)?;
    info!(
        "Config: tick={:?} deadtime={:?} gain={} iwin={}",
        config.tick_period,
        config.button_deadtime,
        config.default_gain,
        config.default_integration_time
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ));

    // SAFETY: each GPIO number in `pins` is claimed exactly once here and
    // `peripherals.pins` is never used.
    let (sensor_sda, sensor_scl, display_sda, display_scl) = unsafe {
        (
            AnyIOPin::new(pins::SENSOR_SDA_GPIO),
            AnyIOPin::new(pins::SENSOR_SCL_GPIO),
            AnyIOPin::new(pins::DISPLAY_SDA_GPIO),
            AnyIOPin::new(pins::DISPLAY_SCL_GPIO),
        )
    };
    // SAFETY: as above.
    let (latch_pin, clock_pin, data_pin) = unsafe {
        (
            AnyOutputPin::new(pins::BUTTON_LATCH_GPIO),
            AnyOutputPin::new(pins::BUTTON_CLOCK_GPIO),
            AnyInputPin::new(pins::BUTTON_DATA_GPIO),
        )
    };

    let sensor_i2c = I2cDriver::new(peripherals.i2c0, sensor_sda, sensor_scl, &i2c_config)?;
    let display_i2c = I2cDriver::new(peripherals.i2c1, display_sda, display_scl, &i2c_config)?;

    // ── 4. Drivers / adapters ─────────────────────────────────
    let mut sensor = Tsl2591::new(sensor_i2c);
    sensor.init().map_err(Error::from)?;

    let mut display = TextPanel::new(oled::init(display_i2c).map_err(Error::from)?);
    info!("OLED: ready");

    let mut buttons = ShiftRegisterButtons::new(
        PinDriver::output(latch_pin)?,
        PinDriver::output(clock_pin)?,
        PinDriver::input(data_pin)?,
    );

    let mut clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();

    // ── 5. Control loop ───────────────────────────────────────
    info!("System ready. Entering control loop.");
    let Err(e) = app.run(&mut clock, &mut sensor, &mut buttons, &mut display, &mut sink);
    error!("Control loop stopped: {}", e);
    Err(e.into())
}
