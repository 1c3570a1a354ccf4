//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] owns the two setting cycles, the shared debounce gate
//! and the display state. All I/O flows through port traits borrowed at
//! each call, so the loop is testable with mock adapters.
//!
//! ```text
//!  InputPort ──▶ ┌────────────────────────────┐ ──▶ DisplaySink
//!                │        ControlLoop         │
//! SensorPort ◀──▶│ Debouncer · SettingCycle×2 │ ──▶ EventSink
//!                └────────────────────────────┘
//! ```
//!
//! Per tick, strictly in this order: buttons → sensor settings → sensor
//! read → display push. [`ControlLoop::run`] then sleeps one period after
//! the work, so ticks drift under load.

use core::convert::Infallible;
use core::time::Duration;

use log::{debug, info, trace, warn};

use crate::config::{GAIN_OPTIONS, INTEGRATION_TIME_OPTIONS, LoopConfig};
use crate::control::cycle::SettingCycle;
use crate::control::debounce::{ButtonMask, Debouncer};
use crate::error::{Error, Result};
use crate::sensors::{Gain, IntegrationTime};

use super::display::DisplayState;
use super::events::AppEvent;
use super::ports::{Clock, DisplaySink, EventSink, InputPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// Tick report
// ───────────────────────────────────────────────────────────────

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// The debouncer accepted this tick's buttons.
    pub accepted: bool,
    pub gain_changed: bool,
    pub integration_time_changed: bool,
    /// `None` when the sensor reported a transient fault.
    pub reading: Option<f32>,
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop {
    gain: SettingCycle<Gain>,
    integration_time: SettingCycle<IntegrationTime>,
    debouncer: Debouncer,
    display: DisplayState,
    tick_period: Duration,
    arm_debounce_at_start: bool,
    tick_count: u64,
}

impl ControlLoop {
    /// Build the loop from configuration.
    ///
    /// Fails fast if a default option is not in its table. Does **not**
    /// touch hardware; call [`start`](Self::start) next.
    pub fn new(config: &LoopConfig) -> Result<Self> {
        config.validate()?;
        let gain = SettingCycle::new(
            "gain",
            &GAIN_OPTIONS,
            config.default_gain,
            ButtonMask::GAIN,
        )?;
        let integration_time = SettingCycle::new(
            "integration time",
            &INTEGRATION_TIME_OPTIONS,
            config.default_integration_time,
            ButtonMask::INTEGRATION_TIME,
        )?;
        let display = DisplayState::new(gain.current().name, integration_time.current().name);

        Ok(Self {
            gain,
            integration_time,
            debouncer: Debouncer::new(config.button_deadtime),
            display,
            tick_period: config.tick_period,
            arm_debounce_at_start: config.arm_debounce_at_start,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Apply the default settings to the sensor and draw the first frame.
    pub fn start(
        &mut self,
        now: Duration,
        sensor: &mut impl SensorPort,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        sensor.set_integration_time(self.integration_time.current().code)?;
        sensor.set_gain(self.gain.current().code)?;

        if self.arm_debounce_at_start {
            self.debouncer.arm(now);
        }

        self.push_display(display)?;

        let gain = self.gain.current().name;
        let integration_time = self.integration_time.current().name;
        sink.emit(&AppEvent::Started {
            gain,
            integration_time,
        });
        info!("ControlLoop started: gain={} iwin={}", gain, integration_time);
        Ok(())
    }

    /// Start, then tick forever with a fixed sleep after each tick.
    ///
    /// Only returns on a fatal error.
    pub fn run(
        &mut self,
        clock: &mut impl Clock,
        sensor: &mut impl SensorPort,
        input: &mut impl InputPort,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Result<Infallible> {
        self.start(clock.now(), sensor, display, sink)?;
        loop {
            self.tick(clock.now(), sensor, input, display, sink)?;
            clock.sleep(self.tick_period);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one tick at time `now`: buttons → settings → read → display.
    pub fn tick(
        &mut self,
        now: Duration,
        sensor: &mut impl SensorPort,
        input: &mut impl InputPort,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Result<TickReport> {
        self.tick_count += 1;
        let mut report = TickReport::default();

        // 1. Buttons
        let mask = input.poll()?;
        trace!("buttons: 0b{:02b}", mask.0);

        // 2. Debounced setting changes
        if !mask.is_empty() {
            if self.debouncer.try_accept(now, mask) {
                report.accepted = true;
                report.gain_changed = self.apply_gain(mask, sensor, sink)?;
                report.integration_time_changed =
                    self.apply_integration_time(mask, sensor, sink)?;
            } else {
                sink.emit(&AppEvent::PressIgnored { mask: mask.0 });
            }
        }

        // 3. Sensor read; only the transient fault is absorbed
        report.reading = match sensor.read() {
            Ok(lux) => Some(lux),
            Err(e) if e.is_transient() => {
                warn!("Sensor fault on tick {}: {}", self.tick_count, e);
                sink.emit(&AppEvent::SensorFault);
                None
            }
            Err(e) => return Err(Error::Sensor(e)),
        };
        self.display.set_reading(report.reading);

        // 4. Display push, every field every tick
        self.push_display(display)?;

        Ok(report)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn gain(&self) -> &'static str {
        self.gain.current().name
    }

    pub fn integration_time(&self) -> &'static str {
        self.integration_time.current().name
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_gain(
        &mut self,
        mask: ButtonMask,
        sensor: &mut impl SensorPort,
        sink: &mut impl EventSink,
    ) -> Result<bool> {
        if !mask.contains(self.gain.button()) {
            return Ok(false);
        }
        let option = self.gain.advance();
        sensor.set_gain(option.code)?;
        self.display.set_gain(option.name);
        debug!("{} -> {}", self.gain.parameter(), option.name);
        sink.emit(&AppEvent::GainChanged {
            name: option.name,
            code: option.code,
        });
        Ok(true)
    }

    fn apply_integration_time(
        &mut self,
        mask: ButtonMask,
        sensor: &mut impl SensorPort,
        sink: &mut impl EventSink,
    ) -> Result<bool> {
        if !mask.contains(self.integration_time.button()) {
            return Ok(false);
        }
        let option = self.integration_time.advance();
        sensor.set_integration_time(option.code)?;
        self.display.set_integration_time(option.name);
        debug!("{} -> {}", self.integration_time.parameter(), option.name);
        sink.emit(&AppEvent::IntegrationTimeChanged {
            name: option.name,
            code: option.code,
        });
        Ok(true)
    }

    fn push_display(&self, display: &mut impl DisplaySink) -> Result<()> {
        for (field, text) in self.display.iter() {
            display.set_field(field, text)?;
        }
        display.refresh()?;
        Ok(())
    }
}
