//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger on target, UART / USB-CDC).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                gain,
                integration_time,
            } => {
                info!("START | gain={} iwin={}", gain, integration_time);
            }
            AppEvent::GainChanged { name, code } => {
                info!("GAIN  | {} (ctrl=0x{:02x})", name, code.bits());
            }
            AppEvent::IntegrationTimeChanged { name, code } => {
                info!("IWIN  | {} ({} ms)", name, code.millis());
            }
            // Fires every tick while a button is held inside the window.
            AppEvent::PressIgnored { mask } => {
                debug!("PRESS | ignored, mask=0b{:02b}", mask);
            }
            AppEvent::SensorFault => {
                warn!("FAULT | sensor saturated, showing placeholder");
            }
        }
    }
}
