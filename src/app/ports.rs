//! Port traits: the hexagonal boundary between the control loop and the
//! hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Drivers (light sensor, button shift register, text panel, clock)
//! implement these traits. The [`ControlLoop`](super::service::ControlLoop)
//! borrows them per call, so the core never touches hardware directly and
//! runs unchanged against the mocks in `tests/integration/`.

use core::time::Duration;

use crate::app::display::Field;
use crate::control::debounce::ButtonMask;
use crate::error::{DisplayError, InputError, SensorError};
use crate::sensors::{Gain, IntegrationTime};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// The light sensor as the control loop sees it.
pub trait SensorPort {
    /// Latest calibrated illuminance in lux.
    ///
    /// [`SensorError::Saturated`] is the only error the loop absorbs;
    /// every other variant stops it.
    fn read(&mut self) -> Result<f32, SensorError>;

    /// Apply a gain code selected from the gain cycle.
    fn set_gain(&mut self, gain: Gain) -> Result<(), SensorError>;

    /// Apply an integration-time code selected from its cycle.
    fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw button state. Must not block.
pub trait InputPort {
    /// Bitmask of the buttons held down right now.
    fn poll(&mut self) -> Result<ButtonMask, InputError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Fixed-layout text display with one slot per [`Field`].
pub trait DisplaySink {
    /// Replace the text of one field. Idempotent.
    fn set_field(&mut self, field: Field, text: &str) -> Result<(), DisplayError>;

    /// Present the frame once every field of the tick has been set.
    /// Sinks that draw in `set_field` keep the default.
    fn refresh(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source plus the end-of-tick sleep.
pub trait Clock {
    /// Time since boot. Never goes backwards.
    fn now(&self) -> Duration;

    /// Block the loop for `period`.
    fn sleep(&mut self, period: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
