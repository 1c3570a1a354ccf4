//! Hardware adapter: bridges the peripheral drivers to the port traits.
//!
//! | Driver                   | Port          |
//! |--------------------------|---------------|
//! | [`Tsl2591`]              | [`SensorPort`]  |
//! | [`ShiftRegisterButtons`] | [`InputPort`]   |
//! | [`TextPanel`]            | [`DisplaySink`] |
//!
//! Each driver is generic over `embedded-hal` traits, so the same impls
//! run against ESP-IDF peripherals on target and mock pins/buses on host.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;

use crate::app::display::Field;
use crate::app::ports::{DisplaySink, InputPort, SensorPort};
use crate::control::debounce::ButtonMask;
use crate::drivers::panel::{Panel, TextPanel};
use crate::drivers::shift_buttons::{BUTTON_A_BIT, BUTTON_B_BIT, ShiftRegisterButtons};
use crate::error::{DisplayError, InputError, SensorError};
use crate::sensors::tsl2591::Tsl2591;
use crate::sensors::{Gain, IntegrationTime};

// ── SensorPort implementation ─────────────────────────────────

impl<I2C: I2c> SensorPort for Tsl2591<I2C> {
    fn read(&mut self) -> Result<f32, SensorError> {
        self.lux()
    }

    fn set_gain(&mut self, gain: Gain) -> Result<(), SensorError> {
        Tsl2591::set_gain(self, gain)
    }

    fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), SensorError> {
        Tsl2591::set_integration_time(self, time)
    }
}

// ── InputPort implementation ──────────────────────────────────

/// Translate a raw shift-register sample into the loop's button mask.
///
/// A cycles gain, B cycles integration time; every other input is
/// ignored.
pub fn buttons_to_mask(sample: u8) -> ButtonMask {
    let mut mask = ButtonMask::NONE;
    if sample & (1 << BUTTON_A_BIT) != 0 {
        mask = mask | ButtonMask::GAIN;
    }
    if sample & (1 << BUTTON_B_BIT) != 0 {
        mask = mask | ButtonMask::INTEGRATION_TIME;
    }
    mask
}

impl<LATCH, CLOCK, DATA> InputPort for ShiftRegisterButtons<LATCH, CLOCK, DATA>
where
    LATCH: OutputPin,
    CLOCK: OutputPin,
    DATA: InputPin,
{
    fn poll(&mut self) -> Result<ButtonMask, InputError> {
        self.sample().map(buttons_to_mask)
    }
}

// ── DisplaySink implementation ────────────────────────────────

impl<D: Panel> DisplaySink for TextPanel<D> {
    fn set_field(&mut self, field: Field, text: &str) -> Result<(), DisplayError> {
        self.set_text(field, text);
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        self.redraw()
    }
}
