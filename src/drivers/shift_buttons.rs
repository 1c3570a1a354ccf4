//! 74HC165 parallel-in / serial-out button reader.
//!
//! The handheld's face buttons sit on a single 8-bit shift register. A
//! sample is one latch pulse followed by eight clocked reads:
//!
//! ```text
//! LATCH  ▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▁▁
//! CLOCK  ▔▔▁▁▔▔▁▁▔▔ ... ▁▁▔▔
//! DATA      b7  b6       b0        (active-low)
//! ```
//!
//! The first bit shifted out lands in the MSB. Buttons pull their line
//! low when pressed, so the raw byte is inverted before it is returned.
//!
//! ## Dual-target design
//!
//! Generic over `embedded_hal::digital` pins: `PinDriver` on ESP-IDF,
//! `embedded-hal-mock` pins on host.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::InputError;

/// Bit position of the B button in a sample.
pub const BUTTON_B_BIT: u8 = 0;
/// Bit position of the A button in a sample.
pub const BUTTON_A_BIT: u8 = 1;
/// Bit position of START.
pub const BUTTON_START_BIT: u8 = 2;
/// Bit position of SELECT.
pub const BUTTON_SELECT_BIT: u8 = 3;

pub struct ShiftRegisterButtons<LATCH, CLOCK, DATA> {
    latch: LATCH,
    clock: CLOCK,
    data: DATA,
}

impl<LATCH, CLOCK, DATA> ShiftRegisterButtons<LATCH, CLOCK, DATA>
where
    LATCH: OutputPin,
    CLOCK: OutputPin,
    DATA: InputPin,
{
    pub fn new(latch: LATCH, clock: CLOCK, data: DATA) -> Self {
        Self { latch, clock, data }
    }

    /// Sample all eight inputs. Bit set = button held.
    pub fn sample(&mut self) -> Result<u8, InputError> {
        // Latch high loads the parallel inputs and enables shifting.
        self.latch.set_high().map_err(|_| InputError::PinWrite)?;

        let mut bits = 0u8;
        for _ in 0..8 {
            self.clock.set_low().map_err(|_| InputError::PinWrite)?;
            bits <<= 1;
            if self.data.is_low().map_err(|_| InputError::PinRead)? {
                bits |= 1;
            }
            self.clock.set_high().map_err(|_| InputError::PinWrite)?;
        }

        self.latch.set_low().map_err(|_| InputError::PinWrite)?;
        Ok(bits)
    }

    /// Give the pins back.
    pub fn release(self) -> (LATCH, CLOCK, DATA) {
        (self.latch, self.clock, self.data)
    }
}
