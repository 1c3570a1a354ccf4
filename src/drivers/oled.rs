//! SSD1306 OLED bring-up for the text panel.

use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;

use crate::drivers::panel::Panel;
use crate::error::DisplayError;

/// Concrete display driver, generic over the HAL's I²C peripheral.
pub type Oled<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the controller and blank the glass.
pub fn init<I2C>(i2c: I2C) -> Result<Oled<I2C>, DisplayError>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| DisplayError::Flush)?;
    display.clear_buffer();
    display.flush().map_err(|_| DisplayError::Flush)?;
    Ok(display)
}

impl<I2C> Panel for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn present(&mut self) -> Result<(), DisplayError> {
        self.flush().map_err(|_| DisplayError::Flush)
    }
}
