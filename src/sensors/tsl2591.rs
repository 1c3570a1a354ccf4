//! TSL2591 high-dynamic-range light sensor driver.
//!
//! Two photodiode channels (full spectrum and IR) are integrated over a
//! programmable window and read back as 16-bit counts over I²C. The lux
//! figure is derived from both channels using the vendor's equation.
//!
//! Gain and integration time share the CONTROL register, so the driver
//! caches both and always writes the full byte.

use embedded_hal::i2c::I2c;
use log::{debug, info};

use super::{Gain, IntegrationTime};
use crate::error::SensorError;

pub const I2C_ADDRESS: u8 = 0x29;

const COMMAND_BIT: u8 = 0xA0;

const REG_ENABLE: u8 = 0x00;
const REG_CONTROL: u8 = 0x01;
const REG_DEVICE_ID: u8 = 0x12;
const REG_C0DATAL: u8 = 0x14;

const DEVICE_ID: u8 = 0x50;

const ENABLE_POWERON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;

/// Lux device factor from the vendor application note.
const LUX_DF: f32 = 408.0;

pub struct Tsl2591<I2C> {
    i2c: I2C,
    gain: Gain,
    integration_time: IntegrationTime,
}

impl<I2C: I2c> Tsl2591<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            gain: Gain::Med,
            integration_time: IntegrationTime::Ms100,
        }
    }

    /// Verify the device ID, program the cached CONTROL value and power
    /// up the ALS engine.
    pub fn init(&mut self) -> Result<(), SensorError> {
        let id = self.read_register(REG_DEVICE_ID)?;
        if id != DEVICE_ID {
            return Err(SensorError::BadDeviceId { found: id });
        }
        self.write_control(self.gain, self.integration_time)?;
        self.write_register(REG_ENABLE, ENABLE_POWERON | ENABLE_AEN)?;
        info!("TSL2591: powered on (id=0x{:02x})", id);
        Ok(())
    }

    pub fn gain(&self) -> Gain {
        self.gain
    }

    pub fn integration_time(&self) -> IntegrationTime {
        self.integration_time
    }

    pub fn set_gain(&mut self, gain: Gain) -> Result<(), SensorError> {
        self.write_control(gain, self.integration_time)?;
        self.gain = gain;
        Ok(())
    }

    pub fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), SensorError> {
        self.write_control(self.gain, time)?;
        self.integration_time = time;
        Ok(())
    }

    /// Raw `(full_spectrum, infrared)` channel counts.
    pub fn raw_luminosity(&mut self) -> Result<(u16, u16), SensorError> {
        let mut buf = [0u8; 4];
        self.i2c
            .write_read(I2C_ADDRESS, &[COMMAND_BIT | REG_C0DATAL], &mut buf)
            .map_err(bus_error)?;
        let ch0 = u16::from_le_bytes([buf[0], buf[1]]);
        let ch1 = u16::from_le_bytes([buf[2], buf[3]]);
        Ok((ch0, ch1))
    }

    /// Calibrated illuminance in lux.
    ///
    /// Returns [`SensorError::Saturated`] when either channel is at its
    /// ceiling for the current integration time.
    pub fn lux(&mut self) -> Result<f32, SensorError> {
        let (ch0, ch1) = self.raw_luminosity()?;
        let max = self.integration_time.max_count();
        if ch0 >= max || ch1 >= max {
            debug!("TSL2591: saturated (ch0={}, ch1={}, max={})", ch0, ch1, max);
            return Err(SensorError::Saturated);
        }
        Ok(compute_lux(ch0, ch1, self.gain, self.integration_time))
    }

    /// Give back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_control(&mut self, gain: Gain, time: IntegrationTime) -> Result<(), SensorError> {
        self.write_register(REG_CONTROL, gain.bits() | time.bits())
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(I2C_ADDRESS, &[COMMAND_BIT | reg], &mut buf)
            .map_err(bus_error)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(I2C_ADDRESS, &[COMMAND_BIT | reg, value])
            .map_err(bus_error)
    }
}

fn bus_error<E: embedded_hal::i2c::Error>(e: E) -> SensorError {
    debug!("TSL2591: I2C error {:?}", e.kind());
    SensorError::Bus
}

/// Counts-to-lux conversion for a non-saturated sample.
pub fn compute_lux(ch0: u16, ch1: u16, gain: Gain, time: IntegrationTime) -> f32 {
    if ch0 == 0 {
        return 0.0;
    }
    let ch0 = f32::from(ch0);
    let ch1 = f32::from(ch1);
    let cpl = (time.millis() as f32 * gain.factor()) / LUX_DF;
    (ch0 - ch1) * (1.0 - ch1 / ch0) / cpl
}
