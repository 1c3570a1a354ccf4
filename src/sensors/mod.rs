//! Light sensor subsystem: the TSL2591 driver and the setting codes the
//! control loop cycles through.
//!
//! [`Gain`] and [`IntegrationTime`] are the device-specific codes carried
//! by each option in the setting tables (see [`crate::config`]). Their
//! discriminants are the TSL2591 CONTROL register bits.

pub mod tsl2591;

/// Analog gain of the light-to-digital converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Gain {
    /// 1×
    Low = 0x00,
    /// 25×
    Med = 0x10,
    /// 428×
    High = 0x20,
    /// 9876×
    Max = 0x30,
}

impl Gain {
    /// CONTROL register bits (AGAIN, bits 5:4).
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Nominal amplification factor used by the lux equation.
    pub const fn factor(self) -> f32 {
        match self {
            Self::Low => 1.0,
            Self::Med => 25.0,
            Self::High => 428.0,
            Self::Max => 9876.0,
        }
    }
}

/// ADC integration (exposure) time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IntegrationTime {
    Ms100 = 0x00,
    Ms200 = 0x01,
    Ms300 = 0x02,
    Ms400 = 0x03,
    Ms500 = 0x04,
    Ms600 = 0x05,
}

impl IntegrationTime {
    /// CONTROL register bits (ATIME, bits 2:0).
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn millis(self) -> u32 {
        (self as u32 + 1) * 100
    }

    /// Channel count at which the ADC is saturated. The 100 ms window
    /// tops out early because the counter cannot reach full scale.
    pub const fn max_count(self) -> u16 {
        match self {
            Self::Ms100 => 36_863,
            _ => 65_535,
        }
    }
}
