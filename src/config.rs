//! System configuration parameters
//!
//! All tunable parameters for the light meter. Values are fixed at build
//! time; nothing here is reloaded while the loop runs.

use core::time::Duration;

use crate::control::cycle::ParamOption;
use crate::error::ConfigError;
use crate::sensors::{Gain, IntegrationTime};

/// Gain options, in button-press order.
pub static GAIN_OPTIONS: [ParamOption<Gain>; 4] = [
    ParamOption::new("LOW", Gain::Low),
    ParamOption::new("MED", Gain::Med),
    ParamOption::new("HIGH", Gain::High),
    ParamOption::new("MAX", Gain::Max),
];

/// Integration-time options, in button-press order.
pub static INTEGRATION_TIME_OPTIONS: [ParamOption<IntegrationTime>; 6] = [
    ParamOption::new("100MS", IntegrationTime::Ms100),
    ParamOption::new("200MS", IntegrationTime::Ms200),
    ParamOption::new("300MS", IntegrationTime::Ms300),
    ParamOption::new("400MS", IntegrationTime::Ms400),
    ParamOption::new("500MS", IntegrationTime::Ms500),
    ParamOption::new("600MS", IntegrationTime::Ms600),
];

/// Control loop configuration
#[derive(Debug, Clone)]
pub struct LoopConfig {
    // --- Timing ---
    /// Sleep between the end of one tick's work and the next tick
    pub tick_period: Duration,
    /// Minimum gap between two accepted button presses (any button)
    pub button_deadtime: Duration,
    /// Close the debounce window at start-up, so presses during the
    /// first dead-time after boot are ignored
    pub arm_debounce_at_start: bool,

    // --- Defaults ---
    /// Gain option selected at start-up
    pub default_gain: &'static str,
    /// Integration-time option selected at start-up
    pub default_integration_time: &'static str,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_period: Duration::from_millis(100), // 10 Hz
            button_deadtime: Duration::from_secs(1),
            arm_debounce_at_start: true,

            // Defaults
            default_gain: "HIGH",
            default_integration_time: "400MS",
        }
    }
}

impl LoopConfig {
    /// Reject values that would stall the loop or leave a cycle without
    /// a starting option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if !GAIN_OPTIONS.iter().any(|o| o.name == self.default_gain) {
            return Err(ConfigError::UnknownDefault {
                parameter: "gain",
                name: self.default_gain,
            });
        }
        if !INTEGRATION_TIME_OPTIONS
            .iter()
            .any(|o| o.name == self.default_integration_time)
        {
            return Err(ConfigError::UnknownDefault {
                parameter: "integration time",
                name: self.default_integration_time,
            });
        }
        Ok(())
    }
}
