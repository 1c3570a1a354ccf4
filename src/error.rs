//! Unified error types for the luxpanel firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the
//! control loop has exactly one fatal path. All variants are `Copy`.
//!
//! Only one failure is expected during normal operation: a saturated
//! light sensor ([`SensorError::Saturated`]). The control loop absorbs it
//! into the display placeholder. Everything else is fatal.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The light sensor failed in a way the loop cannot recover from.
    Sensor(SensorError),
    /// The button reader failed.
    Input(InputError),
    /// The display could not be drawn or flushed.
    Display(DisplayError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// A light channel hit its saturation count. Transient: the next
    /// integration period may be fine.
    Saturated,
    /// I²C transaction failed.
    Bus,
    /// The device at the sensor address did not identify as expected.
    BadDeviceId { found: u8 },
}

impl SensorError {
    /// Whether the control loop may absorb this error and keep running.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Saturated)
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saturated => write!(f, "light channel saturated"),
            Self::Bus => write!(f, "I2C bus error"),
            Self::BadDeviceId { found } => write!(f, "unexpected device id 0x{found:02x}"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Driving the latch or clock line failed.
    PinWrite,
    /// Sampling the data line failed.
    PinRead,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinWrite => write!(f, "GPIO write failed"),
            Self::PinRead => write!(f, "GPIO read failed"),
        }
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Drawing into the frame buffer failed.
    Draw,
    /// Pushing the frame buffer to the panel failed.
    Flush,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw => write!(f, "draw failed"),
            Self::Flush => write!(f, "flush failed"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Construction-time misconfiguration. Always fatal at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting cycle was built from an empty option table.
    EmptyOptions(&'static str),
    /// The configured default name is not in the option table.
    UnknownDefault {
        parameter: &'static str,
        name: &'static str,
    },
    /// The tick period must be non-zero.
    ZeroTickPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOptions(parameter) => write!(f, "{parameter}: no options"),
            Self::UnknownDefault { parameter, name } => {
                write!(f, "{parameter}: default '{name}' is not an option")
            }
            Self::ZeroTickPeriod => write!(f, "tick period must be non-zero"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
