//! GPIO / peripheral pin assignments for the light-meter board (ESP32-S3).
//!
//! Single source of truth; `main` builds every peripheral from these
//! numbers rather than hard-coding them.

// ---------------------------------------------------------------------------
// Light sensor (TSL2591) on I²C0
// ---------------------------------------------------------------------------

pub const SENSOR_SDA_GPIO: i32 = 8;
pub const SENSOR_SCL_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// OLED panel (SSD1306, 128×64) on I²C1
// ---------------------------------------------------------------------------

pub const DISPLAY_SDA_GPIO: i32 = 17;
pub const DISPLAY_SCL_GPIO: i32 = 18;

/// Both buses run in fast mode.
pub const I2C_BAUDRATE_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Buttons (74HC165 shift register, active-low inputs)
// ---------------------------------------------------------------------------

/// Parallel load / shift enable.
pub const BUTTON_LATCH_GPIO: i32 = 4;
pub const BUTTON_CLOCK_GPIO: i32 = 5;
/// Serial output (QH) of the register.
pub const BUTTON_DATA_GPIO: i32 = 6;
