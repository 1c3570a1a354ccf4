//! Peripheral drivers below the port adapters.

#[cfg(feature = "espidf")]
pub mod oled;
pub mod panel;
pub mod shift_buttons;
