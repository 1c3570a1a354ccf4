//! Luxpanel firmware library.
//!
//! A handheld light meter: a TSL2591 sensor is sampled on a fixed tick,
//! the reading is shown on a 128×64 panel, and two buttons cycle the
//! sensor's gain and integration time.
//!
//! Exposes the pure-logic modules for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]` or
//! the `espidf` feature within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;

pub use error::{Error, Result};
