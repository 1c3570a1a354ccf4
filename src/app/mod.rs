//! Application core: pure domain logic, zero I/O.
//!
//! The light meter's control loop: debounced button handling, cyclic
//! setting selection, sensor sampling and fixed-layout rendering. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod display;
pub mod events;
pub mod ports;
pub mod service;
