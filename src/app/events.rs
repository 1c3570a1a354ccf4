//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port. The firmware logs them;
//! tests record them.

use crate::sensors::{Gain, IntegrationTime};

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Initial settings applied and first frame drawn.
    Started {
        gain: &'static str,
        integration_time: &'static str,
    },

    /// The gain button advanced the gain cycle.
    GainChanged { name: &'static str, code: Gain },

    /// The integration-time button advanced its cycle.
    IntegrationTimeChanged {
        name: &'static str,
        code: IntegrationTime,
    },

    /// A press arrived inside the dead-time window and was dropped.
    PressIgnored { mask: u8 },

    /// The sensor reported a transient fault; the placeholder was shown.
    SensorFault,
}
