//! Display state: the four text fields the panel shows and how each one
//! is rendered from loop state.

use core::fmt::Write;

/// Capacity of one field's text, in bytes.
pub const FIELD_CAPACITY: usize = 24;

pub type FieldText = heapless::String<FIELD_CAPACITY>;

/// Static header text.
pub const HEADER_TEXT: &str = "LUX";
/// Value text shown before the first reading.
pub const VALUE_PENDING: &str = "__.___";
/// Value text shown when the sensor faults.
pub const VALUE_FAULT: &str = "xx.xxx";

/// Named slots on the fixed panel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Header,
    Value,
    Gain,
    IntegrationTime,
}

impl Field {
    /// Every field, in the order they are pushed to the sink.
    pub const ALL: [Field; 4] = [
        Field::Header,
        Field::Value,
        Field::Gain,
        Field::IntegrationTime,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Header => 0,
            Self::Value => 1,
            Self::Gain => 2,
            Self::IntegrationTime => 3,
        }
    }
}

/// Current text of every field. Rebuilt in place each tick; no history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    fields: [FieldText; 4],
}

impl DisplayState {
    pub fn new(gain_name: &str, integration_time_name: &str) -> Self {
        let mut state = Self {
            fields: Default::default(),
        };
        state.fields[Field::Header.index()] = fixed(HEADER_TEXT);
        state.fields[Field::Value.index()] = fixed(VALUE_PENDING);
        state.set_gain(gain_name);
        state.set_integration_time(integration_time_name);
        state
    }

    pub fn text(&self, field: Field) -> &str {
        self.fields[field.index()].as_str()
    }

    pub fn set_reading(&mut self, reading: Option<f32>) {
        self.fields[Field::Value.index()] = format_reading(reading);
    }

    pub fn set_gain(&mut self, name: &str) {
        self.fields[Field::Gain.index()] = label("GAIN (A)", name);
    }

    pub fn set_integration_time(&mut self, name: &str) {
        self.fields[Field::IntegrationTime.index()] = label("IWIN (B)", name);
    }

    /// `(field, text)` pairs in push order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(|f| (f, self.text(f)))
    }
}

/// Value field text: three decimals, or the fault placeholder.
///
/// A reading too long for the field (e.g. a corrupt huge value) is shown
/// as a fault rather than truncated.
pub fn format_reading(reading: Option<f32>) -> FieldText {
    let Some(value) = reading else {
        return fixed(VALUE_FAULT);
    };
    let mut text = FieldText::new();
    if write!(text, "{value:.3}").is_err() {
        return fixed(VALUE_FAULT);
    }
    text
}

fn label(prefix: &str, name: &str) -> FieldText {
    let mut text = FieldText::new();
    // Option names are short table constants.
    let _ = write!(text, "{prefix} = {name}");
    text
}

fn fixed(s: &str) -> FieldText {
    let mut text = FieldText::new();
    let _ = text.push_str(s);
    text
}
