//! Circular selection over a fixed table of named sensor settings.
//!
//! Each configurable parameter (gain, integration time) is one
//! [`SettingCycle`]: a button press moves to the next option, wrapping
//! from the last back to the first.

use crate::control::debounce::ButtonMask;
use crate::error::ConfigError;

/// One selectable value: the label shown on the panel and the code the
/// sensor driver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamOption<C> {
    pub name: &'static str,
    pub code: C,
}

impl<C> ParamOption<C> {
    pub const fn new(name: &'static str, code: C) -> Self {
        Self { name, code }
    }
}

/// Circular cursor over a non-empty option table.
///
/// Invariant: `index < options.len()` at all times.
#[derive(Debug, Clone)]
pub struct SettingCycle<C: 'static> {
    parameter: &'static str,
    options: &'static [ParamOption<C>],
    index: usize,
    button: ButtonMask,
}

impl<C: Copy> SettingCycle<C> {
    /// Build a cycle positioned on the option named `default`.
    ///
    /// `parameter` only labels errors and log lines.
    pub fn new(
        parameter: &'static str,
        options: &'static [ParamOption<C>],
        default: &'static str,
        button: ButtonMask,
    ) -> Result<Self, ConfigError> {
        if options.is_empty() {
            return Err(ConfigError::EmptyOptions(parameter));
        }
        let index = options
            .iter()
            .position(|o| o.name == default)
            .ok_or(ConfigError::UnknownDefault {
                parameter,
                name: default,
            })?;
        Ok(Self {
            parameter,
            options,
            index,
            button,
        })
    }

    pub fn current(&self) -> ParamOption<C> {
        self.options[self.index]
    }

    /// Step to the next option (wrapping) and return it.
    pub fn advance(&mut self) -> ParamOption<C> {
        self.index = (self.index + 1) % self.options.len();
        self.current()
    }

    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// The button bit that advances this cycle.
    pub fn button(&self) -> ButtonMask {
        self.button
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false`; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        false
    }
}
