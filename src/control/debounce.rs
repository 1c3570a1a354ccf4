//! Dead-time gate for button-triggered actions.
//!
//! One gate covers every monitored button: after any accepted press, all
//! presses are ignored until the dead-time has elapsed. Presses inside
//! the window are dropped, not queued.

use core::ops::BitOr;
use core::time::Duration;

/// Bitmask of currently pressed buttons, as reported by the input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonMask(pub u8);

impl ButtonMask {
    pub const NONE: Self = Self(0);
    /// Button B: cycles the integration time.
    pub const INTEGRATION_TIME: Self = Self(0b01);
    /// Button A: cycles the gain.
    pub const GAIN: Self = Self(0b10);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for ButtonMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    dead_time: Duration,
    /// Time of the last accepted action; `None` until the first one.
    last_action: Option<Duration>,
}

impl Debouncer {
    /// A gate with no recorded action: the first press is accepted.
    pub fn new(dead_time: Duration) -> Self {
        Self {
            dead_time,
            last_action: None,
        }
    }

    /// Treat `now` as the last accepted action, so the window starts closed.
    pub fn arm(&mut self, now: Duration) {
        self.last_action = Some(now);
    }

    /// Accept the press iff something is pressed and strictly more than
    /// the dead-time has passed since the previous accepted press.
    /// State changes only on acceptance.
    pub fn try_accept(&mut self, now: Duration, pressed: ButtonMask) -> bool {
        if pressed.is_empty() {
            return false;
        }
        let open = match self.last_action {
            None => true,
            Some(last) => now.saturating_sub(last) > self.dead_time,
        };
        if open {
            self.last_action = Some(now);
        }
        open
    }

    pub fn last_action(&self) -> Option<Duration> {
        self.last_action
    }

    pub fn dead_time(&self) -> Duration {
        self.dead_time
    }
}
