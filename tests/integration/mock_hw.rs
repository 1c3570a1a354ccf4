//! Mock hardware adapters for integration tests.
//!
//! Every mock records its calls so tests can assert on the full history
//! without real I²C or GPIO. Mocks built with `on(timeline)` also append
//! to a shared [`Timeline`], which pins down cross-port ordering within a
//! tick.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use luxpanel::app::display::Field;
use luxpanel::app::events::AppEvent;
use luxpanel::app::ports::{Clock, DisplaySink, EventSink, InputPort, SensorPort};
use luxpanel::control::debounce::ButtonMask;
use luxpanel::error::{DisplayError, InputError, SensorError};
use luxpanel::sensors::{Gain, IntegrationTime};

// ── Shared timeline ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Poll,
    SetGain,
    SetIntegrationTime,
    Read,
    SetField,
    Refresh,
}

pub type Timeline = Rc<RefCell<Vec<Step>>>;

pub fn timeline() -> Timeline {
    Rc::new(RefCell::new(Vec::new()))
}

// ── MockSensor ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SensorCall {
    Read,
    SetGain(Gain),
    SetIntegrationTime(IntegrationTime),
}

/// Scripted light sensor. Returns queued readings in order, then
/// `fallback` forever.
pub struct MockSensor {
    pub calls: Vec<SensorCall>,
    readings: VecDeque<Result<f32, SensorError>>,
    fallback: f32,
    timeline: Timeline,
}

#[allow(dead_code)]
impl MockSensor {
    pub fn new(fallback: f32) -> Self {
        Self {
            calls: Vec::new(),
            readings: VecDeque::new(),
            fallback,
            timeline: timeline(),
        }
    }

    pub fn with_readings(readings: impl IntoIterator<Item = Result<f32, SensorError>>) -> Self {
        let mut sensor = Self::new(0.0);
        sensor.readings.extend(readings);
        sensor
    }

    pub fn on(mut self, timeline: &Timeline) -> Self {
        self.timeline = Rc::clone(timeline);
        self
    }

    pub fn settings_calls(&self) -> Vec<SensorCall> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, SensorCall::Read))
            .cloned()
            .collect()
    }
}

impl SensorPort for MockSensor {
    fn read(&mut self) -> Result<f32, SensorError> {
        self.calls.push(SensorCall::Read);
        self.timeline.borrow_mut().push(Step::Read);
        self.readings.pop_front().unwrap_or(Ok(self.fallback))
    }

    fn set_gain(&mut self, gain: Gain) -> Result<(), SensorError> {
        self.calls.push(SensorCall::SetGain(gain));
        self.timeline.borrow_mut().push(Step::SetGain);
        Ok(())
    }

    fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), SensorError> {
        self.calls.push(SensorCall::SetIntegrationTime(time));
        self.timeline.borrow_mut().push(Step::SetIntegrationTime);
        Ok(())
    }
}

// ── MockInput ─────────────────────────────────────────────────

/// Scripted buttons. Returns queued masks in order, then "nothing held".
pub struct MockInput {
    pub polls: usize,
    masks: VecDeque<Result<ButtonMask, InputError>>,
    timeline: Timeline,
}

#[allow(dead_code)]
impl MockInput {
    pub fn new() -> Self {
        Self {
            polls: 0,
            masks: VecDeque::new(),
            timeline: timeline(),
        }
    }

    pub fn on(mut self, timeline: &Timeline) -> Self {
        self.timeline = Rc::clone(timeline);
        self
    }

    /// Queue the mask returned by the next unscripted poll.
    pub fn press(&mut self, mask: ButtonMask) {
        self.masks.push_back(Ok(mask));
    }

    pub fn fail_next(&mut self, error: InputError) {
        self.masks.push_back(Err(error));
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockInput {
    fn poll(&mut self) -> Result<ButtonMask, InputError> {
        self.polls += 1;
        self.timeline.borrow_mut().push(Step::Poll);
        self.masks.pop_front().unwrap_or(Ok(ButtonMask::NONE))
    }
}

// ── MockDisplay ───────────────────────────────────────────────

/// Records the latest text per field plus every write.
pub struct MockDisplay {
    pub fields: HashMap<Field, String>,
    pub writes: Vec<(Field, String)>,
    pub refreshes: usize,
    timeline: Timeline,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            writes: Vec::new(),
            refreshes: 0,
            timeline: timeline(),
        }
    }

    pub fn on(mut self, timeline: &Timeline) -> Self {
        self.timeline = Rc::clone(timeline);
        self
    }

    pub fn text(&self, field: Field) -> &str {
        self.fields.get(&field).map_or("", String::as_str)
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for MockDisplay {
    fn set_field(&mut self, field: Field, text: &str) -> Result<(), DisplayError> {
        self.fields.insert(field, text.to_string());
        self.writes.push((field, text.to_string()));
        self.timeline.borrow_mut().push(Step::SetField);
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        self.refreshes += 1;
        self.timeline.borrow_mut().push(Step::Refresh);
        Ok(())
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock that only moves when the loop sleeps.
pub struct ManualClock {
    pub now: Duration,
    pub sleeps: Vec<Duration>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            sleeps: Vec::new(),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, period: Duration) {
        self.sleeps.push(period);
        self.now += period;
    }
}

// ── Event sink ────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
