//! Integration tests for the ControlLoop → ports pipeline.
//!
//! These run on the host (x86_64) and drive the loop tick by tick with a
//! scripted clock, so debounce windows are exact.

use std::time::Duration;

use luxpanel::app::display::Field;
use luxpanel::app::events::AppEvent;
use luxpanel::app::service::ControlLoop;
use luxpanel::config::LoopConfig;
use luxpanel::control::debounce::ButtonMask;
use luxpanel::error::{ConfigError, Error, InputError, SensorError};
use luxpanel::sensors::{Gain, IntegrationTime};

use super::mock_hw::{
    LogSink, ManualClock, MockDisplay, MockInput, MockSensor, SensorCall, Step, timeline,
};

const GAIN_HIGH: &str = "GAIN (A) = HIGH";
const IWIN_400: &str = "IWIN (B) = 400MS";

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Loop with the gate unarmed, as if the last press was long ago.
fn unarmed_config() -> LoopConfig {
    LoopConfig {
        arm_debounce_at_start: false,
        ..LoopConfig::default()
    }
}

fn make_loop(config: &LoopConfig) -> (ControlLoop, MockSensor, MockInput, MockDisplay, LogSink) {
    let mut app = ControlLoop::new(config).unwrap();
    let mut sensor = MockSensor::new(1.0);
    let input = MockInput::new();
    let mut display = MockDisplay::new();
    let mut sink = LogSink::new();
    app.start(Duration::ZERO, &mut sensor, &mut display, &mut sink)
        .unwrap();
    (app, sensor, input, display, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_applies_defaults_and_draws_first_frame() {
    let (app, sensor, _input, display, sink) = make_loop(&unarmed_config());

    assert_eq!(
        sensor.calls,
        vec![
            SensorCall::SetIntegrationTime(IntegrationTime::Ms400),
            SensorCall::SetGain(Gain::High),
        ]
    );
    assert_eq!(display.text(Field::Header), "LUX");
    assert_eq!(display.text(Field::Value), "__.___");
    assert_eq!(display.text(Field::Gain), GAIN_HIGH);
    assert_eq!(display.text(Field::IntegrationTime), IWIN_400);
    assert_eq!(display.refreshes, 1);
    assert_eq!(
        sink.events,
        vec![AppEvent::Started {
            gain: "HIGH",
            integration_time: "400MS",
        }]
    );
    assert_eq!(app.tick_count(), 0);
}

#[test]
fn unknown_default_fails_before_touching_hardware() {
    let config = LoopConfig {
        default_gain: "ULTRA",
        ..LoopConfig::default()
    };
    match ControlLoop::new(&config) {
        Err(Error::Config(ConfigError::UnknownDefault { parameter, name })) => {
            assert_eq!(parameter, "gain");
            assert_eq!(name, "ULTRA");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("construction must fail"),
    }
}

// ── Settings fields are stable without input ──────────────────

#[test]
fn idle_ticks_never_change_settings_fields() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());

    for n in 0..50 {
        let report = app
            .tick(ms(n * 100), &mut sensor, &mut input, &mut display, &mut sink)
            .unwrap();
        assert!(!report.accepted);
        assert_eq!(display.text(Field::Gain), GAIN_HIGH);
        assert_eq!(display.text(Field::IntegrationTime), IWIN_400);
    }
    // Only the two startup writes ever reached the sensor settings.
    assert_eq!(sensor.settings_calls().len(), 2);
    assert_eq!(app.tick_count(), 50);
}

// ── Button handling ───────────────────────────────────────────

#[test]
fn gain_press_advances_high_to_max() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());
    sensor.calls.clear();

    input.press(ButtonMask(2));
    let report = app
        .tick(Duration::ZERO, &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();

    assert!(report.accepted);
    assert!(report.gain_changed);
    assert!(!report.integration_time_changed);
    assert_eq!(app.gain(), "MAX");
    assert_eq!(app.integration_time(), "400MS");
    assert_eq!(sensor.settings_calls(), vec![SensorCall::SetGain(Gain::Max)]);
    assert_eq!(display.text(Field::Gain), "GAIN (A) = MAX");
    assert_eq!(display.text(Field::IntegrationTime), IWIN_400);
    assert!(sink.events.contains(&AppEvent::GainChanged {
        name: "MAX",
        code: Gain::Max,
    }));
}

#[test]
fn both_bits_advance_both_cycles_in_one_tick() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());
    sensor.calls.clear();

    input.press(ButtonMask::GAIN | ButtonMask::INTEGRATION_TIME);
    let report = app
        .tick(Duration::ZERO, &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();

    assert!(report.gain_changed && report.integration_time_changed);
    assert_eq!(app.gain(), "MAX");
    assert_eq!(app.integration_time(), "500MS");
    assert_eq!(
        sensor.settings_calls(),
        vec![
            SensorCall::SetGain(Gain::Max),
            SensorCall::SetIntegrationTime(IntegrationTime::Ms500),
        ]
    );
    assert_eq!(display.text(Field::IntegrationTime), "IWIN (B) = 500MS");
}

#[test]
fn press_inside_deadtime_is_dropped_not_queued() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());

    input.press(ButtonMask::GAIN);
    app.tick(ms(0), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();
    assert_eq!(app.gain(), "MAX");

    input.press(ButtonMask::GAIN);
    let report = app
        .tick(ms(500), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();
    assert!(!report.accepted);
    assert_eq!(app.gain(), "MAX");
    assert_eq!(sink.count(|e| matches!(e, AppEvent::PressIgnored { mask: 2 })), 1);

    // Long after the window closes, with nothing held, the dropped press
    // does not resurface.
    for t in [1_500, 3_000, 10_000] {
        app.tick(ms(t), &mut sensor, &mut input, &mut display, &mut sink)
            .unwrap();
    }
    assert_eq!(app.gain(), "MAX");
}

#[test]
fn presses_beyond_deadtime_both_apply() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());

    input.press(ButtonMask::GAIN);
    app.tick(ms(0), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();
    input.press(ButtonMask::GAIN);
    app.tick(ms(1_500), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();

    // HIGH → MAX → LOW (wraps).
    assert_eq!(app.gain(), "LOW");
    assert_eq!(display.text(Field::Gain), "GAIN (A) = LOW");
}

#[test]
fn deadtime_is_shared_between_buttons() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());

    input.press(ButtonMask::GAIN);
    app.tick(ms(0), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();
    input.press(ButtonMask::INTEGRATION_TIME);
    let report = app
        .tick(ms(300), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();

    assert!(!report.accepted);
    assert_eq!(app.integration_time(), "400MS");
}

#[test]
fn held_button_repeats_once_per_window() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());

    let mut accepted = Vec::new();
    for n in 0..=25u64 {
        input.press(ButtonMask::INTEGRATION_TIME);
        let report = app
            .tick(ms(n * 100), &mut sensor, &mut input, &mut display, &mut sink)
            .unwrap();
        if report.accepted {
            accepted.push(n * 100);
        }
    }

    // Elapsed time must strictly exceed the dead-time.
    assert_eq!(accepted, vec![0, 1_100, 2_200]);
    // 400MS → 500MS → 600MS → 100MS
    assert_eq!(app.integration_time(), "100MS");
}

#[test]
fn armed_gate_ignores_press_right_after_start() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&LoopConfig::default());

    input.press(ButtonMask::GAIN);
    let early = app
        .tick(ms(500), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();
    assert!(!early.accepted);

    input.press(ButtonMask::GAIN);
    let late = app
        .tick(ms(1_200), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();
    assert!(late.accepted);
    assert_eq!(app.gain(), "MAX");
}

// ── Sensor readings ───────────────────────────────────────────

#[test]
fn reading_renders_with_three_decimals() {
    let (mut app, _, mut input, mut display, mut sink) = make_loop(&unarmed_config());
    let mut sensor = MockSensor::with_readings([Ok(12.3456)]);

    let report = app
        .tick(ms(0), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();

    assert_eq!(report.reading, Some(12.3456));
    assert_eq!(display.text(Field::Value), "12.346");
}

#[test]
fn fault_renders_placeholder_and_next_tick_recovers() {
    let (mut app, _, mut input, mut display, mut sink) = make_loop(&unarmed_config());
    let mut sensor =
        MockSensor::with_readings([Ok(5.0), Err(SensorError::Saturated), Ok(7.25)]);

    let mut values = Vec::new();
    for n in 0..3 {
        app.tick(ms(n * 100), &mut sensor, &mut input, &mut display, &mut sink)
            .unwrap();
        values.push(display.text(Field::Value).to_string());
    }

    assert_eq!(values, ["5.000", "xx.xxx", "7.250"]);
    assert_eq!(sensor.calls.len(), 3, "one read attempt per tick, no retry");
    assert_eq!(sink.count(|e| *e == AppEvent::SensorFault), 1);
}

#[test]
fn bus_error_stops_the_loop() {
    let (mut app, _, mut input, mut display, mut sink) = make_loop(&unarmed_config());
    let mut sensor = MockSensor::with_readings([Err(SensorError::Bus)]);

    let result = app.tick(ms(0), &mut sensor, &mut input, &mut display, &mut sink);

    assert_eq!(result, Err(Error::Sensor(SensorError::Bus)));
}

#[test]
fn input_error_stops_the_loop_before_reading() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());
    sensor.calls.clear();
    input.fail_next(InputError::PinRead);

    let result = app.tick(ms(0), &mut sensor, &mut input, &mut display, &mut sink);

    assert_eq!(result, Err(Error::Input(InputError::PinRead)));
    assert!(sensor.calls.is_empty());
}

// ── Display push ──────────────────────────────────────────────

#[test]
fn every_field_is_pushed_every_tick() {
    let (mut app, mut sensor, mut input, mut display, mut sink) = make_loop(&unarmed_config());

    for n in 0..3 {
        app.tick(ms(n * 100), &mut sensor, &mut input, &mut display, &mut sink)
            .unwrap();
    }

    // Startup frame plus three ticks, four fields each.
    assert_eq!(display.writes.len(), 4 * 4);
    assert_eq!(display.refreshes, 4);
    let last_frame: Vec<Field> = display.writes[12..].iter().map(|(f, _)| *f).collect();
    assert_eq!(last_frame, Field::ALL);
}

#[test]
fn tick_order_is_input_then_settings_then_read_then_display() {
    let steps = timeline();
    let mut app = ControlLoop::new(&unarmed_config()).unwrap();
    let mut sensor = MockSensor::new(1.0).on(&steps);
    let mut input = MockInput::new().on(&steps);
    let mut display = MockDisplay::new().on(&steps);
    let mut sink = LogSink::new();

    app.start(Duration::ZERO, &mut sensor, &mut display, &mut sink)
        .unwrap();
    steps.borrow_mut().clear();

    input.press(ButtonMask::GAIN | ButtonMask::INTEGRATION_TIME);
    app.tick(ms(0), &mut sensor, &mut input, &mut display, &mut sink)
        .unwrap();

    assert_eq!(
        *steps.borrow(),
        vec![
            Step::Poll,
            Step::SetGain,
            Step::SetIntegrationTime,
            Step::Read,
            Step::SetField,
            Step::SetField,
            Step::SetField,
            Step::SetField,
            Step::Refresh,
        ]
    );
}

// ── run() ─────────────────────────────────────────────────────

#[test]
fn run_sleeps_one_period_after_each_tick_until_fatal() {
    let mut app = ControlLoop::new(&LoopConfig::default()).unwrap();
    let mut clock = ManualClock::new();
    let mut sensor = MockSensor::with_readings([Ok(1.0), Ok(2.0), Err(SensorError::Bus)]);
    let mut input = MockInput::new();
    let mut display = MockDisplay::new();
    let mut sink = LogSink::new();

    let Err(e) = app.run(&mut clock, &mut sensor, &mut input, &mut display, &mut sink);

    assert_eq!(e, Error::Sensor(SensorError::Bus));
    assert_eq!(clock.sleeps, vec![ms(100), ms(100)]);
    assert_eq!(app.tick_count(), 3);
    assert_eq!(display.text(Field::Value), "2.000");
}
