//! Integration tests for the sample → classify → alert → report pipeline.
//!
//! These run on the host (x86_64) and drive `MonitorService` through mock
//! adapters, one main-loop iteration per `tick`.

use crate::mock_hw::{MockHardware, OutputCall, RecordingSink};

use firewatch::alert::{MatrixCommand, COLOUR_DANGER, COLOUR_OFF, COLOUR_SAFE};
use firewatch::app::events::AppEvent;
use firewatch::app::service::MonitorService;
use firewatch::config::MonitorConfig;
use firewatch::inputs::{InputAction, InputEventSource, InputId};
use firewatch::report::AlarmCause;
use firewatch::status::{BorderStyle, SharedStatus, SystemState};

/// Status and latch run on every tick.
fn every_tick_config() -> MonitorConfig {
    MonitorConfig {
        report_interval_ms: 100,
        ..MonitorConfig::default()
    }
}

// ── Classification and outputs ────────────────────────────────

#[test]
fn full_scale_reading_is_critical() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.raw_x = 4095;
    svc.tick(&mut hw, &mut sink);

    assert_eq!(svc.state(), SystemState::Critical);
    assert!((status.temperature_c() - 80.0).abs() < 1e-3);
    assert_eq!(hw.last_matrix(), Some(MatrixCommand::Digit(9)));
    assert_eq!(hw.last_rgb(), Some(COLOUR_DANGER));
    assert_eq!(hw.bursts(), 1);
    assert_eq!(svc.countdown(), 8);
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::StateChanged {
                from: SystemState::Normal,
                to: SystemState::Critical
            }
        )),
        1
    );
}

#[test]
fn zero_reading_is_normal() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.raw_x = 0;
    svc.tick(&mut hw, &mut sink);

    assert_eq!(svc.state(), SystemState::Normal);
    assert!((status.temperature_c() - -20.0).abs() < 1e-3);
    assert_eq!(hw.last_matrix(), Some(MatrixCommand::Safe));
    assert_eq!(hw.last_rgb(), Some(COLOUR_SAFE));
    assert_eq!(hw.bursts(), 0);
    assert_eq!(svc.countdown(), 9);
    assert_eq!(sink.alarms(), 0);
}

#[test]
fn attention_band_holds_countdown_and_colour() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.set_temperature(70.0);
    svc.tick(&mut hw, &mut sink);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.countdown(), 7);

    hw.clear();
    hw.set_temperature(50.0);
    svc.tick(&mut hw, &mut sink);

    assert_eq!(svc.state(), SystemState::Attention);
    assert_eq!(hw.last_matrix(), Some(MatrixCommand::Caution));
    assert_eq!(hw.last_rgb(), None, "attention leaves the RGB output alone");
    assert_eq!(hw.bursts(), 0);
    assert_eq!(svc.countdown(), 7);
}

#[test]
fn hazard_escalates_without_changing_tier() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(every_tick_config(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.set_temperature(10.0);
    status.set_hazard(true);
    svc.tick(&mut hw, &mut sink);

    assert_eq!(svc.state(), SystemState::Normal);
    assert_eq!(hw.last_matrix(), Some(MatrixCommand::Digit(9)));
    assert_eq!(hw.last_rgb(), Some(COLOUR_DANGER));
    assert_eq!(hw.bursts(), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::HazardChanged(true))), 1);
    // Below the attention threshold the latch only re-arms.
    assert_eq!(sink.alarms(), 0);
}

#[test]
fn hazard_in_attention_band_is_reported() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(every_tick_config(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.set_temperature(45.0);
    status.set_hazard(true);
    svc.tick(&mut hw, &mut sink);

    let report = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Alarm(r) => Some(*r),
            _ => None,
        })
        .unwrap();
    assert_eq!(report.cause, AlarmCause::HazardOnly);
    assert_eq!(report.final_state, SystemState::Attention);
    assert!(report.hazard);
}

// ── Countdown ─────────────────────────────────────────────────

#[test]
fn countdown_runs_out_and_holds() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.set_temperature(75.0);
    let mut shown = Vec::new();
    for _ in 0..12 {
        hw.clear();
        svc.tick(&mut hw, &mut sink);
        shown.push(hw.last_matrix().unwrap());
    }

    let expected_digits: Vec<_> = (1..=9).rev().map(MatrixCommand::Digit).collect();
    assert_eq!(&shown[..9], expected_digits.as_slice());
    assert!(shown[9..].iter().all(|m| *m == MatrixCommand::Danger));
    assert_eq!(svc.countdown(), 0);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::CountdownExhausted { .. })),
        1
    );
}

#[test]
fn zero_countdown_start_announces_each_episode() {
    let status = SharedStatus::new();
    let config = MonitorConfig {
        countdown_start: 0,
        ..MonitorConfig::default()
    };
    let mut svc = MonitorService::new(config, &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let exhausted = |s: &RecordingSink| s.count(|e| matches!(e, AppEvent::CountdownExhausted { .. }));

    for temp in [75.0, 75.0, 20.0, 75.0, 75.0] {
        hw.set_temperature(temp);
        svc.tick(&mut hw, &mut sink);
    }

    assert_eq!(exhausted(&sink), 2);
    assert_eq!(hw.last_matrix(), Some(MatrixCommand::Danger));
}

#[test]
fn return_to_normal_rearms_countdown() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.set_temperature(75.0);
    for _ in 0..5 {
        svc.tick(&mut hw, &mut sink);
    }
    assert_eq!(svc.countdown(), 4);

    hw.set_temperature(20.0);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.countdown(), 9);
}

// ── Report latch ──────────────────────────────────────────────

#[test]
fn one_alarm_report_per_episode() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(every_tick_config(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for temp in [20.0, 70.0, 70.0, 70.0, 20.0, 70.0] {
        hw.set_temperature(temp);
        svc.tick(&mut hw, &mut sink);
    }

    assert_eq!(sink.alarms(), 2);
    assert!(svc.report_latched());
}

#[test]
fn attention_does_not_close_the_episode() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(every_tick_config(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for temp in [70.0, 50.0, 70.0, 45.0, 70.0] {
        hw.set_temperature(temp);
        svc.tick(&mut hw, &mut sink);
    }
    assert_eq!(sink.alarms(), 1);
}

#[test]
fn status_reports_follow_report_interval() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for _ in 0..25 {
        svc.tick(&mut hw, &mut sink);
    }
    // Ticks 1, 11 and 21.
    assert_eq!(sink.statuses(), 3);
    assert_eq!(svc.tick_count(), 25);
    assert_eq!(hw.frames.len(), 25);
}

#[test]
fn short_episode_between_status_reports_is_reported() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    // Tick 1 carries the status snapshot; the episode spans ticks 2..=6.
    hw.set_temperature(20.0);
    svc.tick(&mut hw, &mut sink);

    hw.raw_x = 4095;
    svc.tick(&mut hw, &mut sink);
    assert_eq!(sink.alarms(), 1);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::Alarm(r)) if r.cause == AlarmCause::TemperatureOnly
    ));
    for _ in 0..4 {
        svc.tick(&mut hw, &mut sink);
    }

    hw.set_temperature(20.0);
    for _ in 0..10 {
        svc.tick(&mut hw, &mut sink);
    }

    assert_eq!(sink.alarms(), 1);
    assert_eq!(sink.statuses(), 2);
    assert!(!svc.report_latched());
}

// ── Operator inputs ───────────────────────────────────────────

#[test]
fn reset_request_is_served_once() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    status.request_reset();
    svc.tick(&mut hw, &mut sink);
    svc.tick(&mut hw, &mut sink);

    assert_eq!(hw.resets(), 1);
    assert_eq!(hw.calls.first(), Some(&OutputCall::Reset));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ResetRequested)), 1);
}

#[test]
fn leds_disabled_forces_rgb_dark() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    assert!(!status.toggle_leds());
    hw.set_temperature(75.0);
    svc.tick(&mut hw, &mut sink);

    assert_eq!(hw.last_rgb(), Some(COLOUR_OFF));
    // Matrix and buzzer keep working.
    assert_eq!(hw.last_matrix(), Some(MatrixCommand::Digit(9)));
    assert_eq!(hw.bursts(), 1);

    assert!(status.toggle_leds());
    svc.tick(&mut hw, &mut sink);
    assert_eq!(hw.last_rgb(), Some(COLOUR_DANGER));
}

#[test]
fn debounced_inputs_reach_the_service() {
    let status = SharedStatus::new();
    let inputs = InputEventSource::new(&status, 200);
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.set_temperature(20.0);

    assert_eq!(
        inputs.on_edge(InputId::Hazard, 1_000),
        Some(InputAction::HazardChanged(true))
    );
    // Contact bounce inside the quiet interval.
    assert_eq!(inputs.on_edge(InputId::Hazard, 1_050), None);
    assert_eq!(
        inputs.on_edge(InputId::Mode, 1_050),
        Some(InputAction::BorderChanged(BorderStyle::Thick))
    );

    svc.tick(&mut hw, &mut sink);
    assert!(status.hazard());
    assert_eq!(hw.last_rgb(), Some(COLOUR_DANGER));
    assert_eq!(hw.frames.last().map(|f| f.border), Some(BorderStyle::Thick));

    // A second accepted press clears the hazard.
    assert_eq!(
        inputs.on_edge(InputId::Hazard, 1_250),
        Some(InputAction::HazardChanged(false))
    );
    svc.tick(&mut hw, &mut sink);
    assert_eq!(hw.last_rgb(), Some(COLOUR_SAFE));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::HazardChanged(_))), 2);
}

#[test]
fn start_blanks_matrix_and_announces_state() {
    let status = SharedStatus::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &status).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    svc.start(&mut hw, &mut sink);
    assert_eq!(hw.calls, [OutputCall::Matrix(MatrixCommand::Clear)]);
    assert!(matches!(
        sink.events.as_slice(),
        [AppEvent::Started(SystemState::Normal)]
    ));
}
