//! Integration tests for the focus-session engine.
//!
//! Walks complete sessions through the public API on a fake clock:
//! phase boundaries, pause/resume across boundaries, reconfiguration,
//! task attribution, and the event stream the CLI serializes.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use mindstudy_core::{
    FakeClock, FocusEngine, InMemoryTaskList, Mode, PlannerTask, SessionConfig, SessionEvent,
    SessionStatus, NO_TASK_LABEL,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
}

fn engine_25_5() -> (FocusEngine, FakeClock) {
    let clock = FakeClock::at(t0());
    let engine = FocusEngine::with_clock(SessionConfig::new(25, 5), Box::new(clock.clone()));
    (engine, clock)
}

#[test]
fn test_full_cycle_walkthrough() {
    let (mut engine, clock) = engine_25_5();

    // Fresh engine: idle work phase, cycle 1, placeholder task.
    assert_eq!(engine.status(), SessionStatus::Idle);
    assert_eq!(engine.mode(), Mode::Work);
    assert_eq!(engine.remaining_seconds(), 1500);
    assert_eq!(engine.cycle_count(), 1);
    assert_eq!(engine.active_task_label(), NO_TASK_LABEL);

    engine.start();

    // Work phase runs out to the second.
    clock.advance(Duration::seconds(1500));
    let boundary = engine.tick().expect("work phase should complete");
    match boundary {
        SessionEvent::PhaseCompleted {
            completed,
            next,
            cycle,
            at,
        } => {
            assert_eq!(completed, Mode::Work);
            assert_eq!(next, Mode::Break);
            assert_eq!(cycle, 1);
            assert_eq!(at, t0() + Duration::seconds(1500));
        }
        other => panic!("expected PhaseCompleted, got {other:?}"),
    }
    assert_eq!(engine.mode(), Mode::Break);
    assert_eq!(engine.status(), SessionStatus::Running);
    assert_eq!(engine.remaining_seconds(), 300);
    assert_eq!(engine.cycle_count(), 1);

    // Break runs out; the next work phase opens cycle 2.
    clock.advance(Duration::seconds(300));
    let boundary = engine.tick().expect("break phase should complete");
    match boundary {
        SessionEvent::PhaseCompleted {
            completed, cycle, ..
        } => {
            assert_eq!(completed, Mode::Break);
            assert_eq!(cycle, 2);
        }
        other => panic!("expected PhaseCompleted, got {other:?}"),
    }
    assert_eq!(engine.mode(), Mode::Work);
    assert_eq!(engine.remaining_seconds(), 1500);
    assert_eq!(engine.cycle_count(), 2);
}

#[test]
fn test_pause_near_boundary_defers_expiry() {
    let (mut engine, clock) = engine_25_5();
    engine.start();

    // Pause with three seconds on the clock.
    clock.advance(Duration::seconds(1497));
    engine.pause();
    assert_eq!(engine.remaining_seconds(), 3);

    // An hour away from the desk changes nothing.
    clock.advance(Duration::hours(1));
    assert!(engine.tick().is_none());
    assert_eq!(engine.remaining_seconds(), 3);
    assert_eq!(engine.mode(), Mode::Work);

    // The three seconds play out only after resuming.
    engine.resume();
    clock.advance(Duration::seconds(2));
    assert!(engine.tick().is_none());
    clock.advance(Duration::seconds(1));
    assert!(matches!(
        engine.tick(),
        Some(SessionEvent::PhaseCompleted { .. })
    ));
    assert_eq!(engine.mode(), Mode::Break);
}

#[test]
fn test_reset_from_every_state() {
    // From idle.
    let (mut engine, _clock) = engine_25_5();
    engine.reset();
    assert_eq!(engine.status(), SessionStatus::Idle);
    assert_eq!(engine.mode(), Mode::Work);
    assert_eq!(engine.cycle_count(), 1);

    // From a running work phase.
    let (mut engine, clock) = engine_25_5();
    engine.start();
    clock.advance(Duration::seconds(700));
    engine.reset();
    assert_eq!(engine.status(), SessionStatus::Idle);
    assert_eq!(engine.remaining_seconds(), 1500);

    // From paused.
    let (mut engine, clock) = engine_25_5();
    engine.start();
    clock.advance(Duration::seconds(700));
    engine.pause();
    engine.reset();
    assert_eq!(engine.status(), SessionStatus::Idle);
    assert_eq!(engine.remaining_seconds(), 1500);

    // From a running break in cycle 3.
    let (mut engine, clock) = engine_25_5();
    engine.start();
    for _ in 0..2 {
        clock.advance(Duration::seconds(1500));
        engine.tick();
        clock.advance(Duration::seconds(300));
        engine.tick();
    }
    clock.advance(Duration::seconds(1500));
    engine.tick();
    assert_eq!(engine.cycle_count(), 3);
    assert_eq!(engine.mode(), Mode::Break);

    engine.reset();
    assert_eq!(engine.status(), SessionStatus::Idle);
    assert_eq!(engine.mode(), Mode::Work);
    assert_eq!(engine.cycle_count(), 1);
    assert_eq!(engine.remaining_seconds(), 1500);
}

#[test]
fn test_reconfigure_between_stints() {
    let (mut engine, clock) = engine_25_5();

    // First stint on the defaults.
    engine.start();
    clock.advance(Duration::seconds(1500));
    engine.tick();
    engine.reset();

    // Tune lengths while idle; the idle display updates immediately.
    engine.set_work_minutes(50);
    engine.set_break_minutes(10);
    assert_eq!(engine.remaining_seconds(), 3000);

    // Second stint runs on the new lengths.
    engine.start();
    clock.advance(Duration::seconds(3000));
    assert!(matches!(
        engine.tick(),
        Some(SessionEvent::PhaseCompleted { .. })
    ));
    assert_eq!(engine.remaining_seconds(), 600);
}

#[test]
fn test_sparse_ticks_reanchor_at_observation() {
    let (mut engine, clock) = engine_25_5();
    engine.start();

    // The host wakes up a second late.
    clock.advance(Duration::seconds(1501));
    assert!(matches!(
        engine.tick(),
        Some(SessionEvent::PhaseCompleted { .. })
    ));
    // The break is anchored at the observing tick and still gets its
    // full five minutes.
    assert_eq!(engine.remaining_seconds(), 300);

    clock.advance(Duration::seconds(299));
    assert!(engine.tick().is_none());
    clock.advance(Duration::seconds(1));
    assert!(matches!(
        engine.tick(),
        Some(SessionEvent::PhaseCompleted { .. })
    ));
    assert_eq!(engine.cycle_count(), 2);
}

#[test]
fn test_duplicate_ticks_flip_once() {
    let (mut engine, clock) = engine_25_5();
    engine.start();
    clock.advance(Duration::seconds(1500));

    let mut completions = 0;
    for _ in 0..5 {
        if matches!(engine.tick(), Some(SessionEvent::PhaseCompleted { .. })) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(engine.mode(), Mode::Break);
}

#[test]
fn test_task_attribution_flow() {
    let (mut engine, clock) = engine_25_5();
    engine.set_task_list(Box::new(InMemoryTaskList::new(vec![
        PlannerTask {
            id: 1,
            title: "Organic chemistry review".to_string(),
            description: None,
        },
        PlannerTask {
            id: 2,
            title: "Statistics homework".to_string(),
            description: Some("Chapters 5-6".to_string()),
        },
    ])));

    // Pick a planner task by id.
    engine.select_task(Some(2), "");
    assert_eq!(engine.active_task_label(), "Statistics homework");
    assert_eq!(engine.active_task_id(), Some(2));

    // An unknown id later keeps the existing attribution.
    assert!(engine.select_task(Some(77), "").is_none());
    assert_eq!(engine.active_task_label(), "Statistics homework");

    // A custom label overrides mid-session and drops the id.
    engine.start();
    clock.advance(Duration::seconds(60));
    engine.select_task(None, "Office hours prep");
    assert_eq!(engine.active_task_label(), "Office hours prep");
    assert_eq!(engine.active_task_id(), None);

    // Attribution survives a reset.
    engine.reset();
    assert_eq!(engine.active_task_label(), "Office hours prep");
}

#[test]
fn test_event_stream_serializes_with_type_tags() {
    let (mut engine, clock) = engine_25_5();
    let events: Arc<Mutex<Vec<SessionEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    engine.on_event(move |event| sink.lock().unwrap().push(event.clone()));

    engine.select_task(None, "Essay draft");
    engine.start();
    clock.advance(Duration::seconds(1500));
    engine.tick();
    engine.reset();

    let events = events.lock().unwrap();
    let types: Vec<String> = events
        .iter()
        .map(|event| {
            let value = serde_json::to_value(event).unwrap();
            value["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        types,
        vec![
            "TaskSelected",
            "SessionStarted",
            "PhaseCompleted",
            "SessionReset"
        ]
    );

    // Timestamps come from the injected clock, in order.
    for pair in events.windows(2) {
        assert!(pair[0].at() <= pair[1].at());
    }
}
