use rsvp_reader::{EngineError, EngineState, RsvpEngine, DEFAULT_WPM};
use std::time::Duration;

mod common;
use common::COMPLEX_TEXT;

#[test]
fn test_load_quick_brown_fox() {
    let mut engine = RsvpEngine::new();
    assert_eq!(engine.load("The quick brown fox.").unwrap(), 4);
    assert_eq!(engine.total_words(), 4);
    assert_eq!(engine.progress(), 0.0);
    assert_eq!(engine.state(), EngineState::Ready);
}

#[test]
fn test_load_empty_fails() {
    let mut engine = RsvpEngine::new();
    assert_eq!(engine.load(""), Err(EngineError::EmptyInput));
    assert_eq!(engine.state(), EngineState::Idle);
}

#[test]
fn test_set_speed_zero_leaves_state_unchanged() {
    let mut engine = RsvpEngine::new();
    engine.load("One two three.").unwrap();
    engine.start().unwrap();
    engine.tick();

    let before = (engine.state(), engine.position(), engine.wpm());
    assert_eq!(engine.set_speed(0.0), Err(EngineError::InvalidSpeed(0.0)));
    assert_eq!((engine.state(), engine.position(), engine.wpm()), before);
}

#[test]
fn test_pause_then_tick_does_not_advance() {
    let mut engine = RsvpEngine::new();
    engine.load("One two three.").unwrap();
    engine.start().unwrap();
    engine.tick();
    engine.pause().unwrap();

    assert!(engine.tick().is_none());
    assert_eq!(engine.position(), 1);
}

#[test]
fn test_ticks_are_monotonic_until_finished() {
    let mut engine = RsvpEngine::new();
    let total = engine.load(COMPLEX_TEXT).unwrap();
    engine.start().unwrap();

    let mut last = engine.position();
    let mut last_progress = engine.progress();
    while engine.state() == EngineState::Running {
        engine.tick();
        assert!(engine.position() >= last);
        assert!(engine.progress() >= last_progress);
        assert!(engine.position() <= total);
        last = engine.position();
        last_progress = engine.progress();
    }

    assert_eq!(engine.state(), EngineState::Finished);
    assert_eq!(engine.position(), total);
    for _ in 0..3 {
        assert!(engine.tick().is_none());
        assert_eq!(engine.position(), total);
    }
}

#[test]
fn test_frames_follow_sentence_order() {
    let mut engine = RsvpEngine::new();
    engine.load("Hi there. Bye!").unwrap();
    engine.start().unwrap();

    let mut frames = Vec::new();
    while let Some(frame) = engine.tick() {
        frames.push((frame.word.text.clone(), frame.focus_index, frame.progress()));
    }
    assert_eq!(
        frames,
        vec![
            ("Hi".to_string(), 0, 1.0 / 3.0),
            ("there.".to_string(), 1, 2.0 / 3.0),
            ("Bye!".to_string(), 1, 1.0),
        ]
    );
}

#[test]
fn test_restart_twice_equals_once() {
    let mut engine = RsvpEngine::new();
    engine.load("a b c d").unwrap();
    engine.start().unwrap();
    engine.tick();
    engine.tick();
    engine.pause().unwrap();

    engine.restart();
    let once = (engine.state(), engine.position(), engine.wpm());
    engine.restart();
    assert_eq!((engine.state(), engine.position(), engine.wpm()), once);
    assert_eq!(once.0, EngineState::Ready);
}

#[test]
fn test_restart_after_finish_replays() {
    let mut engine = RsvpEngine::new();
    engine.load("a b").unwrap();
    engine.start().unwrap();
    while engine.tick().is_some() {}

    engine.restart();
    assert_eq!(engine.state(), EngineState::Ready);
    engine.start().unwrap();
    assert_eq!(engine.tick().unwrap().word.text, "a");
}

#[test]
fn test_start_from_idle_is_invalid_state() {
    let mut engine = RsvpEngine::new();
    assert_eq!(
        engine.start(),
        Err(EngineError::InvalidState {
            operation: "start",
            state: EngineState::Idle,
        })
    );
    assert_eq!(engine.state(), EngineState::Idle);
}

#[test]
fn test_reload_resets_position() {
    let mut engine = RsvpEngine::new();
    engine.load("a b c").unwrap();
    engine.start().unwrap();
    engine.tick();

    engine.load("x y").unwrap();
    assert_eq!(engine.state(), EngineState::Ready);
    assert_eq!(engine.position(), 0);
    assert_eq!(engine.total_words(), 2);
    assert!(engine.current_word().is_none());
}

#[test]
fn test_speed_changes_interval() {
    let mut engine = RsvpEngine::new();
    assert_eq!(engine.wpm(), DEFAULT_WPM);
    engine.set_speed(120.0).unwrap();
    assert_eq!(engine.tick_interval(), Duration::from_millis(500));
    engine.set_speed(1000.0).unwrap();
    assert_eq!(engine.tick_interval(), Duration::from_millis(60));
}

#[test]
fn test_with_speed_rejects_negative() {
    assert!(matches!(
        RsvpEngine::with_speed(-5.0),
        Err(EngineError::InvalidSpeed(_))
    ));
    assert_eq!(RsvpEngine::with_speed(450.0).unwrap().wpm(), 450.0);
}
