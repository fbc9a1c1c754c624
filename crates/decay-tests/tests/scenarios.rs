//! Scenario tests for the decay engine.
//!
//! Each test drives an engine the way a game screen does: a hand-advanced
//! clock stands in for the frame timer, `tick`/`update` run once per frame,
//! and `modify` applies rewards and penalties from gameplay events.

use std::io::Write;

use decay_core::clock::ManualClock;
use decay_core::traits::ColorScheme;
use decay_core::types::{DecayTier, Rgb};
use decay_engine::bar::DecayBar;
use decay_engine::color::{DecayScheme, DECAYED_PALETTE, HEALTHY_PALETTE};
use decay_engine::config::EngineConfig;
use decay_engine::engine::DecayEngine;
use decay_tests::helpers::*;
use proptest::prelude::*;

#[test]
fn ten_second_session_in_two_steps() {
    let (mut engine, _clock) = test_engine(10.0);
    assert_eq!(engine.update(Some(5.0)), 50.0);
    assert!(!engine.reached_zero());
    assert_eq!(engine.update(Some(5.0)), 0.0);
    assert!(engine.reached_zero());
}

#[test]
fn sixty_fps_frames_decay_monotonically_to_zero() {
    let (mut engine, clock) = test_engine(10.0);
    let trace = run_frames(&mut engine, &clock, 11 * 60, 1.0 / 60.0);

    assert!(trace.windows(2).all(|w| w[1] <= w[0]), "time decay must not increase");
    assert_eq!(*trace.last().unwrap(), 0.0);
    assert!(engine.reached_zero());
    assert_eq!(engine.zero_crossings(), 1);

    // halfway through, the percentage is close to 50
    let mid = trace[5 * 60 - 1];
    assert!((mid - 50.0).abs() < 0.01, "mid-session percentage: {mid}");
}

#[test]
fn rewards_keep_the_session_alive() {
    let (mut engine, clock) = test_engine(20.0);
    for frame in 0..(40 * 30) {
        clock.advance_secs(1.0 / 30.0);
        engine.tick();
        // one collected item per second, worth 6 points
        if frame % 30 == 29 {
            engine.modify(6.0);
        }
    }
    assert!(!engine.reached_zero());
    assert!(engine.percentage() > 0.0);
    assert!(engine.percentage() <= 100.0);
}

#[test]
fn penalties_and_time_add_up() {
    let (mut engine, clock) = test_engine(100.0);
    clock.advance_secs(10.0);
    engine.modify(-15.0);
    engine.modify(-5.0);
    // 10 s at 1 point/s plus 20 points of penalties
    assert_eq!(engine.tick(), 70.0);
}

#[test]
fn end_screen_then_new_session() {
    let (mut engine, clock) = test_engine(120.0);
    run_frames(&mut engine, &clock, 60, 0.5);
    assert_eq!(engine.tier(), DecayTier::Healthy);

    engine.force_zero();
    assert!(engine.is_depleted());
    assert_eq!(engine.current_palette(), DECAYED_PALETTE);

    clock.advance_secs(30.0);
    engine.reset();
    assert_eq!(engine.percentage(), 100.0);
    assert_eq!(engine.current_palette(), HEALTHY_PALETTE);
    assert_eq!(engine.tick(), 100.0);
}

#[test]
fn climbing_out_of_zero_rearms_the_latch() {
    let (mut engine, _clock) = test_engine(10.0);
    assert_eq!(engine.modify(-150.0), 0.0);
    assert!(engine.reached_zero());
    assert_eq!(engine.modify(50.0), 50.0);
    assert!(!engine.reached_zero());
    engine.update(Some(10.0));
    assert!(engine.reached_zero());
    assert_eq!(engine.zero_crossings(), 2);
}

#[test]
fn decay_color_strength_tracks_percentage() {
    let (mut engine, _clock) = test_engine(10.0);
    let base = Rgb::new(10, 20, 30);
    let scheme = DecayScheme::plain();

    assert_eq!(engine.decay_color(base), scheme.distort(base, 0.0));
    engine.update(Some(10.0));
    assert_eq!(engine.decay_color(base), scheme.distort(base, 1.0));
}

#[test]
fn malformed_color_matches_white() {
    let (mut engine, _clock) = test_engine(10.0);
    engine.update(Some(3.0));
    let white = engine.decay_color(Rgb::WHITE);
    assert_eq!(engine.decay_color_lenient(&[f64::NAN, f64::NAN, 5.0]), white);
    assert_eq!(engine.decay_color_lenient(&[5.0, 6.0]), white);
}

#[test]
fn config_file_to_bar_snapshot() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "decay_time_secs": 120, "noise": true, "noise_seed": 7 }}"#
    )
    .unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    let clock = ManualClock::new();
    let mut engine = DecayEngine::from_config(&config, &clock).unwrap();
    assert!(engine.scheme().has_noise());

    clock.advance_secs(90.0);
    engine.tick();

    let snap = DecayBar::default().snapshot(&engine, 200);
    assert_eq!(snap.percentage, 25.0);
    assert_eq!(snap.fill_width, 50);
    assert_eq!(snap.percentage_label, "25.0%");
    assert_eq!(snap.time_label, "Time: 00:30");

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["fill"], serde_json::json!([121, 159, 150]));
}

#[derive(Debug, Clone)]
enum Event {
    Wait(f64),
    Modify(f64),
    Reset,
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => (0.0f64..30.0).prop_map(Event::Wait),
        4 => (-120.0f64..120.0).prop_map(Event::Modify),
        1 => Just(Event::Reset),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_over_any_session(
        decay_time in 0.5f64..300.0,
        events in proptest::collection::vec(event(), 0..100),
    ) {
        let (mut engine, clock) = test_engine(decay_time);
        for ev in events {
            match ev {
                Event::Wait(secs) => {
                    clock.advance_secs(secs);
                    engine.tick();
                }
                Event::Modify(amount) => {
                    engine.modify(amount);
                }
                Event::Reset => engine.reset(),
            }
            let p = engine.percentage();
            prop_assert!((0.0..=100.0).contains(&p));
            prop_assert_eq!(engine.reached_zero(), p == 0.0);
            prop_assert_eq!(engine.is_depleted(), p == 0.0);
        }
    }

    #[test]
    fn zero_delta_updates_are_idle(
        start in -100.0f64..0.0,
        repeats in 1usize..50,
    ) {
        let (mut engine, _clock) = test_engine(60.0);
        let p = engine.modify(start);
        for _ in 0..repeats {
            prop_assert_eq!(engine.update(Some(0.0)), p);
        }
    }
}
