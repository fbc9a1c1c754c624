//! Shared test helpers for scenario tests.

use std::sync::Arc;

use decay_core::clock::ManualClock;
use decay_engine::color::DecayScheme;
use decay_engine::engine::DecayEngine;

/// Engine driven by a hand-advanced clock, with noise-free colors.
pub type TestEngine = DecayEngine<Arc<ManualClock>, DecayScheme>;

/// Create an engine plus a handle to its clock.
pub fn test_engine(decay_time: f64) -> (TestEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let engine = DecayEngine::with_parts(decay_time, Arc::clone(&clock), DecayScheme::plain())
        .expect("valid decay time");
    (engine, clock)
}

/// Advance the clock in `frames` equal steps of `frame_secs`, ticking the
/// engine after each one. Returns the percentage after every frame.
pub fn run_frames(
    engine: &mut TestEngine,
    clock: &ManualClock,
    frames: usize,
    frame_secs: f64,
) -> Vec<f64> {
    (0..frames)
        .map(|_| {
            clock.advance_secs(frame_secs);
            engine.tick()
        })
        .collect()
}
