//! Engine constants. Percentages are in points on a `0.0..=100.0` scale,
//! durations in seconds.

/// Upper bound of the decay percentage (a fresh session).
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Lower bound of the decay percentage (fully decayed).
pub const MIN_PERCENTAGE: f64 = 0.0;

/// Default time for the percentage to fall from 100 to 0 under pure time decay.
pub const DEFAULT_DECAY_TIME_SECS: f64 = 60.0;

/// Decay time used for a full game session (menu plus minigames).
pub const SESSION_DECAY_TIME_SECS: f64 = 120.0;

/// Faster decay used by the start screen animation.
pub const INTRO_DECAY_TIME_SECS: f64 = 30.0;

/// Above this percentage the game is considered healthy.
pub const HEALTHY_THRESHOLD: f64 = 66.0;

/// Above this percentage (and at or below [`HEALTHY_THRESHOLD`]) the game shows a warning.
pub const WARNING_THRESHOLD: f64 = 33.0;

/// Above this percentage (and at or below [`WARNING_THRESHOLD`]) the game is critical.
/// At or below it the game is decayed.
pub const CRITICAL_THRESHOLD: f64 = 10.0;

/// Distortion strength above which the color transform adds noise.
pub const NOISE_STRENGTH_THRESHOLD: f64 = 0.3;

/// Maximum per-channel noise amplitude, reached at full distortion strength.
pub const NOISE_AMPLITUDE: f64 = 30.0;

/// Red channel: fraction of brightness lost at full strength.
pub const RED_FADE: f64 = 0.5;

/// Red channel: tint added at full strength.
pub const RED_TINT: f64 = 50.0;

/// Green and blue channels: fraction of brightness lost at full strength.
pub const GREEN_BLUE_FADE: f64 = 0.7;

/// Percentage points lost per second for a given decay time.
///
/// # Examples
///
/// ```
/// use decay_core::constants::decay_rate;
/// assert_eq!(decay_rate(10.0), 10.0);
/// assert_eq!(decay_rate(60.0), 100.0 / 60.0);
/// ```
pub fn decay_rate(decay_time_secs: f64) -> f64 {
    MAX_PERCENTAGE / decay_time_secs
}
