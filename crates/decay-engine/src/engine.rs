//! The decay engine.
//!
//! Owns the decay percentage for one game session. Two independent paths
//! mutate it: [`DecayEngine::update`] applies time decay and
//! [`DecayEngine::modify`] applies gameplay deltas. Both clamp into
//! `[0, 100]` and share the zero-latch logic.

use std::time::Duration;

use decay_core::clock::MonotonicClock;
use decay_core::constants::{DEFAULT_DECAY_TIME_SECS, MAX_PERCENTAGE, MIN_PERCENTAGE};
use decay_core::error::DecayError;
use decay_core::traits::{Clock, ColorScheme};
use decay_core::types::{DecayTier, Palette, Rgb};
use tracing::{debug, warn};

use crate::color::DecayScheme;
use crate::config::EngineConfig;

/// Decay state for one game session.
#[derive(Debug)]
pub struct DecayEngine<C: Clock = MonotonicClock, S: ColorScheme = DecayScheme> {
    percentage: f64,
    decay_time: f64,
    last_update: Duration,
    reached_zero: bool,
    zero_crossings: u64,
    clock: C,
    scheme: S,
}

impl DecayEngine {
    /// Engine on the real monotonic clock with the noise-free default scheme.
    pub fn new(decay_time: f64) -> Result<Self, DecayError> {
        Self::with_parts(decay_time, MonotonicClock::new(), DecayScheme::plain())
    }
}

impl Default for DecayEngine {
    fn default() -> Self {
        Self::build(
            DEFAULT_DECAY_TIME_SECS,
            MonotonicClock::new(),
            DecayScheme::plain(),
        )
    }
}

impl<C: Clock> DecayEngine<C, DecayScheme> {
    /// Engine configured from an [`EngineConfig`], reading time from `clock`.
    pub fn from_config(config: &EngineConfig, clock: C) -> Result<Self, DecayError> {
        config.validate()?;
        let scheme = if config.noise {
            DecayScheme::noisy(config.noise_seed)
        } else {
            DecayScheme::plain()
        };
        let mut engine = Self::with_parts(config.decay_time_secs, clock, scheme)?;
        engine.percentage = config.initial_percentage;
        if engine.percentage <= MIN_PERCENTAGE {
            engine.reached_zero = true;
        }
        Ok(engine)
    }
}

impl<C: Clock, S: ColorScheme> DecayEngine<C, S> {
    /// Engine with an explicit clock and color scheme.
    ///
    /// `decay_time` is the number of seconds for pure time decay to take the
    /// percentage from 100 to 0. It must be finite and strictly positive.
    pub fn with_parts(decay_time: f64, clock: C, scheme: S) -> Result<Self, DecayError> {
        if !decay_time.is_finite() || decay_time <= 0.0 {
            return Err(DecayError::InvalidDecayTime(decay_time));
        }
        debug!(decay_time, "decay engine created");
        Ok(Self::build(decay_time, clock, scheme))
    }

    fn build(decay_time: f64, clock: C, scheme: S) -> Self {
        let last_update = clock.now();
        Self {
            percentage: MAX_PERCENTAGE,
            decay_time,
            last_update,
            reached_zero: false,
            zero_crossings: 0,
            clock,
            scheme,
        }
    }

    /// Apply time decay and return the new percentage.
    ///
    /// With `None` the elapsed time since the previous `update` is read from
    /// the clock. A supplied non-finite delta counts as zero elapsed time.
    pub fn update(&mut self, delta_time: Option<f64>) -> f64 {
        let now = self.clock.now();
        let delta = match delta_time {
            Some(d) if d.is_finite() => d,
            Some(d) => {
                debug!(delta_time = d, "ignoring non-finite delta time");
                0.0
            }
            None => now.saturating_sub(self.last_update).as_secs_f64(),
        };

        // Divide first so that a step of exactly `decay_time` removes exactly 100 points.
        self.percentage -= delta / self.decay_time * MAX_PERCENTAGE;
        self.settle("time decay");
        self.last_update = now;
        self.percentage
    }

    /// [`update`](Self::update) with the elapsed time read from the clock.
    pub fn tick(&mut self) -> f64 {
        self.update(None)
    }

    /// Add `amount` percentage points (negative to decay) and return the new percentage.
    ///
    /// Takes effect immediately and does not reset the time-decay reference,
    /// so the next clock-driven `update` still covers all time since the
    /// previous `update`. Non-finite amounts are ignored.
    pub fn modify(&mut self, amount: f64) -> f64 {
        if !amount.is_finite() {
            debug!(amount, "ignoring non-finite decay modification");
            return self.percentage;
        }
        self.percentage += amount;
        self.settle("modification");
        self.percentage
    }

    /// Drive the percentage to zero, as when a screen requests the end screen.
    pub fn force_zero(&mut self) -> f64 {
        self.modify(-MAX_PERCENTAGE)
    }

    /// Start a fresh session: full percentage, latch and counters cleared.
    pub fn reset(&mut self) {
        self.percentage = MAX_PERCENTAGE;
        self.reached_zero = false;
        self.zero_crossings = 0;
        self.last_update = self.clock.now();
        debug!(decay_time = self.decay_time, "decay engine reset");
    }

    // Clamp into [0, 100] and maintain the zero latch.
    fn settle(&mut self, cause: &'static str) {
        if self.percentage <= MIN_PERCENTAGE {
            if !self.reached_zero {
                self.reached_zero = true;
                self.zero_crossings += 1;
                warn!(cause, crossings = self.zero_crossings, "decay reached 0%");
            }
            self.percentage = MIN_PERCENTAGE;
        } else {
            self.percentage = self.percentage.min(MAX_PERCENTAGE);
            self.reached_zero = false;
        }
    }

    /// Palette for the current percentage.
    pub fn current_palette(&self) -> Palette {
        self.scheme.palette_for(self.percentage)
    }

    /// Distort `base` by the current decay level.
    ///
    /// Strength is `0.0` at 100% and `1.0` at 0%.
    pub fn decay_color(&self, base: Rgb) -> Rgb {
        self.scheme.distort(base, self.decay_factor())
    }

    /// [`decay_color`](Self::decay_color) for loosely typed components.
    ///
    /// Components that don't form a valid color (fewer than three, or a NaN
    /// or infinite value) are replaced with white.
    pub fn decay_color_lenient(&self, components: &[f64]) -> Rgb {
        let base = Rgb::try_from(components).unwrap_or_else(|e| {
            debug!(error = %e, "substituting white for invalid color");
            Rgb::WHITE
        });
        self.decay_color(base)
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn decay_time(&self) -> f64 {
        self.decay_time
    }

    /// Whether the percentage is sitting at 0% after reaching it.
    pub fn reached_zero(&self) -> bool {
        self.reached_zero
    }

    /// How many times the percentage has dropped to 0% this session.
    pub fn zero_crossings(&self) -> u64 {
        self.zero_crossings
    }

    pub fn is_depleted(&self) -> bool {
        self.percentage <= MIN_PERCENTAGE
    }

    /// Distortion strength for the current percentage: `1 - percentage / 100`.
    pub fn decay_factor(&self) -> f64 {
        1.0 - self.percentage / MAX_PERCENTAGE
    }

    pub fn tier(&self) -> DecayTier {
        DecayTier::for_percentage(self.percentage)
    }

    /// Time left until 0% under pure time decay, saturating at [`Duration::MAX`].
    pub fn time_remaining(&self) -> Duration {
        Duration::try_from_secs_f64(self.decay_time * self.percentage / MAX_PERCENTAGE)
            .unwrap_or(Duration::MAX)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }
}
