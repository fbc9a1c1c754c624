//! Trait interfaces for the decay engine.
//!
//! These traits define the seams between the engine and its collaborators:
//! - [`Clock`] — monotonic time source (`clock` module implements)
//! - [`ColorScheme`] — palette and color-distortion functions (decay-engine implements)

use std::sync::Arc;
use std::time::Duration;

use crate::types::{Palette, Rgb};

/// Monotonic time source.
///
/// Returns the time elapsed since an arbitrary, fixed origin. Successive
/// calls never go backwards, so elapsed-time arithmetic can't go negative
/// because of wall-clock adjustments.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Colors derived from the current decay percentage.
///
/// Consumed by the engine once per frame. `palette_for` must be a
/// deterministic function of the percentage alone.
pub trait ColorScheme: Send + Sync {
    /// Palette for a percentage in `0.0..=100.0`.
    fn palette_for(&self, percentage: f64) -> Palette;

    /// Distort `color` with the given strength.
    ///
    /// `strength` is `0.0` for an untouched color and `1.0` for full decay.
    fn distort(&self, color: Rgb, strength: f64) -> Rgb;
}

impl<T: ColorScheme + ?Sized> ColorScheme for Arc<T> {
    fn palette_for(&self, percentage: f64) -> Palette {
        (**self).palette_for(percentage)
    }

    fn distort(&self, color: Rgb, strength: f64) -> Rgb {
        (**self).distort(color, strength)
    }
}
