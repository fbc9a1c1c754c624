//! Decay progress bar model.
//!
//! Computes everything a screen needs to draw the bar (fill width, color,
//! labels) without touching any rendering API.

use decay_core::constants::{HEALTHY_THRESHOLD, MAX_PERCENTAGE, WARNING_THRESHOLD};
use decay_core::traits::{Clock, ColorScheme};
use decay_core::types::Rgb;
use serde::Serialize;

use crate::engine::DecayEngine;

/// Fill colors for the three bar stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayBar {
    pub healthy: Rgb,
    pub warning: Rgb,
    pub decayed: Rgb,
}

impl Default for DecayBar {
    /// Muted green, pale yellow and teal.
    fn default() -> Self {
        Self {
            healthy: Rgb::new(0xad, 0xb4, 0x7d),
            warning: Rgb::new(0xdc, 0xe4, 0xaa),
            decayed: Rgb::new(0x79, 0x9f, 0x96),
        }
    }
}

/// Everything needed to draw the bar for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSnapshot {
    pub percentage: f64,
    pub fill_width: u32,
    pub fill: Rgb,
    pub percentage_label: String,
    pub time_label: String,
}

impl DecayBar {
    /// Bar colors from hex strings such as `"#adb47d"`.
    pub fn from_hex(
        healthy: &str,
        warning: &str,
        decayed: &str,
    ) -> Result<Self, decay_core::error::ColorError> {
        Ok(Self {
            healthy: healthy.parse()?,
            warning: warning.parse()?,
            decayed: decayed.parse()?,
        })
    }

    /// Fill color for a percentage. The bar has no separate critical stage.
    pub fn bar_color(&self, percentage: f64) -> Rgb {
        if percentage > HEALTHY_THRESHOLD {
            self.healthy
        } else if percentage > WARNING_THRESHOLD {
            self.warning
        } else {
            self.decayed
        }
    }

    pub fn snapshot<C: Clock, S: ColorScheme>(
        &self,
        engine: &DecayEngine<C, S>,
        total_width: u32,
    ) -> BarSnapshot {
        let percentage = engine.percentage();
        BarSnapshot {
            percentage,
            fill_width: fill_width(total_width, percentage),
            fill: self.bar_color(percentage),
            percentage_label: percentage_label(percentage),
            time_label: time_label(engine.decay_time(), percentage),
        }
    }
}

/// Filled width in pixels, truncated.
pub fn fill_width(total_width: u32, percentage: f64) -> u32 {
    let fraction = (percentage / MAX_PERCENTAGE).clamp(0.0, 1.0);
    (f64::from(total_width) * fraction) as u32
}

/// `"42.5%"`.
pub fn percentage_label(percentage: f64) -> String {
    format!("{percentage:.1}%")
}

/// `"Time: MM:SS"` for the time left under pure time decay, truncated to whole seconds.
pub fn time_label(decay_time: f64, percentage: f64) -> String {
    let remaining = (decay_time * percentage / MAX_PERCENTAGE).max(0.0) as u64;
    format!("Time: {:02}:{:02}", remaining / 60, remaining % 60)
}
