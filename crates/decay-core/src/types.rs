//! Color and palette types shared by the engine and its callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{CRITICAL_THRESHOLD, HEALTHY_THRESHOLD, WARNING_THRESHOLD};
use crate::error::ColorError;

/// An 8-bit RGB color.
///
/// Serializes as a `[r, g, b]` array so configuration files and CLI output
/// read like the tuples used throughout the game code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components as an array, in `r, g, b` order.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.to_array()
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// Build a color from loosely typed components.
///
/// Only the first three components are used. Each is truncated toward zero
/// and clamped into `0..=255`. Fewer than three components, or a NaN or
/// infinite value among the first three, is an error.
///
/// # Examples
///
/// ```
/// use decay_core::types::Rgb;
/// assert_eq!(Rgb::try_from(&[10.9, 20.0, 30.0, 99.0][..]), Ok(Rgb::new(10, 20, 30)));
/// assert!(Rgb::try_from(&[1.0, 2.0][..]).is_err());
/// ```
impl TryFrom<&[f64]> for Rgb {
    type Error = ColorError;

    fn try_from(components: &[f64]) -> Result<Self, Self::Error> {
        if components.len() < 3 {
            return Err(ColorError::WrongArity(components.len()));
        }
        let mut out = [0u8; 3];
        for (i, c) in components[..3].iter().enumerate() {
            if !c.is_finite() {
                return Err(ColorError::NonFinite(i));
            }
            out[i] = c.trunc().clamp(0.0, 255.0) as u8;
        }
        Ok(out.into())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Parse `#rrggbb` or `rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::InvalidHex(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The four colors a screen draws with at a given decay level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub background: Rgb,
    pub text: Rgb,
}

/// Coarse decay level used to pick palettes and bar colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayTier {
    Healthy,
    Warning,
    Critical,
    Decayed,
}

impl DecayTier {
    /// Tier for a percentage. Boundaries belong to the lower tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use decay_core::types::DecayTier;
    /// assert_eq!(DecayTier::for_percentage(100.0), DecayTier::Healthy);
    /// assert_eq!(DecayTier::for_percentage(66.0), DecayTier::Warning);
    /// assert_eq!(DecayTier::for_percentage(10.0), DecayTier::Decayed);
    /// ```
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage > HEALTHY_THRESHOLD {
            Self::Healthy
        } else if percentage > WARNING_THRESHOLD {
            Self::Warning
        } else if percentage > CRITICAL_THRESHOLD {
            Self::Critical
        } else {
            Self::Decayed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Decayed => "decayed",
        }
    }
}

impl fmt::Display for DecayTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
