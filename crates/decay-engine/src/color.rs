//! Default color scheme and color math.
//!
//! [`DecayScheme`] implements [`ColorScheme`] with four tiered palettes and a
//! brightness-fade-plus-red-tint distortion. Noise is optional: without it
//! the scheme is a pure function of its inputs.

use decay_core::constants::{
    GREEN_BLUE_FADE, NOISE_AMPLITUDE, NOISE_STRENGTH_THRESHOLD, RED_FADE, RED_TINT,
};
use decay_core::traits::ColorScheme;
use decay_core::types::{DecayTier, Palette, Rgb};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const HEALTHY_PALETTE: Palette = Palette {
    primary: Rgb::new(0, 255, 0),
    secondary: Rgb::new(100, 255, 100),
    background: Rgb::new(0, 40, 0),
    text: Rgb::new(200, 255, 200),
};

pub const WARNING_PALETTE: Palette = Palette {
    primary: Rgb::new(255, 255, 0),
    secondary: Rgb::new(255, 255, 100),
    background: Rgb::new(40, 40, 0),
    text: Rgb::new(255, 255, 200),
};

pub const CRITICAL_PALETTE: Palette = Palette {
    primary: Rgb::new(255, 0, 0),
    secondary: Rgb::new(255, 100, 100),
    background: Rgb::new(40, 0, 0),
    text: Rgb::new(255, 200, 200),
};

pub const DECAYED_PALETTE: Palette = Palette {
    primary: Rgb::new(100, 0, 0),
    secondary: Rgb::new(50, 0, 0),
    background: Rgb::new(20, 0, 0),
    text: Rgb::new(150, 50, 50),
};

/// Palette for a tier.
pub fn palette_for_tier(tier: DecayTier) -> Palette {
    match tier {
        DecayTier::Healthy => HEALTHY_PALETTE,
        DecayTier::Warning => WARNING_PALETTE,
        DecayTier::Critical => CRITICAL_PALETTE,
        DecayTier::Decayed => DECAYED_PALETTE,
    }
}

/// The game's color scheme.
#[derive(Debug, Default)]
pub struct DecayScheme {
    noise: Option<Mutex<StdRng>>,
}

impl DecayScheme {
    /// Deterministic scheme, no noise.
    pub fn plain() -> Self {
        Self { noise: None }
    }

    /// Scheme that adds per-channel noise to heavily decayed colors.
    ///
    /// A fixed `seed` makes the noise sequence reproducible.
    pub fn noisy(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            noise: Some(Mutex::new(rng)),
        }
    }

    pub fn has_noise(&self) -> bool {
        self.noise.is_some()
    }
}

impl ColorScheme for DecayScheme {
    fn palette_for(&self, percentage: f64) -> Palette {
        palette_for_tier(DecayTier::for_percentage(percentage))
    }

    fn distort(&self, color: Rgb, strength: f64) -> Rgb {
        let s = clamp_unit(strength);
        let [r, g, b] = fade(color, s);

        match &self.noise {
            Some(rng) if s > NOISE_STRENGTH_THRESHOLD => {
                let amplitude = (s * NOISE_AMPLITUDE) as i32;
                let mut rng = rng.lock();
                let mut jitter = |v: i32| {
                    (v + rng.gen_range(-amplitude..=amplitude)).clamp(0, 255) as u8
                };
                Rgb::new(jitter(r), jitter(g), jitter(b))
            }
            _ => Rgb::new(r as u8, g as u8, b as u8),
        }
    }
}

/// Noise-free part of the distortion: dims every channel and tints toward red.
fn fade(color: Rgb, s: f64) -> [i32; 3] {
    let r = f64::from(color.r) * (1.0 - s * RED_FADE) + s * RED_TINT;
    let g = f64::from(color.g) * (1.0 - s * GREEN_BLUE_FADE);
    let b = f64::from(color.b) * (1.0 - s * GREEN_BLUE_FADE);
    [r as i32, g as i32, b as i32]
}

// NaN counts as no distortion.
fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Linear blend from `from` to `to`; `t` is clamped to `[0, 1]`.
pub fn interpolate(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = clamp_unit(t);
    let lerp = |a: u8, b: u8| {
        let a = f64::from(a);
        (a + (f64::from(b) - a) * t).clamp(0.0, 255.0) as u8
    };
    Rgb::new(lerp(from.r, to.r), lerp(from.g, to.g), lerp(from.b, to.b))
}

/// Convert HSV to RGB. Hue wraps into `[0, 360)`; saturation and value are clamped to `[0, 1]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = clamp_unit(s);
    let v = clamp_unit(v);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |ch: f64| ((ch + m) * 255.0) as u8;
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}

/// Convert RGB to `(hue 0..360, saturation 0..1, value 0..1)`.
pub fn rgb_to_hsv(color: Rgb) -> (f64, f64, f64) {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let diff = cmax - cmin;

    let h = if diff == 0.0 {
        0.0
    } else if cmax == r {
        (60.0 * ((g - b) / diff) + 360.0) % 360.0
    } else if cmax == g {
        (60.0 * ((b - r) / diff) + 120.0) % 360.0
    } else {
        (60.0 * ((r - g) / diff) + 240.0) % 360.0
    };
    let s = if cmax == 0.0 { 0.0 } else { diff / cmax };

    (h, s, cmax)
}
