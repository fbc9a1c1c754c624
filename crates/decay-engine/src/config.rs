//! Engine configuration.
//!
//! Provides [`EngineConfig`] with defaults matching the standalone engine
//! (60 second decay, noisy colors). A config can be built programmatically,
//! loaded from a JSON file, or overlaid with environment variables.

use std::path::Path;

use decay_core::constants::{
    DEFAULT_DECAY_TIME_SECS, INTRO_DECAY_TIME_SECS, MAX_PERCENTAGE, MIN_PERCENTAGE,
    SESSION_DECAY_TIME_SECS,
};
use decay_core::error::{ConfigError, DecayError};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`EngineConfig::decay_time_secs`].
pub const ENV_DECAY_TIME: &str = "DECAY_TIME_SECS";
/// Environment variable overriding [`EngineConfig::noise`] (`true`/`false`/`1`/`0`).
pub const ENV_NOISE: &str = "DECAY_NOISE";
/// Environment variable overriding [`EngineConfig::noise_seed`].
pub const ENV_NOISE_SEED: &str = "DECAY_NOISE_SEED";

/// Settings for one [`DecayEngine`](crate::DecayEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Seconds for time decay to take the percentage from 100 to 0.
    pub decay_time_secs: f64,
    /// Add random per-channel noise to heavily decayed colors.
    pub noise: bool,
    /// Seed for the noise generator. `None` seeds from the OS.
    pub noise_seed: Option<u64>,
    /// Percentage the session starts at.
    pub initial_percentage: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decay_time_secs: DEFAULT_DECAY_TIME_SECS,
            noise: true,
            noise_seed: None,
            initial_percentage: MAX_PERCENTAGE,
        }
    }
}

impl EngineConfig {
    /// Preset for a full game session.
    pub fn session() -> Self {
        Self {
            decay_time_secs: SESSION_DECAY_TIME_SECS,
            ..Self::default()
        }
    }

    /// Preset for the start screen animation.
    pub fn intro() -> Self {
        Self {
            decay_time_secs: INTRO_DECAY_TIME_SECS,
            ..Self::default()
        }
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from `DECAY_*` environment variables.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn with_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_DECAY_TIME) {
            self.decay_time_secs = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_DECAY_TIME,
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup(ENV_NOISE) {
            self.noise = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_NOISE,
                        value: v,
                    });
                }
            };
        }
        if let Some(v) = lookup(ENV_NOISE_SEED) {
            self.noise_seed = Some(v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_NOISE_SEED,
                value: v.clone(),
            })?);
        }
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), DecayError> {
        if !self.decay_time_secs.is_finite() || self.decay_time_secs <= 0.0 {
            return Err(DecayError::InvalidDecayTime(self.decay_time_secs));
        }
        if !(MIN_PERCENTAGE..=MAX_PERCENTAGE).contains(&self.initial_percentage) {
            return Err(DecayError::InvalidInitialPercentage(self.initial_percentage));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.decay_time_secs, 60.0);
        assert!(cfg.noise);
        assert_eq!(cfg.noise_seed, None);
        assert_eq!(cfg.initial_percentage, 100.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn presets() {
        assert_eq!(EngineConfig::session().decay_time_secs, 120.0);
        assert_eq!(EngineConfig::intro().decay_time_secs, 30.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cfg = EngineConfig {
            decay_time_secs: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(DecayError::InvalidDecayTime(0.0)));

        let cfg = EngineConfig {
            initial_percentage: 101.0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(DecayError::InvalidInitialPercentage(101.0)));
    }

    #[test]
    fn load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "decay_time_secs": 15.5, "noise": false }}"#).unwrap();
        let cfg = EngineConfig::load(file.path()).unwrap();
        assert_eq!(cfg.decay_time_secs, 15.5);
        assert!(!cfg.noise);
        assert_eq!(cfg.initial_percentage, 100.0);
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "decay_tme": 15 }}"#).unwrap();
        assert!(matches!(EngineConfig::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "decay_time_secs": -4 }}"#).unwrap();
        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::Decay(DecayError::InvalidDecayTime(_)))
        ));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn env_overlay() {
        let cfg = EngineConfig::default()
            .with_vars(vars(&[
                (ENV_DECAY_TIME, " 90 "),
                (ENV_NOISE, "off"),
                (ENV_NOISE_SEED, "1234"),
            ]))
            .unwrap();
        assert_eq!(cfg.decay_time_secs, 90.0);
        assert!(!cfg.noise);
        assert_eq!(cfg.noise_seed, Some(1234));
    }

    #[test]
    fn env_overlay_without_vars_is_identity() {
        let cfg = EngineConfig::session().with_vars(vars(&[])).unwrap();
        assert_eq!(cfg, EngineConfig::session());
    }

    #[test]
    fn env_overlay_rejects_garbage() {
        let err = EngineConfig::default()
            .with_vars(vars(&[(ENV_NOISE, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_NOISE, .. }));

        let err = EngineConfig::default()
            .with_vars(vars(&[(ENV_DECAY_TIME, "-1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Decay(_)));
    }
}
