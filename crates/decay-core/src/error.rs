//! Error types for the Digital Decay engine.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecayError {
    #[error("invalid decay time: {0} (must be finite and > 0)")] InvalidDecayTime(f64),
    #[error("invalid initial percentage: {0} (must be within 0..=100)")] InvalidInitialPercentage(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected at least 3 color components, got {0}")] WrongArity(usize),
    #[error("non-finite color component at index {0}")] NonFinite(usize),
    #[error("invalid hex color: {0}")] InvalidHex(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")] Io { path: String, source: std::io::Error },
    #[error("parsing config: {0}")] Parse(String),
    #[error("invalid value for {key}: {value}")] InvalidValue { key: &'static str, value: String },
    #[error(transparent)] Decay(#[from] DecayError),
}
