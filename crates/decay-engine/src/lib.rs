//! # decay-engine — Timer-driven decay state for Digital Decay.
//!
//! The game tracks a single percentage that starts at 100 and falls to 0
//! over a configured decay time:
//! - **Time decay**: each [`DecayEngine::update`] subtracts
//!   `100 / decay_time` points per elapsed second of monotonic time.
//! - **Event deltas**: [`DecayEngine::modify`] applies gameplay rewards and
//!   penalties immediately, independent of the time path.
//! - **Zero latch**: the first touch of 0% is edge-detected so screens can
//!   trigger one-time effects such as the end screen.
//! - **Colors**: the percentage selects a tiered [`Palette`](decay_core::types::Palette)
//!   and drives a distortion applied to arbitrary colors.

pub mod bar;
pub mod color;
pub mod config;
pub mod engine;

pub use bar::{BarSnapshot, DecayBar};
pub use color::DecayScheme;
pub use config::EngineConfig;
pub use engine::DecayEngine;
