//! # decay-core
//! Foundation types and traits for the Digital Decay engine.

pub mod clock;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
