//! # decay-tests
//! Cross-crate scenario tests for the decay engine.
//!
//! The tests live under `tests/`; this library only holds shared helpers.

pub mod helpers;
