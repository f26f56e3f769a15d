//! Equiloud Core - perceptual math and signal specifications
//!
//! Foundational types for the loudness-matching experiment:
//!
//! - [`erb_hz`] and level conversions in [`math`]
//! - [`FrequencyGrid`] - ERB-spaced probe frequency sequences
//! - [`SignalSpecification`] - serializable descriptions of probe/masker
//!   stimuli, built from per-component trial parameters
//!
//! Frequencies here are spaced on the ERB (Equivalent Rectangular
//! Bandwidth) scale so that a sweep covers the audible range perceptually
//! rather than linearly. Levels are carried in dB SPL-equivalent until a
//! specification is built, at which point they become dBFS relative to a
//! full-scale sine calibrated to 100 dB SPL.

pub mod error;
pub mod grid;
pub mod math;
pub mod signal;

pub use error::CoreError;
pub use grid::FrequencyGrid;
pub use math::{FULL_SCALE_SINE_DB_SPL, db_to_linear, erb_hz, linear_to_db};
pub use signal::{
    ComponentParams, Onset, SignalComponent, SignalFamily, SignalSpecification,
    build_specification,
};
