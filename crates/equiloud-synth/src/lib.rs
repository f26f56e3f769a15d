//! Equiloud Synth - renders signal specifications into sample buffers
//!
//! A concrete, in-process implementation of the rendering collaborator:
//! given a [`SignalSpecification`](equiloud_core::SignalSpecification), it
//! produces a mono f32 buffer with every component mixed in. Rendering is
//! fully deterministic (noise comes from a fixed-seed generator), so the
//! same specification always yields the same samples - matching the
//! cache-by-canonical-text contract of the experiment controller.

pub mod biquad;
pub mod noise;
pub mod render;

pub use biquad::{Bandpass4, Biquad, bandpass_butterworth4};
pub use noise::NoiseSource;
pub use render::render;
