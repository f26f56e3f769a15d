//! Equiloud CARFAC - cascade-of-asymmetric-resonators cochlear model
//!
//! A deterministic, pure-Rust rendition of Lyon's CARFAC family of
//! cochlear models, sized for whole-segment (non-streaming) analysis:
//!
//! - [`CarfacModel`] - the filter cascade, inner-hair-cell stage, and
//!   automatic-gain-control loop
//! - [`CarfacContext`] - the analysis adapter: owns a model plus two
//!   output matrices (basilar-membrane displacement and neural activity
//!   pattern), one row per sample, one column per channel
//! - [`CarParams`] / [`IhcParams`] / [`AgcParams`] - parameter sets with
//!   standard defaults
//!
//! Channels are placed from just below Nyquist down to `min_pole_hz`,
//! stepped by a fraction of the local ERB, so the channel count depends
//! only on the sample rate and the CAR parameter set.
//!
//! # Example
//!
//! ```rust
//! use equiloud_carfac::CarfacContext;
//!
//! let mut ctx = CarfacContext::create(48000).unwrap();
//! assert_eq!(ctx.num_samples(), 4800);
//!
//! let input = vec![0.0f32; ctx.num_samples()];
//! ctx.run(&input).unwrap();
//!
//! let mut nap = vec![0.0f32; ctx.num_samples() * ctx.num_channels()];
//! ctx.nap_into(&mut nap).unwrap();
//! ```

pub mod context;
pub mod design;
pub mod error;
pub mod model;
pub mod params;

pub use context::CarfacContext;
pub use error::CarfacError;
pub use model::CarfacModel;
pub use params::{AgcParams, CarParams, IhcParams};
