//! Equiloud IO - WAV reading and writing
//!
//! Thin wrapper over `hound` used by the CLI: rendered stimuli go out as
//! 32-bit float mono WAV, and analysis input comes back in as mono f32
//! (multi-channel files are averaged down).

pub mod wav;

pub use wav::{read_wav_mono, write_wav_mono};

use thiserror::Error;

/// Errors from WAV I/O.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying WAV codec error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

/// Convenience alias for this crate's results.
pub type Result<T> = std::result::Result<T, IoError>;
