//! Error types for the model adapter.

use thiserror::Error;

/// Errors from context creation and buffer exchange.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarfacError {
    /// A caller-supplied buffer does not match the context's shape.
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSizeMismatch {
        /// Length the context requires.
        expected: usize,
        /// Length the caller supplied.
        actual: usize,
    },

    /// Output matrix allocation failed at context creation.
    #[error("cannot allocate {bytes} bytes for model output buffers")]
    ResourceExhaustion {
        /// Size of the failed allocation.
        bytes: usize,
    },
}
