//! Error types for core operations.

use thiserror::Error;

/// Errors from grid construction and specification building.
#[derive(Debug, Error)]
pub enum CoreError {
    /// ERB step parameter would never terminate the grid walk.
    #[error("erb step must be positive, got {0}")]
    NonPositiveStep(f32),

    /// Frequency range cannot contain a single grid point.
    #[error("empty frequency range [{min} Hz, {max} Hz)")]
    EmptyRange {
        /// Lower bound of the requested range.
        min: f32,
        /// Exclusive upper bound of the requested range.
        max: f32,
    },

    /// An entry of an explicit frequency override list did not parse.
    #[error("cannot parse frequency '{0}'")]
    ParseFrequency(String),

    /// Canonical serialization of a specification failed.
    #[error("failed to serialize signal specification: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_step_display() {
        let msg = CoreError::NonPositiveStep(-0.5).to_string();
        assert!(msg.contains("erb step must be positive"), "got: {msg}");
        assert!(msg.contains("-0.5"), "got: {msg}");
    }

    #[test]
    fn empty_range_display() {
        let msg = CoreError::EmptyRange { min: 80.0, max: 40.0 }.to_string();
        assert!(msg.contains("empty frequency range"), "got: {msg}");
    }

    #[test]
    fn parse_frequency_display() {
        let msg = CoreError::ParseFrequency("abc".to_string()).to_string();
        assert_eq!(msg, "cannot parse frequency 'abc'");
    }
}
