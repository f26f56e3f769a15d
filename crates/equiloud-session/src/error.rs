//! Error types for session control.

use thiserror::Error;

/// Failure reported by the persistence collaborator.
///
/// Recoverable: the controller keeps the current trial intact so the
/// confirmation can be retried without re-deriving the stimulus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PersistenceError(pub String);

/// Errors surfaced by the session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session cannot start with the supplied configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Recording a confirmed trial failed; the trial is still current.
    #[error("failed to record data point: {0}")]
    Persistence(#[from] PersistenceError),

    /// A stimulus specification could not be serialized.
    #[error("failed to serialize specification: {0}")]
    Specification(#[from] equiloud_core::CoreError),

    /// A configuration file could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    ReadFile {
        /// Path of the file that could not be read.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file did not parse.
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_display() {
        let msg = SessionError::InvalidConfiguration("mask lists differ".to_string()).to_string();
        assert_eq!(msg, "invalid configuration: mask lists differ");
    }

    #[test]
    fn persistence_display_carries_collaborator_message() {
        let err = SessionError::from(PersistenceError("503 from log service".to_string()));
        let msg = err.to_string();
        assert!(msg.contains("failed to record data point"), "got: {msg}");
        assert!(msg.contains("503"), "got: {msg}");
    }
}
