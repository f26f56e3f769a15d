//! Equiloud Session - the loudness-matching experiment controller
//!
//! One listener, one session: a sweep of probe frequencies, each measured
//! by adjusting a standalone probe until it matches the loudness of the
//! same probe embedded in the session's maskers.
//!
//! - [`SessionConfig`] - externally supplied session parameters (TOML)
//! - [`SessionController`] - the single stateful object: pending trial
//!   queue, in-flight [`TrialState`], result log, and the command surface
//!   driven by listener input
//! - [`ports`] - traits for the collaborators this core does not own:
//!   stimulus rendering, audio playback, and data-point persistence
//!
//! The controller is single-threaded and event-driven: every external
//! event maps to exactly one method call, and the mutual-exclusion rule
//! (at most one stimulus audible at a time) is enforced internally.

pub mod config;
pub mod controller;
pub mod error;
pub mod ports;
pub mod trial;

pub use config::SessionConfig;
pub use controller::{SessionController, SessionStatus};
pub use error::{PersistenceError, SessionError};
pub use ports::{AudioOutput, DataPointSink, MemorySink, StimulusRenderer};
pub use trial::{DataPoint, PendingTrial, TrialState};
