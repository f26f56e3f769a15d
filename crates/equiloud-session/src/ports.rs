//! Collaborator boundaries the controller drives but does not own.

use equiloud_core::SignalSpecification;

use crate::error::PersistenceError;
use crate::trial::DataPoint;

/// The rendering service: turns a specification into a playable asset.
///
/// The `resource` string is the specification's canonical text plus a
/// trailing qualifier (`#eval=<id>`, `#calibration`). Implementations
/// may cache by resource; two different qualifiers on identical
/// specification text MUST resolve to distinct assets, so repeated
/// calibration playback and per-evaluation stimuli never cross-contaminate.
pub trait StimulusRenderer {
    /// Resolve a resource name to an asset handle, rendering if needed.
    fn prepare(&mut self, resource: &str, spec: &SignalSpecification) -> String;
}

/// The playback surface: one audible asset at a time.
///
/// The controller is the only mutator and enforces mutual exclusion by
/// ordering calls; `play` implicitly replaces whatever was audible.
pub trait AudioOutput {
    /// Start playing an asset at a gain in dB relative to its rendered level.
    fn play(&mut self, asset: &str, gain_db: f32);

    /// Adjust the gain of the currently playing asset.
    fn set_gain(&mut self, gain_db: f32);

    /// Silence the output.
    fn stop(&mut self);
}

/// The persistence service: one record per confirmed trial.
///
/// No retry policy here; a failure is surfaced to the operator and the
/// trial stays current so confirmation can be retried.
pub trait DataPointSink {
    /// Record one confirmed measurement.
    fn record(&mut self, point: &DataPoint) -> Result<(), PersistenceError>;
}

/// An in-memory sink, useful for tests and offline runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Every point recorded so far, in confirmation order.
    pub points: Vec<DataPoint>,
}

impl DataPointSink for MemorySink {
    fn record(&mut self, point: &DataPoint) -> Result<(), PersistenceError> {
        self.points.push(point.clone());
        Ok(())
    }
}
