//! Trial records: pending, in-flight, and confirmed.

use serde::{Deserialize, Serialize};

use equiloud_core::SignalFamily;

/// Lower clamp of the listener-adjustable probe level.
pub const PROBE_LEVEL_MIN_DB_SPL: f32 = -20.0;
/// Upper clamp of the listener-adjustable probe level.
pub const PROBE_LEVEL_MAX_DB_SPL: f32 = 90.0;
/// Size of one raise/lower step.
pub const PROBE_LEVEL_STEP_DB: f32 = 1.0;

/// A trial that has not started yet: plain data, so the queue can be
/// inspected in tests instead of holding deferred closures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTrial {
    /// Probe center frequency for this trial.
    pub probe_frequency_hz: f32,
}

/// The one in-flight trial, exclusively owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialState {
    /// Probe center frequency.
    pub probe_frequency_hz: f32,
    /// Current listener-adjusted probe level, dB SPL-equivalent.
    pub probe_level_db_spl: f32,
    /// Unique identifier of this evaluation within the session.
    pub evaluation_id: String,
    /// Asset handle of the standalone probe rendering.
    pub probe_asset: String,
    /// Asset handle of the probe-plus-maskers rendering.
    pub combined_asset: String,
    /// Gates listener controls; false between deactivation and the next
    /// trial, so stray input cannot corrupt anything.
    pub active: bool,
}

/// An immutable, confirmed measurement.
///
/// Carries the full session configuration snapshot so a point can be
/// interpreted without the session that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Evaluation identifier, unique within the session.
    pub evaluation_id: String,
    /// Probe center frequency of the trial.
    pub probe_frequency_hz: f32,
    /// Final matched probe level, dB SPL-equivalent.
    pub matched_level_db_spl: f32,
    /// Component family used for the stimuli.
    pub signal_family: SignalFamily,
    /// Noise bandwidth parameter in ERB units.
    pub erb_width: f32,
    /// Masker center frequencies.
    pub mask_frequencies: Vec<f32>,
    /// Masker levels, parallel to `mask_frequencies`.
    pub mask_levels: Vec<f32>,
    /// The probe level setting both renderings embedded.
    pub probe_level_setting_db_spl: f32,
    /// Probe frequency step in ERB units.
    pub erb_apart: f32,
    /// Calibration reference level.
    pub calibration_level_db_spl: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_point_serializes_with_snapshot() {
        let point = DataPoint {
            evaluation_id: "eval-3".to_string(),
            probe_frequency_hz: 1000.0,
            matched_level_db_spl: 47.0,
            signal_family: SignalFamily::Tone,
            erb_width: 1.0,
            mask_frequencies: vec![900.0],
            mask_levels: vec![80.0],
            probe_level_setting_db_spl: 60.0,
            erb_apart: 1.0,
            calibration_level_db_spl: 94.0,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"evaluation_id\":\"eval-3\""));
        assert!(json.contains("\"matched_level_db_spl\":47.0"));
        let back: DataPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
