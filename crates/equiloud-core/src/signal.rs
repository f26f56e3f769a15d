//! Signal specifications: structured descriptions of trial stimuli.
//!
//! A specification is the contract between the experiment controller and
//! the rendering collaborator: it lists concurrent components (pure tones
//! or ERB-scaled noise bands), each with its own onset. The canonical
//! JSON text of a specification doubles as the rendered asset's identity,
//! so serialization must be byte-stable for identical inputs.
//!
//! Component order is serialized as given; two specifications with the
//! same components in different orders are acoustically identical but
//! resolve to distinct rendered assets. That is accepted behavior: the
//! controller always builds components in trial-entry order.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::math::{FULL_SCALE_SINE_DB_SPL, erb_hz};

/// Onset ramp applied to every generated component.
pub const ONSET_RAMP_SECS: f32 = 0.1;

/// When a component starts and how it fades in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Onset {
    /// Seconds of silence before the component starts.
    pub delay_secs: f32,
    /// Fade-in duration once the component starts.
    pub ramp_secs: f32,
}

/// One acoustic component of a stimulus.
///
/// Levels are in dBFS: dB relative to a full-scale sine, which the
/// playback chain reproduces at [`FULL_SCALE_SINE_DB_SPL`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalComponent {
    /// A pure tone.
    Tone {
        /// Tone frequency in Hz.
        frequency_hz: f32,
        /// Level in dBFS.
        level_dbfs: f32,
        /// Onset timing.
        onset: Onset,
    },
    /// Band-limited noise.
    BandNoise {
        /// Lower band edge in Hz.
        low_hz: f32,
        /// Upper band edge in Hz.
        high_hz: f32,
        /// Level in dBFS.
        level_dbfs: f32,
        /// Onset timing.
        onset: Onset,
    },
}

/// An ordered set of concurrent components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSpecification {
    /// Components in builder order.
    pub components: Vec<SignalComponent>,
}

impl SignalSpecification {
    /// Canonical textual form used as the rendered asset's identity.
    ///
    /// Identical component lists always serialize to identical bytes;
    /// struct field order is fixed by the type definitions.
    pub fn canonical_text(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Which component family a session generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalFamily {
    /// Pure-tone probe and maskers.
    Tone,
    /// Noise bands centered on the nominal frequencies, one local
    /// bandwidth wide scaled by the session's ERB width parameter.
    BandNoise,
}

/// Per-component trial parameters handed to the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentParams {
    /// Identifier of the playback element this component feeds,
    /// carried only for trace output.
    pub id: String,
    /// Onset delay in seconds.
    pub delay_secs: f32,
    /// Nominal center frequency in Hz.
    pub frequency_hz: f32,
    /// Level in dB SPL-equivalent.
    pub level_db_spl: f32,
}

/// Build a specification for one stimulus.
///
/// Every entry becomes one component of `family`. Levels are converted
/// from dB SPL-equivalent to dBFS by subtracting the full-scale sine
/// reference; all components get the fixed [`ONSET_RAMP_SECS`] ramp.
/// For [`SignalFamily::BandNoise`] the band is centered on the entry
/// frequency with width `erb(frequency) * erb_width`.
pub fn build_specification(
    family: SignalFamily,
    erb_width: f32,
    entries: &[ComponentParams],
) -> SignalSpecification {
    let components = entries
        .iter()
        .map(|entry| {
            let onset = Onset {
                delay_secs: entry.delay_secs,
                ramp_secs: ONSET_RAMP_SECS,
            };
            let level_dbfs = entry.level_db_spl - FULL_SCALE_SINE_DB_SPL;
            match family {
                SignalFamily::Tone => SignalComponent::Tone {
                    frequency_hz: entry.frequency_hz,
                    level_dbfs,
                    onset,
                },
                SignalFamily::BandNoise => {
                    let width = erb_hz(entry.frequency_hz) * erb_width;
                    SignalComponent::BandNoise {
                        low_hz: entry.frequency_hz - width / 2.0,
                        high_hz: entry.frequency_hz + width / 2.0,
                        level_dbfs,
                        onset,
                    }
                }
            }
        })
        .collect();
    SignalSpecification { components }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, frequency_hz: f32, level_db_spl: f32) -> ComponentParams {
        ComponentParams {
            id: id.to_string(),
            delay_secs: 0.0,
            frequency_hz,
            level_db_spl,
        }
    }

    #[test]
    fn tone_level_is_offset_by_full_scale_reference() {
        let spec = build_specification(SignalFamily::Tone, 0.0, &[entry("probe", 1000.0, 60.0)]);
        match spec.components[0] {
            SignalComponent::Tone { level_dbfs, frequency_hz, onset } => {
                assert_eq!(level_dbfs, -40.0);
                assert_eq!(frequency_hz, 1000.0);
                assert_eq!(onset.ramp_secs, ONSET_RAMP_SECS);
            }
            SignalComponent::BandNoise { .. } => panic!("expected a tone"),
        }
    }

    #[test]
    fn band_noise_is_centered_with_erb_width() {
        let spec =
            build_specification(SignalFamily::BandNoise, 2.0, &[entry("probe", 1000.0, 60.0)]);
        match spec.components[0] {
            SignalComponent::BandNoise { low_hz, high_hz, .. } => {
                let width = erb_hz(1000.0) * 2.0;
                assert!((high_hz - low_hz - width).abs() < 1e-3);
                assert!(((low_hz + high_hz) / 2.0 - 1000.0).abs() < 1e-3);
            }
            SignalComponent::Tone { .. } => panic!("expected band noise"),
        }
    }

    #[test]
    fn identical_inputs_serialize_identically() {
        let entries = [entry("masker", 500.0, 70.0), entry("probe", 1000.0, 60.0)];
        let a = build_specification(SignalFamily::Tone, 0.0, &entries)
            .canonical_text()
            .unwrap();
        let b = build_specification(SignalFamily::Tone, 0.0, &entries)
            .canonical_text()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reordered_inputs_serialize_differently() {
        let forward = [entry("masker", 500.0, 70.0), entry("probe", 1000.0, 60.0)];
        let reversed = [entry("probe", 1000.0, 60.0), entry("masker", 500.0, 70.0)];
        let a = build_specification(SignalFamily::Tone, 0.0, &forward)
            .canonical_text()
            .unwrap();
        let b = build_specification(SignalFamily::Tone, 0.0, &reversed)
            .canonical_text()
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn canonical_text_round_trips_through_serde() {
        let spec = build_specification(
            SignalFamily::BandNoise,
            1.0,
            &[entry("probe", 2000.0, 55.0)],
        );
        let text = spec.canonical_text().unwrap();
        let back: SignalSpecification = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
    }
}
