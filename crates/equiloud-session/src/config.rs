//! Session configuration.
//!
//! All fields arrive externally validated for type, but the cross-field
//! rules (matching masker lists, positive ERB step) are checked here at
//! session start, before any trial exists.

use serde::{Deserialize, Serialize};
use std::path::Path;

use equiloud_core::{FrequencyGrid, SignalFamily};

use crate::error::SessionError;

/// Parameters of one experiment session.
///
/// # TOML format
///
/// ```toml
/// signal_family = "tone"
/// erb_width = 1.0
/// mask_frequencies = [1000.0]
/// mask_levels = [80.0]
/// probe_level_db_spl = 60.0
/// erb_apart = 1.0
/// min_frequency_hz = 100.0
/// max_frequency_hz = 15000.0
/// calibration_level_db_spl = 94.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Component family for probe and maskers.
    #[serde(default = "default_signal_family")]
    pub signal_family: SignalFamily,

    /// Bandwidth of noise components, in local ERB units.
    #[serde(default = "default_erb_width")]
    pub erb_width: f32,

    /// Masker center frequencies in Hz, one masker per entry.
    #[serde(default)]
    pub mask_frequencies: Vec<f32>,

    /// Masker levels in dB SPL-equivalent, parallel to `mask_frequencies`.
    #[serde(default)]
    pub mask_levels: Vec<f32>,

    /// Probe level setting in dB SPL-equivalent; both renderings embed the
    /// probe at this level, and the listener's adjustment is a gain
    /// relative to it.
    #[serde(default = "default_probe_level")]
    pub probe_level_db_spl: f32,

    /// Probe onset delay within the combined rendering, seconds.
    #[serde(default)]
    pub probe_delay_secs: f32,

    /// Probe frequency step in ERB units.
    #[serde(default = "default_erb_apart")]
    pub erb_apart: f32,

    /// Lower bound of the probe sweep in Hz.
    #[serde(default = "default_min_frequency")]
    pub min_frequency_hz: f32,

    /// Exclusive upper bound of the probe sweep in Hz.
    #[serde(default = "default_max_frequency")]
    pub max_frequency_hz: f32,

    /// Optional comma-separated probe frequency override list; when set,
    /// the stepping rule is ignored and this list is used verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_overrides: Option<String>,

    /// Reference level of the calibration tone in dB SPL-equivalent.
    #[serde(default = "default_calibration_level")]
    pub calibration_level_db_spl: f32,
}

fn default_signal_family() -> SignalFamily {
    SignalFamily::Tone
}
fn default_erb_width() -> f32 {
    1.0
}
fn default_probe_level() -> f32 {
    60.0
}
fn default_erb_apart() -> f32 {
    1.0
}
fn default_min_frequency() -> f32 {
    100.0
}
fn default_max_frequency() -> f32 {
    15000.0
}
fn default_calibration_level() -> f32 {
    94.0
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            signal_family: default_signal_family(),
            erb_width: default_erb_width(),
            mask_frequencies: Vec::new(),
            mask_levels: Vec::new(),
            probe_level_db_spl: default_probe_level(),
            probe_delay_secs: 0.0,
            erb_apart: default_erb_apart(),
            min_frequency_hz: default_min_frequency(),
            max_frequency_hz: default_max_frequency(),
            frequency_overrides: None,
            calibration_level_db_spl: default_calibration_level(),
        }
    }
}

impl SessionConfig {
    /// Check the cross-field rules that must hold before a session starts.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.mask_frequencies.len() != self.mask_levels.len() {
            return Err(SessionError::InvalidConfiguration(format!(
                "mask frequency and level lists differ in length ({} vs {})",
                self.mask_frequencies.len(),
                self.mask_levels.len(),
            )));
        }
        Ok(())
    }

    /// Build the probe frequency grid this configuration describes.
    pub fn grid(&self) -> Result<FrequencyGrid, SessionError> {
        let grid = match &self.frequency_overrides {
            Some(list) => FrequencyGrid::parse_list(list),
            None => FrequencyGrid::erb_spaced(
                self.min_frequency_hz,
                self.max_frequency_hz,
                self.erb_apart,
            ),
        };
        grid.map_err(|e| SessionError::InvalidConfiguration(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SessionError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SessionConfig::default().validate().unwrap();
    }

    #[test]
    fn mismatched_mask_lists_fail_validation() {
        let config = SessionConfig {
            mask_frequencies: vec![500.0, 1000.0],
            mask_levels: vec![80.0],
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn overrides_take_precedence_over_stepping() {
        let config = SessionConfig {
            frequency_overrides: Some("750,250".to_string()),
            erb_apart: -1.0, // would fail the stepping rule
            ..SessionConfig::default()
        };
        let grid = config.grid().unwrap();
        assert_eq!(grid.frequencies(), &[750.0, 250.0]);
    }

    #[test]
    fn non_positive_step_without_overrides_is_invalid() {
        let config = SessionConfig { erb_apart: 0.0, ..SessionConfig::default() };
        assert!(matches!(
            config.grid(),
            Err(SessionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn toml_round_trip_with_defaults() {
        let config = SessionConfig::from_toml(
            r#"
            mask_frequencies = [1000.0]
            mask_levels = [80.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.mask_frequencies, vec![1000.0]);
        assert_eq!(config.probe_level_db_spl, 60.0);
        assert_eq!(config.signal_family, equiloud_core::SignalFamily::Tone);
    }

    #[test]
    fn load_reports_missing_file_path() {
        let err = SessionConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
