//! Probe frequency grids spaced on the ERB scale.
//!
//! A session sweeps the probe tone across a sequence of center
//! frequencies. Stepping by a fraction of the local critical bandwidth
//! gives perceptually even coverage; an explicit override list bypasses
//! the stepping rule entirely (used to re-measure specific points).

use crate::error::CoreError;
use crate::math::erb_hz;

/// An ordered, strictly increasing sequence of probe frequencies in Hz.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    frequencies: Vec<f32>,
}

impl FrequencyGrid {
    /// Build a grid covering `[min_hz, max_hz)` stepped by `erb_apart`
    /// local bandwidths.
    ///
    /// Starts at `min_hz`; each successive value is
    /// `prev + erb(prev) * erb_apart`; stops before reaching `max_hz`.
    ///
    /// # Errors
    ///
    /// [`CoreError::NonPositiveStep`] if `erb_apart <= 0` (the walk would
    /// never terminate), [`CoreError::EmptyRange`] if `min_hz` is not
    /// below `max_hz` or not positive.
    pub fn erb_spaced(min_hz: f32, max_hz: f32, erb_apart: f32) -> Result<Self, CoreError> {
        if erb_apart <= 0.0 {
            return Err(CoreError::NonPositiveStep(erb_apart));
        }
        if !(min_hz > 0.0 && min_hz < max_hz) {
            return Err(CoreError::EmptyRange { min: min_hz, max: max_hz });
        }

        let mut frequencies = Vec::new();
        let mut f = min_hz;
        while f < max_hz {
            frequencies.push(f);
            f += erb_hz(f) * erb_apart;
        }
        Ok(Self { frequencies })
    }

    /// Build a grid from an explicit list of frequencies, order preserved.
    pub fn from_list(frequencies: impl Into<Vec<f32>>) -> Self {
        Self { frequencies: frequencies.into() }
    }

    /// Parse a comma-separated override list, e.g. `"500,1000,2000"`.
    ///
    /// # Errors
    ///
    /// [`CoreError::ParseFrequency`] for any entry that is not a number,
    /// [`CoreError::EmptyRange`] if the list is empty.
    pub fn parse_list(list: &str) -> Result<Self, CoreError> {
        let mut frequencies = Vec::new();
        for entry in list.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let f: f32 = entry
                .parse()
                .map_err(|_| CoreError::ParseFrequency(entry.to_string()))?;
            frequencies.push(f);
        }
        if frequencies.is_empty() {
            return Err(CoreError::EmptyRange { min: 0.0, max: 0.0 });
        }
        Ok(Self { frequencies })
    }

    /// The grid frequencies in sweep order.
    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    /// Number of trials this grid will produce.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the grid holds no frequencies.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Iterate over the grid frequencies.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.frequencies.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_element_is_min() {
        let grid = FrequencyGrid::erb_spaced(100.0, 8000.0, 1.0).unwrap();
        assert_eq!(grid.frequencies()[0], 100.0);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        assert!(matches!(
            FrequencyGrid::erb_spaced(100.0, 8000.0, 0.0),
            Err(CoreError::NonPositiveStep(_))
        ));
        assert!(matches!(
            FrequencyGrid::erb_spaced(100.0, 8000.0, -1.0),
            Err(CoreError::NonPositiveStep(_))
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            FrequencyGrid::erb_spaced(8000.0, 100.0, 1.0),
            Err(CoreError::EmptyRange { .. })
        ));
    }

    #[test]
    fn narrow_range_still_yields_one_frequency() {
        let grid = FrequencyGrid::erb_spaced(1000.0, 1001.0, 4.0).unwrap();
        assert_eq!(grid.frequencies(), &[1000.0]);
    }

    #[test]
    fn override_list_is_verbatim() {
        let grid = FrequencyGrid::parse_list("2000, 500,1000").unwrap();
        // Order preserved even though it is not increasing.
        assert_eq!(grid.frequencies(), &[2000.0, 500.0, 1000.0]);
    }

    #[test]
    fn override_list_rejects_garbage() {
        assert!(matches!(
            FrequencyGrid::parse_list("500,abc"),
            Err(CoreError::ParseFrequency(_))
        ));
    }

    #[test]
    fn empty_override_list_is_rejected() {
        assert!(FrequencyGrid::parse_list("").is_err());
        assert!(FrequencyGrid::parse_list(" , ,").is_err());
    }

    proptest! {
        #[test]
        fn grid_is_strictly_increasing_within_range(
            min in 20.0f32..2000.0,
            span in 10.0f32..18000.0,
            erb_apart in 0.05f32..8.0,
        ) {
            let max = min + span;
            let grid = FrequencyGrid::erb_spaced(min, max, erb_apart).unwrap();
            prop_assert!(!grid.is_empty());
            for window in grid.frequencies().windows(2) {
                prop_assert!(window[1] > window[0]);
            }
            for &f in grid.frequencies() {
                prop_assert!(f >= min && f < max);
            }
        }
    }
}
