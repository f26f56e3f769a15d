//! Perceptual and level math shared across the workspace.

/// SPL equivalence of a full-scale digital sine.
///
/// A 0 dBFS sine is defined to reproduce at 100 dB SPL on a calibrated
/// playback chain; all experiment levels are offset by this constant when
/// a specification is built.
pub const FULL_SCALE_SINE_DB_SPL: f32 = 100.0;

/// Equivalent Rectangular Bandwidth at a frequency.
///
/// Glasberg & Moore approximation of the auditory critical bandwidth:
/// `ERB(f) = 24.7 * (4.37 * f / 1000 + 1)`.
///
/// # Example
/// ```rust
/// use equiloud_core::erb_hz;
///
/// assert!((erb_hz(1000.0) - 132.6).abs() < 0.1);
/// ```
#[inline]
pub fn erb_hz(frequency_hz: f32) -> f32 {
    24.7 * (4.37 * frequency_hz / 1000.0 + 1.0)
}

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use equiloud_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    (db * FACTOR).exp()
}

/// Convert linear gain to decibels.
///
/// Input is floored at 1e-10 to keep the result finite.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    linear.max(1e-10).ln() * FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erb_at_reference_points() {
        // ERB(0) is the 24.7 Hz floor of the approximation.
        assert!((erb_hz(0.0) - 24.7).abs() < 1e-4);
        // ERB grows roughly linearly with frequency above ~500 Hz.
        assert!(erb_hz(4000.0) > 3.0 * erb_hz(1000.0));
    }

    #[test]
    fn db_round_trip() {
        for db in [-60.0, -6.0, 0.0, 6.0, 20.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 1e-3, "{db} -> {back}");
        }
    }

    #[test]
    fn linear_to_db_is_finite_at_zero() {
        assert!(linear_to_db(0.0).is_finite());
    }
}
