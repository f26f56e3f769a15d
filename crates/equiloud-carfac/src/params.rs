//! Model parameter sets with standard defaults.

use core::f32::consts::PI;

/// Cascade (basilar membrane) stage parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarParams {
    /// Damping ratio at full AGC attenuation.
    pub max_zeta: f32,
    /// Damping ratio at zero AGC attenuation (most sensitive).
    pub min_zeta: f32,
    /// Pole angle of the highest-frequency channel, as a fraction of pi.
    pub first_pole_theta: f32,
    /// Ratio of each stage's zero frequency to its pole frequency.
    pub zero_ratio: f32,
    /// Cubic compression of the damping term toward Nyquist.
    pub high_f_damping_compression: f32,
    /// Channel spacing in local ERB units.
    pub erb_per_step: f32,
    /// Lowest pole frequency; channel placement stops here.
    pub min_pole_hz: f32,
    /// Break frequency of the ERB formula used for pole placement.
    pub erb_break_freq: f32,
    /// Quality factor of the ERB formula used for pole placement.
    pub erb_q: f32,
}

impl Default for CarParams {
    fn default() -> Self {
        Self {
            max_zeta: 0.35,
            min_zeta: 0.10,
            first_pole_theta: 0.85 * PI,
            zero_ratio: core::f32::consts::SQRT_2,
            high_f_damping_compression: 0.5,
            erb_per_step: 0.5,
            min_pole_hz: 30.0,
            erb_break_freq: 165.3,
            // Glasberg & Moore: ERB = (break + f) / q with
            // q = 1000 / (24.7 * 4.37).
            erb_q: 1000.0 / (24.7 * 4.37),
        }
    }
}

/// Inner-hair-cell stage parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IhcParams {
    /// Input offset of the detect nonlinearity; sets the resting point.
    pub detect_offset: f32,
    /// Time constant of the two-stage output smoothing filter.
    pub tau_lpf_secs: f32,
}

impl Default for IhcParams {
    fn default() -> Self {
        Self {
            detect_offset: 0.175,
            tau_lpf_secs: 80e-6,
        }
    }
}

/// Automatic-gain-control loop parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgcParams {
    /// Time constant of the per-channel activity smoother.
    pub tau_secs: f32,
    /// Samples between feedback updates.
    pub decimation: usize,
    /// How strongly smoothed activity removes undamping.
    pub feedback_strength: f32,
}

impl Default for AgcParams {
    fn default() -> Self {
        Self {
            tau_secs: 0.01,
            decimation: 8,
            feedback_strength: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_damping_ordering() {
        let p = CarParams::default();
        assert!(p.min_zeta < p.max_zeta);
        assert!(p.first_pole_theta < PI);
    }

    #[test]
    fn default_erb_q_matches_glasberg_moore() {
        let p = CarParams::default();
        // ERB(1000) from the pole-placement formula; within ~5% of the
        // 24.7 * (4.37 + 1) = 132.6 Hz polynomial form.
        let erb_1k = (p.erb_break_freq + 1000.0) / p.erb_q;
        assert!((erb_1k - 125.8).abs() < 1.0, "got {erb_1k}");
        assert!((erb_1k - 132.6).abs() / 132.6 < 0.06);
    }
}
