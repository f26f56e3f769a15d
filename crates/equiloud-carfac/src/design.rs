//! Channel placement and per-channel filter coefficient design.

use core::f32::consts::PI;

use crate::params::CarParams;

/// ERB form used for pole placement: `(break + f) / q`.
#[inline]
pub fn placement_erb_hz(frequency_hz: f32, params: &CarParams) -> f32 {
    (params.erb_break_freq + frequency_hz) / params.erb_q
}

/// Place channel center (pole) frequencies for a sample rate.
///
/// Walks down from `first_pole_theta * fs / 2pi`, stepping by
/// `erb_per_step` local bandwidths, until `min_pole_hz`. Highest
/// frequency first, matching cascade processing order.
pub fn pole_frequencies(sample_rate: f32, params: &CarParams) -> Vec<f32> {
    let mut freqs = Vec::new();
    let mut pole_hz = params.first_pole_theta * sample_rate / (2.0 * PI);
    while pole_hz > params.min_pole_hz {
        freqs.push(pole_hz);
        pole_hz -= params.erb_per_step * placement_erb_hz(pole_hz, params);
    }
    freqs
}

/// Fixed coefficients of one cascade stage.
///
/// The stage is a two-pole two-zero resonator; the pole radius is
/// `r1 + dr * b` where `b` in [0, 1] is the AGC undamping, so `r1`
/// corresponds to maximum damping and `r1 + dr` to the most sensitive
/// (least damped) configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageCoeffs {
    /// cos(theta) of the pole angle.
    pub a0: f32,
    /// sin(theta) of the pole angle.
    pub c0: f32,
    /// Pole radius at maximum damping.
    pub r1: f32,
    /// Radius headroom released by full undamping.
    pub dr: f32,
    /// Zero-placement feed coefficient.
    pub h: f32,
}

impl StageCoeffs {
    /// Design one stage for a pole frequency at a sample rate.
    pub fn design(pole_hz: f32, sample_rate: f32, params: &CarParams) -> Self {
        let theta = 2.0 * PI * pole_hz / sample_rate;
        let a0 = theta.cos();
        let c0 = theta.sin();

        // Damping term, compressed toward Nyquist so high channels stay
        // stable with wide relative bandwidths.
        let x = theta / PI;
        let zr = PI * (x - params.high_f_damping_compression * x * x * x);
        let r1 = 1.0 - zr * params.max_zeta;
        let dr = zr * (params.max_zeta - params.min_zeta);

        // Zeros a fixed ratio above the pole.
        let h = c0 * (params.zero_ratio * params.zero_ratio - 1.0);

        Self { a0, c0, r1, dr, h }
    }

    /// DC-gain-normalizing output coefficient for a given pole radius.
    #[inline]
    pub fn stage_gain(&self, r: f32) -> f32 {
        let common = 1.0 - 2.0 * r * self.a0 + r * r;
        common / (common + self.h * r * self.c0)
    }
}
