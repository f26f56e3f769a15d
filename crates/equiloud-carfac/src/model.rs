//! The cochlear filter cascade, IHC stage, and AGC loop.

use crate::design::{StageCoeffs, pole_frequencies};
use crate::params::{AgcParams, CarParams, IhcParams};

/// Per-channel resonator state.
#[derive(Debug, Clone, Copy, Default)]
struct CarState {
    z1: f32,
    z2: f32,
}

/// Per-channel IHC smoothing state.
#[derive(Debug, Clone, Copy)]
struct IhcState {
    lpf1: f32,
    lpf2: f32,
}

/// A complete single-ear cochlear model.
///
/// The cascade runs highest channel first; each stage's output feeds the
/// next stage's input, so low-frequency channels see the residue of the
/// high-frequency filtering, as in the traveling-wave picture. The IHC
/// stage rectifies and smooths each channel's displacement into a neural
/// activity value; the AGC loop feeds smoothed activity back into stage
/// damping at a fixed decimation interval.
///
/// All state is reset by [`CarfacModel::reset`], so consecutive
/// [`CarfacModel::process`] calls are independent analyses, not a
/// continuation.
#[derive(Debug)]
pub struct CarfacModel {
    pole_freqs: Vec<f32>,
    coeffs: Vec<StageCoeffs>,
    car: Vec<CarState>,
    ihc: Vec<IhcState>,
    /// Smoothed per-channel activity driving the AGC feedback.
    agc: Vec<f32>,
    /// Current undamping per channel, in [0, 1].
    undamping: Vec<f32>,
    /// Current per-stage output gain, tracks undamping.
    gains: Vec<f32>,

    ihc_lpf_coeff: f32,
    ihc_offset: f32,
    ihc_rest: f32,
    agc_coeff: f32,
    agc_decimation: usize,
    agc_strength: f32,
}

/// Saturating detect nonlinearity of the IHC stage.
#[inline]
fn detect(v: f32) -> f32 {
    if v <= 0.0 {
        0.0
    } else {
        let v2 = v * v;
        let v3 = v2 * v;
        v3 / (v3 + v2 + 0.1)
    }
}

impl CarfacModel {
    /// Build a model for a sample rate from explicit parameter sets.
    pub fn new(
        sample_rate: f32,
        car_params: &CarParams,
        ihc_params: &IhcParams,
        agc_params: &AgcParams,
    ) -> Self {
        let pole_freqs = pole_frequencies(sample_rate, car_params);
        let coeffs: Vec<StageCoeffs> = pole_freqs
            .iter()
            .map(|&pole| StageCoeffs::design(pole, sample_rate, car_params))
            .collect();
        let n = coeffs.len();

        let ihc_offset = ihc_params.detect_offset;
        let ihc_rest = detect(ihc_offset);
        let ihc_lpf_coeff = 1.0 - (-1.0 / (ihc_params.tau_lpf_secs * sample_rate)).exp();
        let agc_coeff = 1.0
            - (-(agc_params.decimation as f32) / (agc_params.tau_secs * sample_rate)).exp();

        let mut model = Self {
            pole_freqs,
            coeffs,
            car: vec![CarState::default(); n],
            ihc: vec![IhcState { lpf1: ihc_rest, lpf2: ihc_rest }; n],
            agc: vec![0.0; n],
            undamping: vec![1.0; n],
            gains: vec![0.0; n],
            ihc_lpf_coeff,
            ihc_offset,
            ihc_rest,
            agc_coeff,
            agc_decimation: agc_params.decimation.max(1),
            agc_strength: agc_params.feedback_strength,
        };
        model.reset();
        model
    }

    /// Build a model with default parameter sets.
    pub fn with_defaults(sample_rate: f32) -> Self {
        Self::new(
            sample_rate,
            &CarParams::default(),
            &IhcParams::default(),
            &AgcParams::default(),
        )
    }

    /// Number of cascade channels.
    pub fn num_channels(&self) -> usize {
        self.coeffs.len()
    }

    /// Channel center frequencies, highest first.
    pub fn pole_frequencies(&self) -> &[f32] {
        &self.pole_freqs
    }

    /// Return all state to the resting configuration.
    ///
    /// Resonators are zeroed, IHC smoothers sit at the detect rest level,
    /// and the AGC releases to full undamping.
    pub fn reset(&mut self) {
        for s in &mut self.car {
            *s = CarState::default();
        }
        for s in &mut self.ihc {
            s.lpf1 = self.ihc_rest;
            s.lpf2 = self.ihc_rest;
        }
        self.agc.fill(0.0);
        self.undamping.fill(1.0);
        self.refresh_gains();
    }

    fn refresh_gains(&mut self) {
        for (ch, c) in self.coeffs.iter().enumerate() {
            let r = c.r1 + c.dr * self.undamping[ch];
            self.gains[ch] = c.stage_gain(r);
        }
    }

    /// Process a segment, writing one row per sample into `bm` and `nap`.
    ///
    /// Both output slices must hold `input.len() * num_channels()` values;
    /// layout is row-major by sample. State is carried across samples but
    /// NOT reset first; callers wanting an independent analysis call
    /// [`CarfacModel::reset`] beforehand (the context adapter does).
    pub fn process(&mut self, input: &[f32], bm: &mut [f32], nap: &mut [f32]) {
        let n = self.num_channels();
        debug_assert_eq!(bm.len(), input.len() * n);
        debug_assert_eq!(nap.len(), input.len() * n);

        for (i, &sample) in input.iter().enumerate() {
            let row = i * n;
            let mut x = sample;
            for ch in 0..n {
                let c = self.coeffs[ch];
                let r = c.r1 + c.dr * self.undamping[ch];
                let s = self.car[ch];

                let z1 = r * (c.a0 * s.z1 - c.c0 * s.z2) + x;
                let z2 = r * (c.c0 * s.z1 + c.a0 * s.z2);
                let y = self.gains[ch] * (x + c.h * z2);
                self.car[ch] = CarState { z1, z2 };
                bm[row + ch] = y;

                let u = detect(y + self.ihc_offset);
                let ihc = &mut self.ihc[ch];
                ihc.lpf1 += self.ihc_lpf_coeff * (u - ihc.lpf1);
                ihc.lpf2 += self.ihc_lpf_coeff * (ihc.lpf1 - ihc.lpf2);
                nap[row + ch] = ihc.lpf2 - self.ihc_rest;

                x = y;
            }

            if (i + 1) % self.agc_decimation == 0 {
                self.update_agc(&nap[row..row + n]);
            }
        }
    }

    /// Fold recent activity into the damping feedback.
    fn update_agc(&mut self, nap_row: &[f32]) {
        for (ch, &activity) in nap_row.iter().enumerate() {
            let agc = &mut self.agc[ch];
            *agc += self.agc_coeff * (activity.max(0.0) - *agc);
            self.undamping[ch] = (1.0 - self.agc_strength * *agc).clamp(0.0, 1.0);
        }
        self.refresh_gains();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    fn sine(frequency: f32, sample_rate: f32, num_samples: usize, amplitude: f32) -> Vec<f32> {
        (0..num_samples)
            .map(|i| amplitude * (2.0 * PI * frequency * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn zero_input_yields_zero_outputs() {
        let mut model = CarfacModel::with_defaults(48000.0);
        let n = model.num_channels();
        let input = vec![0.0f32; 480];
        let mut bm = vec![1.0f32; 480 * n];
        let mut nap = vec![1.0f32; 480 * n];
        model.reset();
        model.process(&input, &mut bm, &mut nap);
        assert!(bm.iter().all(|&v| v == 0.0));
        assert!(nap.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn outputs_are_finite_for_loud_input() {
        let mut model = CarfacModel::with_defaults(48000.0);
        let n = model.num_channels();
        let input = sine(1000.0, 48000.0, 4800, 1.0);
        let mut bm = vec![0.0f32; 4800 * n];
        let mut nap = vec![0.0f32; 4800 * n];
        model.reset();
        model.process(&input, &mut bm, &mut nap);
        assert!(bm.iter().all(|v| v.is_finite()));
        assert!(nap.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn tone_peaks_near_matching_channel() {
        let sample_rate = 48000.0;
        let mut model = CarfacModel::with_defaults(sample_rate);
        let n = model.num_channels();
        let num_samples = 4800;
        let input = sine(2000.0, sample_rate, num_samples, 0.1);
        let mut bm = vec![0.0f32; num_samples * n];
        let mut nap = vec![0.0f32; num_samples * n];
        model.reset();
        model.process(&input, &mut bm, &mut nap);

        // Energy per channel over the second half (past onset transients).
        let mut energy = vec![0.0f32; n];
        for i in num_samples / 2..num_samples {
            for ch in 0..n {
                let v = bm[i * n + ch];
                energy[ch] += v * v;
            }
        }
        let best = energy
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(ch, _)| ch)
            .unwrap();
        let best_freq = model.pole_frequencies()[best];
        // Within an octave of the stimulus; the cascade peak sits a bit
        // basal of the nominal pole frequency.
        assert!(
            (best_freq / 2000.0).log2().abs() < 1.0,
            "peak channel at {best_freq} Hz"
        );
    }

    #[test]
    fn reset_makes_runs_independent() {
        let sample_rate = 48000.0;
        let mut model = CarfacModel::with_defaults(sample_rate);
        let n = model.num_channels();
        let num_samples = 960;
        let input = sine(500.0, sample_rate, num_samples, 0.2);
        let mut bm_a = vec![0.0f32; num_samples * n];
        let mut nap_a = vec![0.0f32; num_samples * n];
        let mut bm_b = vec![0.0f32; num_samples * n];
        let mut nap_b = vec![0.0f32; num_samples * n];

        model.reset();
        model.process(&input, &mut bm_a, &mut nap_a);
        model.reset();
        model.process(&input, &mut bm_b, &mut nap_b);

        assert_eq!(bm_a, bm_b);
        assert_eq!(nap_a, nap_b);
    }

    #[test]
    fn louder_input_is_compressed_by_agc() {
        let sample_rate = 48000.0;
        let mut model = CarfacModel::with_defaults(sample_rate);
        let n = model.num_channels();
        let num_samples = 4800;
        let mut run = |amplitude: f32| {
            let input = sine(1000.0, sample_rate, num_samples, amplitude);
            let mut bm = vec![0.0f32; num_samples * n];
            let mut nap = vec![0.0f32; num_samples * n];
            model.reset();
            model.process(&input, &mut bm, &mut nap);
            nap.iter().map(|v| v.abs()).sum::<f32>()
        };
        let quiet = run(0.01);
        let loud = run(1.0);
        // 40 dB more input should produce far less than 40 dB more output.
        assert!(loud < quiet * 100.0 * 0.9, "quiet {quiet}, loud {loud}");
        assert!(loud > quiet, "response should still grow with level");
    }
}
