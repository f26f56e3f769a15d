//! Second-order IIR sections for band-limiting noise components.
//!
//! Coefficients follow the RBJ Audio EQ Cookbook; the only consumer here
//! is the 4th-order Butterworth bandpass used for noise bands, built from
//! cascaded high-pass and low-pass sections.

use core::f32::consts::PI;

/// Direct Form I biquad.
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Build from unnormalized cookbook coefficients.
    pub fn from_coefficients(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let inv = 1.0 / a0;
        Self {
            b0: b0 * inv,
            b1: b1 * inv,
            b2: b2 * inv,
            a1: a1 * inv,
            a2: a2 * inv,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }

    /// Clear the delay lines.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

fn lowpass(frequency: f32, q: f32, sample_rate: f32) -> Biquad {
    let omega = 2.0 * PI * frequency / sample_rate;
    let (sin_w, cos_w) = omega.sin_cos();
    let alpha = sin_w / (2.0 * q);
    Biquad::from_coefficients(
        (1.0 - cos_w) / 2.0,
        1.0 - cos_w,
        (1.0 - cos_w) / 2.0,
        1.0 + alpha,
        -2.0 * cos_w,
        1.0 - alpha,
    )
}

fn highpass(frequency: f32, q: f32, sample_rate: f32) -> Biquad {
    let omega = 2.0 * PI * frequency / sample_rate;
    let (sin_w, cos_w) = omega.sin_cos();
    let alpha = sin_w / (2.0 * q);
    Biquad::from_coefficients(
        (1.0 + cos_w) / 2.0,
        -(1.0 + cos_w),
        (1.0 + cos_w) / 2.0,
        1.0 + alpha,
        -2.0 * cos_w,
        1.0 - alpha,
    )
}

/// A 4th-order Butterworth bandpass: two high-pass sections at the lower
/// edge cascaded with two low-pass sections at the upper edge.
#[derive(Debug, Clone, Copy)]
pub struct Bandpass4 {
    sections: [Biquad; 4],
}

/// Q values of the two cascaded sections of a 4th-order Butterworth.
const BUTTERWORTH4_Q: [f32; 2] = [0.541, 1.307];

/// Design a 4th-order Butterworth bandpass for `[low_hz, high_hz]`.
///
/// Edges are clamped to (0, Nyquist) so degenerate bands stay stable.
pub fn bandpass_butterworth4(low_hz: f32, high_hz: f32, sample_rate: f32) -> Bandpass4 {
    let nyquist = sample_rate / 2.0;
    let low = low_hz.clamp(1.0, nyquist - 1.0);
    let high = high_hz.clamp(low, nyquist - 1.0);
    Bandpass4 {
        sections: [
            highpass(low, BUTTERWORTH4_Q[0], sample_rate),
            highpass(low, BUTTERWORTH4_Q[1], sample_rate),
            lowpass(high, BUTTERWORTH4_Q[0], sample_rate),
            lowpass(high, BUTTERWORTH4_Q[1], sample_rate),
        ],
    }
}

impl Bandpass4 {
    /// Process one sample through all four sections.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut sample = input;
        for section in &mut self.sections {
            sample = section.process(sample);
        }
        sample
    }

    /// Clear all section state.
    pub fn clear(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| (2.0 * PI * frequency * i as f32 / sample_rate).sin())
            .collect()
    }

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|v| v * v).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn passband_passes_and_stopband_attenuates() {
        let sample_rate = 48000.0;
        let mut bp = bandpass_butterworth4(800.0, 1200.0, sample_rate);

        let settle = 4800;
        let inside = sine(1000.0, sample_rate, 48000);
        let out_inside: Vec<f32> = inside.iter().map(|&s| bp.process(s)).collect();
        let pass_ratio = rms(&out_inside[settle..]) / rms(&inside[settle..]);
        assert!(pass_ratio > 0.5, "passband ratio {pass_ratio}");

        bp.clear();
        let outside = sine(4000.0, sample_rate, 48000);
        let out_outside: Vec<f32> = outside.iter().map(|&s| bp.process(s)).collect();
        let stop_ratio = rms(&out_outside[settle..]) / rms(&outside[settle..]);
        assert!(stop_ratio < 0.1, "stopband ratio {stop_ratio}");
    }

    #[test]
    fn degenerate_band_stays_finite() {
        let mut bp = bandpass_butterworth4(30000.0, 40000.0, 48000.0);
        for i in 0..1000 {
            let out = bp.process(if i == 0 { 1.0 } else { 0.0 });
            assert!(out.is_finite());
        }
    }
}
