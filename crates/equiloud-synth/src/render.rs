//! Specification-to-buffer rendering.

use core::f32::consts::PI;

use equiloud_core::{SignalComponent, SignalSpecification, db_to_linear};

use crate::biquad::bandpass_butterworth4;
use crate::noise::NoiseSource;

/// Render a specification into a mono buffer.
///
/// Each component starts after its onset delay, fades in over its ramp
/// with a raised-cosine shape, and runs to the end of the buffer.
/// Components are summed without normalization; levels are dBFS, so a
/// 0 dBFS tone has peak amplitude 1.0 and the caller is responsible for
/// keeping the mix inside full scale.
///
/// Noise bands are RMS-matched to a sine of the same dBFS level, so a
/// tone and a noise band at equal level carry equal power.
pub fn render(spec: &SignalSpecification, sample_rate: u32, duration_secs: f32) -> Vec<f32> {
    let sample_rate_f = sample_rate as f32;
    let num_samples = (duration_secs * sample_rate_f).round() as usize;
    let mut mix = vec![0.0f32; num_samples];

    for component in &spec.components {
        match *component {
            SignalComponent::Tone { frequency_hz, level_dbfs, onset } => {
                let amplitude = db_to_linear(level_dbfs);
                let start = (onset.delay_secs * sample_rate_f).round() as usize;
                let ramp_samples = (onset.ramp_secs * sample_rate_f).round() as usize;
                let mut phase = 0.0f32;
                let phase_inc = 2.0 * PI * frequency_hz / sample_rate_f;
                for (i, slot) in mix.iter_mut().enumerate().skip(start) {
                    let env = ramp_envelope(i - start, ramp_samples);
                    *slot += amplitude * env * phase.sin();
                    phase += phase_inc;
                    if phase > 2.0 * PI {
                        phase -= 2.0 * PI;
                    }
                }
            }
            SignalComponent::BandNoise { low_hz, high_hz, level_dbfs, onset } => {
                let start = (onset.delay_secs * sample_rate_f).round() as usize;
                if start >= num_samples {
                    continue;
                }
                let ramp_samples = (onset.ramp_secs * sample_rate_f).round() as usize;

                // Shape white noise, then normalize the active region so a
                // band at level L carries the power of a sine at level L.
                let mut source = NoiseSource::default();
                let mut filter = bandpass_butterworth4(low_hz, high_hz, sample_rate_f);
                let band: Vec<f32> = (start..num_samples)
                    .map(|_| filter.process(source.next_sample()))
                    .collect();
                let rms = (band.iter().map(|v| v * v).sum::<f32>() / band.len() as f32).sqrt();
                let target_rms = db_to_linear(level_dbfs) / core::f32::consts::SQRT_2;
                let scale = if rms > 0.0 { target_rms / rms } else { 0.0 };

                for (offset, &sample) in band.iter().enumerate() {
                    let env = ramp_envelope(offset, ramp_samples);
                    mix[start + offset] += scale * env * sample;
                }
            }
        }
    }

    mix
}

/// Raised-cosine fade-in, 0 at the component start, 1 after the ramp.
#[inline]
fn ramp_envelope(samples_since_start: usize, ramp_samples: usize) -> f32 {
    if samples_since_start >= ramp_samples || ramp_samples == 0 {
        1.0
    } else {
        let t = samples_since_start as f32 / ramp_samples as f32;
        0.5 * (1.0 - (PI * t).cos())
    }
}
