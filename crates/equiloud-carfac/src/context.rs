//! The analysis adapter: one model instance plus its output matrices.

use crate::error::CarfacError;
use crate::model::CarfacModel;

/// Seconds of audio per analysis window, as a divisor of the sample rate.
/// One tenth of a second also puts content below ~10 Hz outside the
/// window's resolution, which the model does not represent anyway.
const WINDOW_DIVISOR: u32 = 10;

/// An owning handle over one cochlear model and its response matrices.
///
/// A context is scoped to the sample rate it was created for; analyzing
/// audio at another rate requires a new context. Each [`CarfacContext::run`]
/// resets the model and overwrites both matrices, so runs are independent
/// and the context can be reused across many segments.
///
/// The handle is move-only (not `Clone`); dropping it releases the model
/// and buffers. [`CarfacContext::destroy`] makes the release explicit at
/// call sites that want the lifetime visible.
#[derive(Debug)]
pub struct CarfacContext {
    model: CarfacModel,
    sample_rate: u32,
    num_samples: usize,
    num_channels: usize,
    bm: Vec<f32>,
    nap: Vec<f32>,
}

fn allocate_matrix(len: usize) -> Result<Vec<f32>, CarfacError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| CarfacError::ResourceExhaustion { bytes: len * size_of::<f32>() })?;
    buf.resize(len, 0.0);
    Ok(buf)
}

impl CarfacContext {
    /// Create a context for a sample rate, using default parameter sets.
    ///
    /// The analysis window is `sample_rate / 10` samples. Channel count
    /// and pole frequencies follow from the sample rate.
    ///
    /// # Errors
    ///
    /// [`CarfacError::ResourceExhaustion`] if the output matrices cannot
    /// be allocated.
    pub fn create(sample_rate: u32) -> Result<Self, CarfacError> {
        let model = CarfacModel::with_defaults(sample_rate as f32);
        let num_samples = (sample_rate / WINDOW_DIVISOR) as usize;
        let num_channels = model.num_channels();
        let len = num_samples * num_channels;
        Ok(Self {
            model,
            sample_rate,
            num_samples,
            num_channels,
            bm: allocate_matrix(len)?,
            nap: allocate_matrix(len)?,
        })
    }

    /// Sample rate this context is scoped to.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per analysis window.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Cascade channel count.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Channel center frequencies, highest first.
    pub fn pole_frequencies(&self) -> &[f32] {
        self.model.pole_frequencies()
    }

    /// Analyze one window of mono samples.
    ///
    /// Resets all model state first, so the run is independent of any
    /// previous one, then overwrites both response matrices.
    ///
    /// # Errors
    ///
    /// [`CarfacError::BufferSizeMismatch`] unless
    /// `input.len() == num_samples()`.
    pub fn run(&mut self, input: &[f32]) -> Result<(), CarfacError> {
        if input.len() != self.num_samples {
            return Err(CarfacError::BufferSizeMismatch {
                expected: self.num_samples,
                actual: input.len(),
            });
        }
        self.model.reset();
        self.model.process(input, &mut self.bm, &mut self.nap);
        Ok(())
    }

    /// Copy the latest run's basilar-membrane matrix into `out`.
    ///
    /// Layout is row-major by sample: `out[sample * num_channels + ch]`.
    ///
    /// # Errors
    ///
    /// [`CarfacError::BufferSizeMismatch`] unless
    /// `out.len() == num_samples() * num_channels()`; `out` is untouched
    /// on error.
    pub fn bm_into(&self, out: &mut [f32]) -> Result<(), CarfacError> {
        Self::copy_matrix(&self.bm, out)
    }

    /// Copy the latest run's neural-activity-pattern matrix into `out`.
    ///
    /// Same layout and size contract as [`CarfacContext::bm_into`].
    pub fn nap_into(&self, out: &mut [f32]) -> Result<(), CarfacError> {
        Self::copy_matrix(&self.nap, out)
    }

    fn copy_matrix(src: &[f32], out: &mut [f32]) -> Result<(), CarfacError> {
        if out.len() != src.len() {
            return Err(CarfacError::BufferSizeMismatch {
                expected: src.len(),
                actual: out.len(),
            });
        }
        out.copy_from_slice(src);
        Ok(())
    }

    /// Release the model and its buffers.
    ///
    /// Equivalent to dropping the context; provided so call sites can
    /// make the end of the native-resource lifetime explicit. Ownership
    /// rules make use-after-destroy unrepresentable.
    pub fn destroy(self) {
        drop(self);
    }
}
