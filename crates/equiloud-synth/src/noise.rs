//! Deterministic white noise for band-limited maskers.

/// Linear-congruential noise source with a fixed default seed.
///
/// Rendering must be reproducible so that the same specification text
/// always maps to the same asset; a seeded LCG is plenty for shaping
/// into masker noise bands.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    state: u32,
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new(0x12345678)
    }
}

impl NoiseSource {
    /// Create a source from an explicit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next white-noise sample, uniform in [-1, 1).
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        // Numerical Recipes LCG constants.
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.state >> 8) as f32 / 8388608.0 - 1.0
    }
}
