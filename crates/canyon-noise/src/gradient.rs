//! Continuous 2D gradient noise sources sampled by the fractal generator.

use noise::{NoiseFn, Perlin};

/// A continuous 2D noise function with output in `[0, 1]`.
pub trait GradientNoise {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Classic Perlin noise over a fixed permutation table.
///
/// The permutation is never reseeded: decorrelation between fields comes
/// from the per-octave sampling offsets, so every field shares one lattice.
#[derive(Clone, Debug)]
pub struct PerlinSource {
    perlin: Perlin,
}

impl PerlinSource {
    /// Permutation seed used by [`Default`].
    pub const DEFAULT_PERMUTATION: u32 = 0;

    pub fn new(permutation_seed: u32) -> Self {
        Self {
            perlin: Perlin::new(permutation_seed),
        }
    }
}

impl Default for PerlinSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERMUTATION)
    }
}

impl GradientNoise for PerlinSource {
    fn sample(&self, x: f64, y: f64) -> f64 {
        // Perlin yields roughly [-1, 1]; remap and clip the rare overshoot.
        ((self.perlin.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
