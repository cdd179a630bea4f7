//! Parameters for a single noise field request.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Substitute used when a caller asks for a non-positive scale.
pub const MIN_SCALE: f32 = 1e-4;

/// Everything needed to synthesize one [`NoiseField`](crate::NoiseField).
///
/// The generator does not clamp `persistence` or `lacunarity`; callers that
/// expose these to users are expected to validate them first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Field width in cells.
    pub width: usize,
    /// Field height in cells.
    pub height: usize,
    /// Seed for the octave offset stream.
    pub seed: i32,
    /// Spatial scale: larger values zoom into the noise. Non-positive values
    /// are replaced with [`MIN_SCALE`].
    pub scale: f32,
    /// Number of octaves summed per cell. Zero yields a flat field.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f32,
    /// Global offset added to every octave's sampling offset.
    pub offset: Vec2,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            width: 513,
            height: 513,
            seed: 0,
            scale: 200.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: Vec2::ZERO,
        }
    }
}

impl NoiseParams {
    /// Square field of `size` x `size` cells with default fractal settings.
    pub fn square(size: usize) -> Self {
        Self {
            width: size,
            height: size,
            ..Default::default()
        }
    }

    /// Replace the field dimensions.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the seed for the octave offset stream.
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the sampling scale. Non-positive values are guarded at sampling time.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the number of summed octaves.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Replace the per-octave amplitude multiplier.
    pub fn with_persistence(mut self, persistence: f32) -> Self {
        self.persistence = persistence;
        self
    }

    /// Replace the per-octave frequency multiplier.
    pub fn with_lacunarity(mut self, lacunarity: f32) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Replace the offset added to every octave's sample position.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// The scale actually used for sampling.
    ///
    /// NaN is treated like a non-positive scale.
    pub fn effective_scale(&self) -> f32 {
        if self.scale > 0.0 { self.scale } else { MIN_SCALE }
    }

    /// Number of cells in the field.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}
