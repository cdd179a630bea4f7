//! Multi-octave fractal noise field synthesis.
//!
//! Each cell sums `octaves` samples of a gradient noise source, every octave
//! at a higher frequency (`lacunarity`) and lower amplitude (`persistence`)
//! than the last, then the whole field is normalized into `[0, 1]`.

use glam::DVec2;
use rand::Rng;

use crate::field::{NoiseField, RawField};
use crate::gradient::{GradientNoise, PerlinSource};
use crate::octaves::{octave_offsets, seeded_rng};
use crate::params::NoiseParams;

/// Generate a normalized field with the default Perlin source and offset stream.
pub fn generate(params: &NoiseParams) -> NoiseField {
    NoiseFieldGenerator::perlin().generate(params)
}

/// Synthesizes noise fields from a gradient noise source.
#[derive(Clone, Debug, Default)]
pub struct NoiseFieldGenerator<N = PerlinSource> {
    source: N,
}

impl NoiseFieldGenerator<PerlinSource> {
    /// Generator over the default Perlin lattice.
    pub fn perlin() -> Self {
        Self::new(PerlinSource::default())
    }
}

impl<N: GradientNoise> NoiseFieldGenerator<N> {
    pub fn new(source: N) -> Self {
        Self { source }
    }

    /// Generate a field, seeding the offset stream from `params.seed`.
    ///
    /// Identical parameters always produce a bit-identical field.
    pub fn generate(&self, params: &NoiseParams) -> NoiseField {
        self.generate_with_rng(params, &mut seeded_rng(params.seed))
    }

    /// Generate a field, drawing octave offsets from `rng`.
    ///
    /// `params.seed` is ignored; the stream decides the offsets.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, params: &NoiseParams, rng: &mut R) -> NoiseField {
        let offsets = octave_offsets(rng, params.octaves, params.offset);
        self.fractal_sum(params, &offsets).normalize()
    }

    /// Accumulate the un-normalized fractal sum for every cell.
    ///
    /// Sample coordinates are taken relative to the field center so resizing
    /// the field shifts the pattern instead of re-anchoring it at a corner.
    pub fn fractal_sum(&self, params: &NoiseParams, offsets: &[DVec2]) -> RawField {
        let scale = params.effective_scale() as f64;
        if params.scale != params.effective_scale() {
            tracing::debug!(requested = params.scale, used = scale, "noise scale clamped");
        }

        let persistence = params.persistence as f64;
        let lacunarity = params.lacunarity as f64;
        let half_width = params.width as f64 / 2.0;
        let half_height = params.height as f64 / 2.0;

        let mut values = Vec::with_capacity(params.cell_count());
        for y in 0..params.height {
            let dy = (y as f64 - half_height) / scale;
            for x in 0..params.width {
                let dx = (x as f64 - half_width) / scale;

                let mut amplitude = 1.0;
                let mut frequency = 1.0;
                let mut noise_height = 0.0;

                for offset in offsets {
                    let sample_x = dx * frequency + offset.x;
                    let sample_y = dy * frequency + offset.y;
                    let value = self.source.sample(sample_x, sample_y) * 2.0 - 1.0;
                    noise_height += value * amplitude;

                    amplitude *= persistence;
                    frequency *= lacunarity;
                }

                values.push(noise_height);
            }
        }

        RawField::new(params.width, params.height, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn small_params() -> NoiseParams {
        NoiseParams {
            width: 48,
            height: 40,
            seed: 42,
            scale: 25.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: Vec2::ZERO,
        }
    }

    #[test]
    fn test_same_params_bit_identical() {
        let a = generate(&small_params());
        let b = generate(&small_params());
        let bits_a: Vec<u32> = a.values().iter().map(|v| v.to_bits()).collect();
        let bits_b: Vec<u32> = b.values().iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(&small_params());
        let b = generate(&small_params().with_seed(43));
        assert_ne!(a, b);
    }

    #[test]
    fn test_output_dimensions_match_params() {
        let field = generate(&small_params());
        assert_eq!(field.dimensions(), (48, 40));
        assert_eq!(field.values().len(), 48 * 40);
    }

    #[test]
    fn test_normalized_bounds_hit_both_extremes() {
        for seed in [0, 1, 42, -17, 59_999] {
            let field = generate(&small_params().with_seed(seed));
            assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));
            assert!(field.values().contains(&0.0), "seed {seed} has no 0 cell");
            assert!(field.values().contains(&1.0), "seed {seed} has no 1 cell");
        }
    }

    #[test]
    fn test_zero_octaves_is_uniform_zero() {
        let field = generate(&small_params().with_octaves(0));
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_degenerate_scale_stays_finite() {
        for scale in [0.0, -10.0] {
            let field = generate(&small_params().with_scale(scale));
            assert!(
                field.values().iter().all(|v| v.is_finite()),
                "scale {scale} produced a non-finite cell"
            );
            assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_explicit_rng_matches_seeded_generate() {
        let generator = NoiseFieldGenerator::perlin();
        let params = small_params();
        let via_seed = generator.generate(&params);
        let via_rng = generator.generate_with_rng(&params, &mut seeded_rng(params.seed));
        assert_eq!(via_seed, via_rng);
    }

    #[test]
    fn test_global_offset_moves_pattern() {
        let a = generate(&small_params());
        let b = generate(&small_params().with_offset(Vec2::new(13.0, 0.0)));
        assert_ne!(a, b);
    }

    #[test]
    fn test_centering_shifts_without_distortion() {
        let generator = NoiseFieldGenerator::perlin();
        let offsets = octave_offsets(&mut seeded_rng(42), 4, Vec2::ZERO);

        for (narrow, wide) in [(64, 66), (65, 67)] {
            let a = generator.fractal_sum(&small_params().with_size(narrow, 40), &offsets);
            let b = generator.fractal_sum(&small_params().with_size(wide, 40), &offsets);

            // Half the width difference on each side: column x in `a` is column x + 1 in `b`.
            for y in 0..40 {
                for x in 0..narrow {
                    assert_eq!(a.get(x, y), b.get(x + 1, y), "mismatch at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_more_octaves_adds_detail() {
        let coarse = generate(&small_params().with_octaves(1).with_scale(40.0));
        let fine = generate(&small_params().with_octaves(6).with_scale(40.0));

        let roughness = |field: &NoiseField| -> f32 {
            let mut total = 0.0;
            for y in 0..field.height() {
                for x in 1..field.width() {
                    total += (field.get(x, y) - field.get(x - 1, y)).abs();
                }
            }
            total
        };

        assert!(roughness(&fine) > roughness(&coarse));
    }

    struct Constant(f64);

    impl GradientNoise for Constant {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_constant_source_sums_amplitudes() {
        let generator = NoiseFieldGenerator::new(Constant(1.0));
        let offsets = octave_offsets(&mut seeded_rng(0), 3, Vec2::ZERO);
        let raw = generator.fractal_sum(&small_params().with_size(2, 2), &offsets);
        // Each octave contributes (1 * 2 - 1) * amplitude: 1 + 0.5 + 0.25.
        assert_eq!(raw.range(), (1.75, 1.75));
        assert!(raw.normalize().values().iter().all(|&v| v == 0.0));
    }
}
