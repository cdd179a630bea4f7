//! The shaping passes and their per-cell combination rules.

use canyon_noise::{NoiseField, NoiseParams};

use crate::buffer::HeightBuffer;

/// Noise below this carves canyons; noise above it raises detail.
const CANYON_THRESHOLD: f32 = 0.5;
const CANYON_CARVE_DIVISOR: f32 = 1.3;
const CANYON_FILL_DIVISOR: f32 = 10.0;
/// Erosion blends only where `0 < noise < EROSION_BAND_MAX`.
const EROSION_BAND_MAX: f32 = 0.4;

/// One discrete shaping stage. Passes run in [`ShapingPass::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapingPass {
    /// Replace the heightmap with the base noise field.
    Shape,
    /// Divide heights down where a secondary field is low.
    CanyonCarve,
    /// Raise heights where a third field is high.
    CanyonFill,
    /// Blend heights toward a fine, high-frequency field in its low band.
    Erosion,
}

impl ShapingPass {
    pub const ALL: [Self; 4] = [
        Self::Shape,
        Self::CanyonCarve,
        Self::CanyonFill,
        Self::Erosion,
    ];

    /// Status label reported while the pass runs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Shape => "Terraforming land",
            Self::CanyonCarve => "Generating canyons",
            Self::CanyonFill => "2nd canyon pass",
            Self::Erosion => "Adding erosion",
        }
    }

    /// Phase the pass belongs to; both canyon passes share one.
    pub fn phase(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::CanyonCarve | Self::CanyonFill => "canyons",
            Self::Erosion => "erosion",
        }
    }

    /// Added to the run seed so every pass samples a decorrelated field.
    pub fn seed_offset(self) -> i32 {
        match self {
            Self::Shape => 0,
            Self::CanyonCarve => 1,
            Self::CanyonFill => 2,
            Self::Erosion => 3,
        }
    }

    /// Noise parameters for this pass, derived from the run's base parameters.
    pub fn noise_params(self, base: &NoiseParams, run_seed: i32) -> NoiseParams {
        let params = base.clone().with_seed(run_seed.wrapping_add(self.seed_offset()));
        match self {
            Self::Shape => params,
            Self::CanyonCarve => params
                .with_scale(base.scale / 2.0)
                .with_lacunarity(base.lacunarity + 1.0),
            Self::CanyonFill => params
                .with_scale(base.scale / 2.0)
                .with_octaves(base.octaves.saturating_add(1))
                .with_persistence(base.persistence / 2.0),
            Self::Erosion => params
                .with_scale(base.scale / 2.0)
                .with_octaves(base.octaves.saturating_add(1))
                .with_persistence(base.persistence / 2.0)
                .with_lacunarity(base.lacunarity * 4.0),
        }
    }

    /// Combine the current `height` of a cell with this pass's `noise` sample.
    pub fn combine(self, height: f32, noise: f32) -> f32 {
        match self {
            Self::Shape => noise,
            Self::CanyonCarve if noise < CANYON_THRESHOLD => height / CANYON_CARVE_DIVISOR,
            Self::CanyonFill if noise > CANYON_THRESHOLD => height + noise / CANYON_FILL_DIVISOR,
            Self::Erosion if noise > 0.0 && noise < EROSION_BAND_MAX => (height + noise) / 2.0,
            _ => height,
        }
    }
}

/// Apply `pass` to a single row of `heights`.
pub(crate) fn apply_row(heights: &mut HeightBuffer, field: &NoiseField, pass: ShapingPass, y: usize) {
    for (height, &noise) in heights.row_mut(y).iter_mut().zip(field.row(y)) {
        *height = pass.combine(*height, noise);
    }
}

/// Apply `pass` to every cell of `heights` in one go.
///
/// Height cell `(x, y)` combines with noise cell `(x, y)`.
///
/// # Panics
///
/// Panics if the field and buffer resolutions differ.
pub fn apply_pass(heights: &mut HeightBuffer, field: &NoiseField, pass: ShapingPass) {
    assert_eq!(
        heights.resolution(),
        field.dimensions(),
        "noise field does not match height buffer"
    );
    for y in 0..heights.height() {
        apply_row(heights, field, pass, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canyon_noise::generate;

    fn base() -> NoiseParams {
        NoiseParams::square(33)
            .with_scale(50.0)
            .with_octaves(4)
            .with_persistence(0.5)
            .with_lacunarity(2.0)
    }

    #[test]
    fn test_pass_order() {
        assert_eq!(
            ShapingPass::ALL,
            [
                ShapingPass::Shape,
                ShapingPass::CanyonCarve,
                ShapingPass::CanyonFill,
                ShapingPass::Erosion
            ]
        );
    }

    #[test]
    fn test_derived_noise_params() {
        let base = base();

        let shape = ShapingPass::Shape.noise_params(&base, 100);
        assert_eq!(shape, base.clone().with_seed(100));

        let carve = ShapingPass::CanyonCarve.noise_params(&base, 100);
        assert_eq!(carve.seed, 101);
        assert_eq!(carve.scale, 25.0);
        assert_eq!(carve.octaves, 4);
        assert_eq!(carve.persistence, 0.5);
        assert_eq!(carve.lacunarity, 3.0);

        let fill = ShapingPass::CanyonFill.noise_params(&base, 100);
        assert_eq!(fill.seed, 102);
        assert_eq!(fill.scale, 25.0);
        assert_eq!(fill.octaves, 5);
        assert_eq!(fill.persistence, 0.25);
        assert_eq!(fill.lacunarity, 2.0);

        let erosion = ShapingPass::Erosion.noise_params(&base, 100);
        assert_eq!(erosion.seed, 103);
        assert_eq!(erosion.scale, 25.0);
        assert_eq!(erosion.octaves, 5);
        assert_eq!(erosion.persistence, 0.25);
        assert_eq!(erosion.lacunarity, 8.0);
    }

    #[test]
    fn test_seed_offset_wraps() {
        let params = ShapingPass::Erosion.noise_params(&base(), i32::MAX);
        assert_eq!(params.seed, i32::MIN + 2);
    }

    #[test]
    fn test_extra_octave_saturates() {
        let base = base().with_octaves(u32::MAX);
        assert_eq!(ShapingPass::CanyonFill.noise_params(&base, 0).octaves, u32::MAX);
        assert_eq!(ShapingPass::Erosion.noise_params(&base, 0).octaves, u32::MAX);
    }

    #[test]
    fn test_combination_rules() {
        assert_eq!(ShapingPass::Shape.combine(0.9, 0.3), 0.3);

        assert_eq!(ShapingPass::CanyonCarve.combine(0.65, 0.2), 0.65 / 1.3);
        assert_eq!(ShapingPass::CanyonCarve.combine(0.65, 0.5), 0.65);

        assert_eq!(ShapingPass::CanyonFill.combine(0.4, 0.8), 0.4 + 0.8 / 10.0);
        assert_eq!(ShapingPass::CanyonFill.combine(0.4, 0.5), 0.4);

        assert_eq!(ShapingPass::Erosion.combine(0.6, 0.2), (0.6 + 0.2) / 2.0);
        assert_eq!(ShapingPass::Erosion.combine(0.6, 0.0), 0.6);
        assert_eq!(ShapingPass::Erosion.combine(0.6, 0.4), 0.6);
    }

    #[test]
    fn test_shape_on_zeroed_buffer_equals_field() {
        let field = generate(&base().with_seed(7));
        let mut heights = HeightBuffer::zeroed(33, 33);
        apply_pass(&mut heights, &field, ShapingPass::Shape);
        assert_eq!(heights.as_slice(), field.values());
    }

    #[test]
    fn test_canyon_carve_only_lowers_low_noise_cells() {
        let shape = generate(&base().with_seed(11));
        let carve_field = generate(&ShapingPass::CanyonCarve.noise_params(&base(), 11));

        let mut heights = HeightBuffer::zeroed(33, 33);
        apply_pass(&mut heights, &shape, ShapingPass::Shape);
        let before = heights.clone();
        apply_pass(&mut heights, &carve_field, ShapingPass::CanyonCarve);

        for y in 0..33 {
            for x in 0..33 {
                let (old, new, noise) = (before.get(x, y), heights.get(x, y), carve_field.get(x, y));
                if noise < 0.5 {
                    assert!(new <= old, "({x}, {y}) grew from {old} to {new}");
                    assert_eq!(new, old / 1.3);
                } else {
                    assert_eq!(new, old, "({x}, {y}) changed with noise {noise}");
                }
            }
        }
    }

    #[test]
    fn test_canyon_fill_never_lowers() {
        let fill_field = generate(&ShapingPass::CanyonFill.noise_params(&base(), 3));
        let mut heights = HeightBuffer::zeroed(33, 33);
        heights.fill(0.3);
        apply_pass(&mut heights, &fill_field, ShapingPass::CanyonFill);
        assert!(heights.as_slice().iter().all(|&h| (0.3..=0.4).contains(&h) || (h - 0.4).abs() < 1e-6));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_apply_pass_rejects_mismatched_sizes() {
        let field = generate(&base().with_size(8, 8));
        let mut heights = HeightBuffer::zeroed(9, 9);
        apply_pass(&mut heights, &field, ShapingPass::Shape);
    }
}
