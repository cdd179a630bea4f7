//! Per-octave sampling offsets drawn from a seeded stream.

use glam::{DVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Half-open range each offset component is drawn from.
pub const OCTAVE_OFFSET_RANGE: std::ops::Range<i32> = -100_000..100_000;

/// The default offset stream for a field seed.
pub fn seeded_rng(seed: i32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed as u64)
}

/// Draw one offset per octave and shift each by the global `offset`.
///
/// Components are drawn in the order x0, y0, x1, y1, ...; changing that order
/// changes every field generated from the same seed.
pub fn octave_offsets<R: Rng + ?Sized>(rng: &mut R, octaves: u32, offset: Vec2) -> Vec<DVec2> {
    (0..octaves)
        .map(|_| {
            let x = rng.random_range(OCTAVE_OFFSET_RANGE) as f64 + offset.x as f64;
            let y = rng.random_range(OCTAVE_OFFSET_RANGE) as f64 + offset.y as f64;
            DVec2::new(x, y)
        })
        .collect()
}
