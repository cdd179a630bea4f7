//! Seeded fractal noise fields: octave-summed gradient noise normalized into `[0, 1]`.

mod field;
mod generator;
mod gradient;
mod octaves;
mod params;

pub use field::{NoiseField, RawField};
pub use generator::{NoiseFieldGenerator, generate};
pub use gradient::{GradientNoise, PerlinSource};
pub use octaves::{OCTAVE_OFFSET_RANGE, octave_offsets, seeded_rng};
pub use params::{MIN_SCALE, NoiseParams};
