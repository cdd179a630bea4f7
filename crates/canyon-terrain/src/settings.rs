//! Settings shared by every run a [`TerrainGenerator`](crate::TerrainGenerator) starts.

use std::ops::Range;
use std::time::Duration;

use canyon_noise::NoiseParams;
use glam::Vec3;

/// Rows processed between commits when nothing else is configured.
pub const DEFAULT_ROWS_PER_YIELD: usize = 20;

/// Pause at phase boundaries so transitions stay visible to a viewer.
pub const DEFAULT_PHASE_PAUSE: Duration = Duration::from_millis(100);

/// Range a fresh run seed is drawn from.
pub const RUN_SEED_RANGE: Range<i32> = 0..60_000;

/// Configuration for terrain generation runs.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    /// Base noise parameters for the shape pass. Width and height are
    /// replaced by the terrain's heightmap resolution at run time, and the
    /// seed is replaced by the run seed.
    pub noise: NoiseParams,
    /// World-space terrain extents: x = width, y = max height, z = length.
    pub terrain_size: Vec3,
    /// Rows processed between intermediate commits. Treated as at least 1.
    pub rows_per_yield: usize,
    /// Pause requested at phase boundaries.
    pub phase_pause: Duration,
    /// Draw a fresh seed at the start of every run instead of using
    /// `noise.seed`.
    pub randomize_seed: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            noise: NoiseParams::default(),
            terrain_size: Vec3::new(1000.0, 100.0, 1000.0),
            rows_per_yield: DEFAULT_ROWS_PER_YIELD,
            phase_pause: DEFAULT_PHASE_PAUSE,
            randomize_seed: true,
        }
    }
}
