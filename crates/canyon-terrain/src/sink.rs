//! The host engine's terrain, as seen by the shaping pipeline.

use glam::Vec3;

use crate::buffer::HeightBuffer;

/// Read/write access to a host terrain's heightmap.
///
/// Writes through [`set_heights`](Self::set_heights) may be staged by the
/// host; [`flush`](Self::flush) publishes them to the renderable terrain.
pub trait TerrainSink {
    /// Heightmap resolution as `(width, height)`.
    fn resolution(&self) -> (usize, usize);

    /// A copy of the current heightmap, row-major at [`resolution`](Self::resolution).
    fn heights(&self) -> HeightBuffer;

    /// Replace the whole heightmap.
    fn set_heights(&mut self, heights: &HeightBuffer);

    /// Clear tree instances, detail layers and painted texture layers.
    fn reset_ancillary_layers(&mut self);

    /// Publish pending changes to the renderable representation.
    fn flush(&mut self);

    /// World-space extents: x = width, y = max height, z = length.
    fn set_physical_size(&mut self, size: Vec3);
}
