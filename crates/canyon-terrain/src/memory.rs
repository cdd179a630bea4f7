//! In-memory terrain used by the host application and tests.

use glam::Vec3;

use crate::buffer::HeightBuffer;
use crate::sink::TerrainSink;

/// Layers painted on top of the heightmap that a reshape invalidates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AncillaryLayers {
    /// Tree instance positions in normalized terrain space.
    pub trees: Vec<Vec3>,
    /// Grass/detail density per detail cell.
    pub detail: Vec<u16>,
    /// Splat weights, one per alphamap cell and texture layer.
    pub alphamap: Vec<f32>,
}

impl AncillaryLayers {
    /// Returns `true` when nothing is placed or painted.
    pub fn is_clear(&self) -> bool {
        self.trees.is_empty()
            && self.detail.iter().all(|&d| d == 0)
            && self.alphamap.iter().all(|&w| w == 0.0)
    }
}

/// A heightmap terrain held entirely in memory.
///
/// Like an engine heightmap, stored heights are clamped into `[0, 1]`.
/// Writes are staged until [`flush`](TerrainSink::flush) copies them into the
/// rendered heightmap.
#[derive(Clone, Debug)]
pub struct MemoryTerrain {
    staged: HeightBuffer,
    rendered: HeightBuffer,
    size: Vec3,
    layers: AncillaryLayers,
    commits: usize,
    flushes: usize,
}

impl MemoryTerrain {
    /// A flat square terrain of `resolution` x `resolution` height samples.
    pub fn new(resolution: usize) -> Self {
        Self::with_resolution(resolution, resolution)
    }

    /// A flat terrain of `width` x `height` samples with the default physical size.
    pub fn with_resolution(width: usize, height: usize) -> Self {
        Self {
            staged: HeightBuffer::zeroed(width, height),
            rendered: HeightBuffer::zeroed(width, height),
            size: Vec3::new(1000.0, 100.0, 1000.0),
            layers: AncillaryLayers::default(),
            commits: 0,
            flushes: 0,
        }
    }

    /// Start with pre-populated ancillary layers.
    pub fn with_layers(mut self, layers: AncillaryLayers) -> Self {
        self.layers = layers;
        self
    }

    /// The heightmap as last flushed.
    pub fn rendered_heights(&self) -> &HeightBuffer {
        &self.rendered
    }

    /// The heightmap including writes not yet flushed.
    pub fn staged_heights(&self) -> &HeightBuffer {
        &self.staged
    }

    /// Rendered height at a cell in world units.
    pub fn world_height(&self, x: usize, y: usize) -> f32 {
        self.rendered.get(x, y) * self.size.y
    }

    pub fn physical_size(&self) -> Vec3 {
        self.size
    }

    pub fn layers(&self) -> &AncillaryLayers {
        &self.layers
    }

    /// Number of `set_heights` calls so far.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Number of `flush` calls so far.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Returns `true` if staged heights differ from the rendered ones.
    pub fn has_pending_changes(&self) -> bool {
        self.staged != self.rendered
    }
}

impl TerrainSink for MemoryTerrain {
    fn resolution(&self) -> (usize, usize) {
        self.staged.resolution()
    }

    fn heights(&self) -> HeightBuffer {
        self.staged.clone()
    }

    fn set_heights(&mut self, heights: &HeightBuffer) {
        assert_eq!(
            heights.resolution(),
            self.staged.resolution(),
            "height buffer resolution does not match terrain"
        );
        for (dst, &src) in self.staged.as_mut_slice().iter_mut().zip(heights.as_slice()) {
            *dst = src.clamp(0.0, 1.0);
        }
        self.commits += 1;
    }

    fn reset_ancillary_layers(&mut self) {
        self.layers.trees.clear();
        self.layers.detail.fill(0);
        self.layers.alphamap.fill(0.0);
    }

    fn flush(&mut self) {
        self.rendered.clone_from(&self.staged);
        self.flushes += 1;
    }

    fn set_physical_size(&mut self, size: Vec3) {
        self.size = size;
    }
}
