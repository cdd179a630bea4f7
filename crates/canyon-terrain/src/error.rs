//! Terrain generation error types.

/// Reasons a generation run aborts before touching the terrain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// No terrain is attached to generate into.
    #[error("no terrain attached")]
    MissingTerrain,

    /// The attached terrain reports an unusable heightmap resolution.
    #[error("terrain heightmap resolution {width}x{height} is empty")]
    InvalidResolution { width: usize, height: usize },
}
