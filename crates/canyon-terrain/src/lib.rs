//! Terrain shaping pipeline: layers seeded noise fields into a heightmap over
//! several cooperative passes, committing to a host terrain as it goes.

mod buffer;
mod error;
mod generator;
mod memory;
mod pass;
mod run;
mod settings;
mod sink;

pub use buffer::HeightBuffer;
pub use error::GenerationError;
pub use generator::TerrainGenerator;
pub use memory::{AncillaryLayers, MemoryTerrain};
pub use pass::{ShapingPass, apply_pass};
pub use run::{PipelineRun, Resume, RunOutcome, Step, status};
pub use settings::{DEFAULT_PHASE_PAUSE, DEFAULT_ROWS_PER_YIELD, GenerationSettings, RUN_SEED_RANGE};
pub use sink::TerrainSink;
