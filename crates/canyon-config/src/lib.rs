//! Configuration for the terrain generator.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line, and are clamped into valid ranges before use.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, NoiseConfig, PipelineConfig, TerrainConfig};
pub use error::ConfigError;
