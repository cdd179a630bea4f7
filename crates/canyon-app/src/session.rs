//! The host-side terrain object: owns the terrain, the generator component,
//! and the "generate now" trigger.

use std::time::Duration;

use canyon_config::Config;
use canyon_noise::NoiseParams;
use canyon_terrain::{GenerationSettings, MemoryTerrain, RunOutcome, TerrainGenerator};
use glam::{Vec2, Vec3};
use tracing::info;

use crate::frame_loop::{Clock, FrameLoop};

/// Build generator settings from a (sanitized) config.
pub fn settings_from_config(config: &Config) -> GenerationSettings {
    let resolution = config.terrain.resolution;
    let noise = &config.noise;
    GenerationSettings {
        noise: NoiseParams {
            width: resolution,
            height: resolution,
            seed: noise.seed,
            scale: noise.scale,
            octaves: noise.octaves.max(0) as u32,
            persistence: noise.persistence,
            lacunarity: noise.lacunarity,
            offset: Vec2::new(noise.offset.0, noise.offset.1),
        },
        terrain_size: Vec3::new(config.terrain.width, config.terrain.height, config.terrain.length),
        rows_per_yield: config.pipeline.rows_per_yield,
        phase_pause: Duration::from_millis(config.pipeline.phase_pause_ms),
        randomize_seed: config.pipeline.randomize_seed,
    }
}

/// World-space height statistics of a generated terrain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSummary {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

/// A console command for the interactive trigger surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Generate,
    Status,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "g" | "generate" => Some(Self::Generate),
            "s" | "status" => Some(Self::Status),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// A terrain in the host scene together with its generator component.
pub struct TerrainSession {
    terrain: Option<MemoryTerrain>,
    generator: TerrainGenerator,
    show_status: bool,
}

impl TerrainSession {
    pub fn from_config(config: &Config) -> Self {
        Self {
            terrain: Some(MemoryTerrain::new(config.terrain.resolution)),
            generator: TerrainGenerator::new(settings_from_config(config)),
            show_status: config.pipeline.show_status,
        }
    }

    /// A session whose terrain has not been attached.
    pub fn detached(config: &Config) -> Self {
        Self {
            terrain: None,
            ..Self::from_config(config)
        }
    }

    /// Apply an edited config to later runs. A changed heightmap resolution
    /// replaces the attached terrain with a fresh one.
    pub fn apply_config(&mut self, config: &Config) {
        self.generator.set_settings(settings_from_config(config));
        self.show_status = config.pipeline.show_status;

        let resolution = config.terrain.resolution;
        if let Some(terrain) = &mut self.terrain
            && terrain.rendered_heights().resolution() != (resolution, resolution)
        {
            info!(resolution, "terrain resolution changed");
            *terrain = MemoryTerrain::new(resolution);
        }
    }

    pub fn terrain(&self) -> Option<&MemoryTerrain> {
        self.terrain.as_ref()
    }

    /// The latest status message from any run.
    pub fn status(&self) -> &str {
        self.generator.last_status()
    }

    /// Run a full generation, resuming it once per host frame.
    pub fn generate_now<C: Clock>(&mut self, frames: &mut FrameLoop<C>) -> RunOutcome {
        let mut run = self.generator.start(self.terrain.as_mut());
        info!(pinned_seed = run.seed(), "generate requested");

        let generator = &mut self.generator;
        let show_status = self.show_status;
        let outcome = frames.drive(&mut run, |_| {
            for message in generator.drain_status() {
                if show_status {
                    println!("[{message}]");
                }
            }
        });
        let seed = run.seed();
        drop(run);

        if let Some(summary) = self.summary() {
            info!(
                seed,
                min = summary.min,
                max = summary.max,
                mean = summary.mean,
                "terrain height summary"
            );
        }
        outcome
    }

    /// Height statistics of the rendered terrain, in world units.
    pub fn summary(&self) -> Option<HeightSummary> {
        let terrain = self.terrain.as_ref()?;
        let (min, max, mean) = terrain.rendered_heights().stats()?;
        let scale = terrain.physical_size().y;
        Some(HeightSummary {
            min: min * scale,
            max: max * scale,
            mean: mean * scale,
        })
    }
}
