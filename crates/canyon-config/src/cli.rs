//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Procedural canyon terrain generator.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "canyon", about = "Procedural canyon terrain generator")]
pub struct CliArgs {
    /// Base noise seed (used with --fixed-seed).
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i32>,

    /// Base noise scale.
    #[arg(long, allow_negative_numbers = true)]
    pub scale: Option<f32>,

    /// Number of noise octaves.
    #[arg(long, allow_negative_numbers = true)]
    pub octaves: Option<i32>,

    /// Amplitude falloff per octave (0.0 - 1.0).
    #[arg(long)]
    pub persistence: Option<f32>,

    /// Frequency growth per octave (>= 1.0).
    #[arg(long)]
    pub lacunarity: Option<f32>,

    /// Heightmap samples per side.
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Rows processed per frame before committing.
    #[arg(long)]
    pub rows_per_yield: Option<usize>,

    /// Use the configured seed instead of drawing a new one per run.
    #[arg(long)]
    pub fixed_seed: bool,

    /// Print the generation status overlay.
    #[arg(long)]
    pub show_status: bool,

    /// Do not generate automatically at startup.
    #[arg(long)]
    pub no_generate_on_start: bool,

    /// Read `generate` / `status` / `quit` commands from stdin.
    #[arg(long)]
    pub interactive: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Overrides are not range-checked here; call [`Config::sanitize`] afterwards.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.noise.seed = seed;
        }
        if let Some(scale) = args.scale {
            self.noise.scale = scale;
        }
        if let Some(octaves) = args.octaves {
            self.noise.octaves = octaves;
        }
        if let Some(persistence) = args.persistence {
            self.noise.persistence = persistence;
        }
        if let Some(lacunarity) = args.lacunarity {
            self.noise.lacunarity = lacunarity;
        }
        if let Some(resolution) = args.resolution {
            self.terrain.resolution = resolution;
        }
        if let Some(rows) = args.rows_per_yield {
            self.pipeline.rows_per_yield = rows;
        }
        if args.fixed_seed {
            self.pipeline.randomize_seed = false;
        }
        if args.show_status {
            self.pipeline.show_status = true;
        }
        if args.no_generate_on_start {
            self.pipeline.generate_on_start = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
