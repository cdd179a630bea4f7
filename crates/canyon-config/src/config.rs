//! Configuration structs with defaults, RON persistence and range clamping.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain extents and heightmap resolution.
    pub terrain: TerrainConfig,
    /// Base fractal noise settings.
    pub noise: NoiseConfig,
    /// Run cadence and triggers.
    pub pipeline: PipelineConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Physical terrain size and heightmap resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// World-space width.
    pub width: f32,
    /// World-space height a heightmap value of 1.0 maps to.
    pub height: f32,
    /// World-space length.
    pub length: f32,
    /// Heightmap samples per side.
    pub resolution: usize,
}

/// Base noise settings for the shape pass; later passes derive from these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    pub scale: f32,
    /// Signed so that hand-edited negative values can be clamped instead of
    /// failing to parse.
    pub octaves: i32,
    /// Amplitude falloff per octave, 0.0 - 1.0.
    pub persistence: f32,
    /// Frequency growth per octave, at least 1.0.
    pub lacunarity: f32,
    /// Only used when `pipeline.randomize_seed` is off.
    pub seed: i32,
    pub offset: (f32, f32),
}

/// Incremental execution and trigger settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Heightmap rows processed per frame before committing.
    pub rows_per_yield: usize,
    /// Pause at phase boundaries, in milliseconds.
    pub phase_pause_ms: u64,
    /// Draw a fresh seed for every run.
    pub randomize_seed: bool,
    /// Show the status overlay.
    pub show_status: bool,
    /// Generate as soon as the application starts.
    pub generate_on_start: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g., "debug", "info", "canyon_terrain=trace").
    pub log_level: String,
    /// Directory for JSON log files. Platform default when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 100.0,
            length: 1000.0,
            resolution: 513,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            scale: 200.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: 0,
            offset: (0.0, 0.0),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rows_per_yield: 20,
            phase_pause_ms: 100,
            randomize_seed: true,
            show_status: false,
            generate_on_start: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Validation ---

fn clamp_min<T: PartialOrd + Copy + std::fmt::Debug>(name: &str, value: &mut T, min: T) -> bool {
    // `!(>=)` so NaN is clamped as well.
    if !(*value >= min) {
        log::warn!("{name} = {value:?} is out of range, using {min:?}");
        *value = min;
        true
    } else {
        false
    }
}

impl Config {
    /// Clamp every user-editable value into its valid range.
    ///
    /// Returns the number of values that were changed.
    pub fn sanitize(&mut self) -> usize {
        let mut fixed = 0;
        fixed += clamp_min("terrain.width", &mut self.terrain.width, 1.0) as usize;
        fixed += clamp_min("terrain.height", &mut self.terrain.height, 1.0) as usize;
        fixed += clamp_min("terrain.length", &mut self.terrain.length, 1.0) as usize;
        fixed += clamp_min("terrain.resolution", &mut self.terrain.resolution, 1) as usize;
        fixed += clamp_min("noise.octaves", &mut self.noise.octaves, 0) as usize;
        fixed += clamp_min("noise.lacunarity", &mut self.noise.lacunarity, 1.0) as usize;
        fixed += clamp_min("noise.persistence", &mut self.noise.persistence, 0.0) as usize;
        if self.noise.persistence > 1.0 {
            log::warn!("noise.persistence = {} is out of range, using 1.0", self.noise.persistence);
            self.noise.persistence = 1.0;
            fixed += 1;
        }
        fixed += clamp_min("pipeline.rows_per_yield", &mut self.pipeline.rows_per_yield, 1) as usize;
        fixed
    }

    /// `sanitize` by value, for builder-style call chains.
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::path_in(config_dir);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = Self::path_in(config_dir);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(false)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&Self::path_in(config_dir))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("resolution: 513"));
        assert!(ron_str.contains("rows_per_yield: 20"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.noise.offset = (12.5, -3.0);
        config.debug.log_dir = Some(PathBuf::from("/tmp/canyon-logs"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(terrain: (resolution: 129), noise: ())").unwrap();
        assert_eq!(config.terrain.resolution, 129);
        assert_eq!(config.terrain.height, 100.0);
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_sanitize_clamps_edit_boundary() {
        let mut config = Config::default();
        config.terrain.width = 0.0;
        config.terrain.height = -5.0;
        config.terrain.resolution = 0;
        config.noise.octaves = -3;
        config.noise.lacunarity = 0.5;
        config.noise.persistence = 1.5;
        config.pipeline.rows_per_yield = 0;

        assert_eq!(config.sanitize(), 7);
        assert_eq!(config.terrain.width, 1.0);
        assert_eq!(config.terrain.height, 1.0);
        assert_eq!(config.terrain.resolution, 1);
        assert_eq!(config.noise.octaves, 0);
        assert_eq!(config.noise.lacunarity, 1.0);
        assert_eq!(config.noise.persistence, 1.0);
        assert_eq!(config.pipeline.rows_per_yield, 1);
    }

    #[test]
    fn test_sanitize_leaves_valid_config_alone() {
        let mut config = Config::default();
        assert_eq!(config.sanitize(), 0);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_sanitize_does_not_touch_scale() {
        // The generator guards non-positive scales itself.
        let config = Config {
            noise: NoiseConfig {
                scale: -1.0,
                ..Default::default()
            },
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.noise.scale, -1.0);
    }

    #[test]
    fn test_sanitize_clamps_nan() {
        let mut config = Config::default();
        config.noise.lacunarity = f32::NAN;
        config.sanitize();
        assert_eq!(config.noise.lacunarity, 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.resolution = 257;
        config.noise.seed = 77;
        config.pipeline.show_status = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::path_in(dir.path()).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.noise.octaves = 7;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.noise.octaves), Some(7));
        assert!(modified.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::path_in(dir.path()), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.ron"));
    }
}
