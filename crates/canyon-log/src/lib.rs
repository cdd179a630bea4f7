//! Structured logging setup for the terrain generator.
//!
//! Console output with uptime timestamps and module paths, plus an optional
//! JSON log file in debug builds. The filter comes from `RUST_LOG`, falling
//! back to the configured log level.

use std::path::{Path, PathBuf};

use canyon_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config specify one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "canyon.log";

/// Resolve the filter directive string from the config.
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns the path of the JSON log file when one is receiving events. File
/// logging is only attempted when `debug_build` is set and `log_dir` is
/// writable; otherwise logging stays console-only. If a global subscriber is
/// already installed (tests, embedding hosts) nothing is installed and `None`
/// is returned.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> Option<PathBuf> {
    let filter_str = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        return match subscriber.with(file_layer).try_init() {
            Ok(()) => Some(log_dir.join(LOG_FILE_NAME)),
            Err(e) => {
                eprintln!("JSON log file not attached: {e}");
                None
            }
        };
    }

    if let Err(e) = subscriber.try_init() {
        eprintln!("Logging already initialized: {e}");
    }
    None
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_filter_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "warn,canyon_terrain=debug".to_string();
        assert_eq!(filter_directives(Some(&config)), "warn,canyon_terrain=debug");
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,canyon_terrain=trace",
            "warn,canyon_noise=debug,canyon_app=info",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {filter_str}");
        }
    }

    #[test]
    fn test_no_log_file_reported_once_subscriber_installed() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        // Whichever test runs first installs the global subscriber.
        init_logging(Some(first.path()), false, None);
        assert_eq!(init_logging(Some(second.path()), true, None), None);
    }

    #[test]
    fn test_release_build_skips_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert_eq!(init_logging(Some(temp_dir.path()), false, None), None);
        assert!(!temp_dir.path().join(LOG_FILE_NAME).exists());
    }
}
