//! Platform directory resolution.
//!
//! Generated terrain is never persisted, so only configuration and log
//! directories are needed.

use std::path::{Path, PathBuf};

/// Errors that can occur during platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// OS-specific directory paths for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// JSON log files (debug builds).
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "canyon";

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_dir = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        Ok(Self::under(&app_dir))
    }

    /// Use an explicit config directory, keeping logs next to it.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    fn under(app_dir: &Path) -> Self {
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_layout() {
        let dirs = PlatformDirs::under(&Path::new("/base").join(APP_NAME));
        assert_eq!(dirs.config_dir, Path::new("/base").join("canyon").join("config"));
        assert_eq!(dirs.log_dir, Path::new("/base").join("canyon").join("logs"));
    }

    #[test]
    fn test_explicit_config_dir_keeps_logs_beside_it() {
        let dirs = PlatformDirs::with_config_dir(PathBuf::from("settings"));
        assert_eq!(dirs.config_dir, PathBuf::from("settings"));
        assert_eq!(dirs.log_dir, Path::new("settings").join("logs"));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_config_dir(tmp.path().join("config"));
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }
}
