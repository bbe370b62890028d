//! Configuration types for folder downloads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for tree resolution and download behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Maximum folder nesting depth before resolution fails. The remote
    /// structure is untrusted, so a cap is always enforced.
    pub max_depth: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

impl DownloadConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Path configuration for download output.
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Directory under which the folder tree is materialized.
    pub output_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Download configuration.
    pub download: DownloadConfig,
    /// Path configuration.
    pub paths: PathConfig,
}

impl AppConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from defaults.
    /// In the future, this can be extended to load from config files.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` is part of the contract for when
    /// file loading is added.
    pub fn load() -> crate::Result<Self> {
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_download_config() {
        let config = DownloadConfig::default();
        assert_eq!(config.max_depth, 32);
    }

    #[test]
    fn download_config_builder_pattern() {
        let config = DownloadConfig::new().with_max_depth(4);
        assert_eq!(config.max_depth, 4);
    }

    #[test]
    fn download_config_serializes_to_toml() {
        let config = DownloadConfig::default().with_max_depth(16);
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: DownloadConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.max_depth, config.max_depth);
    }

    #[test]
    fn default_path_config() {
        let config = PathConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn app_config_load() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.download.max_depth, 32);
        assert_eq!(config.paths.output_dir, PathBuf::from("."));
    }
}
