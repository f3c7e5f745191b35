//! Runtime configuration
//!
//! Surface geometry, polling cadence, and asset search paths, loadable from
//! TOML or RON files with sensible defaults for the conformance scenarios.

use std::time::Duration;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Display surface configuration
    pub surface: SurfaceConfig,

    /// Asset loading configuration
    pub assets: AssetConfig,
}

impl Config for RuntimeConfig {}

impl RuntimeConfig {
    /// Validate every section, rejecting values the runtime cannot operate on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "surface dimensions must be non-zero, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        if self.surface.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Display surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface width in pixels
    pub width: u32,

    /// Surface height in pixels
    pub height: u32,

    /// Interval between visibility polls in milliseconds
    pub poll_interval_ms: u64,

    /// Upper bound on a visibility wait in milliseconds
    pub wait_timeout_ms: u64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        // QVGA portrait, the usual embedded display geometry
        Self { width: 240, height: 320, poll_interval_ms: 100, wait_timeout_ms: 5000 }
    }
}

impl SurfaceConfig {
    /// Poll interval as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Wait timeout as a `Duration`
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}

/// Asset loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Asset search paths, tried in order
    pub search_paths: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self { search_paths: vec!["resources".to_string()] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        RuntimeConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_dimensions_rejected() {
        let mut config = RuntimeConfig::default();
        config.surface.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let mut config = RuntimeConfig::default();
        config.surface.poll_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_round_trip() {
        let path = std::env::temp_dir().join("display_runtime_config.toml");
        let path = path.to_str().unwrap().to_string();

        let mut config = RuntimeConfig::default();
        config.surface.width = 128;
        config.assets.search_paths.push("demos/assets".to_string());

        config.save_to_file(&path).unwrap();
        let loaded = RuntimeConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.surface.width, 128);
        assert_eq!(loaded.assets.search_paths.len(), 2);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unknown_extension_rejected() {
        assert!(matches!(
            RuntimeConfig::load_from_file("config.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
