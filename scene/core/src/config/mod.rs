//! TOML Configuration File Support
//!
//! Host settings for the scene, loaded from
//! `$XDG_CONFIG_HOME/jetfyx/scene.toml` (typically
//! `~/.config/jetfyx/scene.toml`).
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [render]
//! target_fps = 60
//! cell_width_px = 8
//! cell_height_px = 16
//!
//! [host]
//! show_copy = true
//! ```
//!
//! The timeline itself is not configurable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest accepted frame rate
pub const MAX_FPS: u32 = 240;

/// Largest accepted cell edge in width-units
pub const MAX_CELL_PX: u32 = 256;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Render section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderToml {
    /// Frames per second the host drives the loop at
    pub target_fps: Option<u32>,

    /// Width-units covered by one terminal column
    pub cell_width_px: Option<u32>,

    /// Width-units covered by one terminal row
    pub cell_height_px: Option<u32>,
}

/// Host section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostToml {
    /// Whether the foreground marketing copy is shown
    pub show_copy: Option<bool>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneToml {
    pub render: RenderToml,
    pub host: HostToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved scene host configuration
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Frames per second the host drives the loop at
    pub target_fps: u32,

    /// Width-units covered by one terminal column
    pub cell_width_px: u32,

    /// Width-units covered by one terminal row
    pub cell_height_px: u32,

    /// Whether the foreground marketing copy is shown
    pub show_copy: bool,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            cell_width_px: 8,
            cell_height_px: 16,
            show_copy: true,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl SceneConfig {
    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Interval between frames at the target rate
    #[must_use]
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 || self.target_fps > MAX_FPS {
            return Err(ConfigError::ValidationError(format!(
                "target_fps must be between 1 and {MAX_FPS}, got {}",
                self.target_fps
            )));
        }
        let cell_ok = |px: u32| (1..=MAX_CELL_PX).contains(&px);
        if !cell_ok(self.cell_width_px) || !cell_ok(self.cell_height_px) {
            return Err(ConfigError::ValidationError(format!(
                "cell size must be between 1 and {MAX_CELL_PX}, got {}x{}",
                self.cell_width_px, self.cell_height_px
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/jetfyx/scene.toml` or
/// `~/.config/jetfyx/scene.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("jetfyx").join("scene.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the resulting values are out of range. A missing config file is not an
/// error (defaults are used).
pub fn load_config() -> Result<SceneConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the resulting values are out of range.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<SceneConfig, ConfigError> {
    let mut config = SceneConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: SceneToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);
    config.validate()?;

    Ok(config)
}

fn apply_toml_config(config: &mut SceneConfig, toml: &SceneToml) {
    if let Some(fps) = toml.render.target_fps {
        config.target_fps = fps;
    }
    if let Some(width) = toml.render.cell_width_px {
        config.cell_width_px = width;
    }
    if let Some(height) = toml.render.cell_height_px {
        config.cell_height_px = height;
    }
    if let Some(show) = toml.host.show_copy {
        config.show_copy = show;
    }
}

fn apply_env_config(config: &mut SceneConfig) {
    if let Ok(fps) = std::env::var("JETFYX_FPS") {
        if let Ok(n) = fps.parse::<u32>() {
            config.target_fps = n;
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(width) = std::env::var("JETFYX_CELL_WIDTH") {
        if let Ok(n) = width.parse::<u32>() {
            config.cell_width_px = n;
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(height) = std::env::var("JETFYX_CELL_HEIGHT") {
        if let Ok(n) = height.parse::<u32>() {
            config.cell_height_px = n;
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(show) = std::env::var("JETFYX_SHOW_COPY") {
        config.show_copy = show != "0" && show.to_lowercase() != "false";
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub target_fps: Option<u32>,
    pub cell_width_px: Option<u32>,
    pub cell_height_px: Option<u32>,
    pub show_copy: Option<bool>,
}

impl ConfigOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    #[must_use]
    pub fn with_cell_size(mut self, width: u32, height: u32) -> Self {
        self.cell_width_px = Some(width);
        self.cell_height_px = Some(height);
        self
    }

    #[must_use]
    pub fn with_show_copy(mut self, show: bool) -> Self {
        self.show_copy = Some(show);
        self
    }

    /// Apply overrides on top of a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if an override is out of range.
    pub fn apply(&self, config: &mut SceneConfig) -> Result<(), ConfigError> {
        let mut changed = false;
        if let Some(fps) = self.target_fps {
            config.target_fps = fps;
            changed = true;
        }
        if let Some(width) = self.cell_width_px {
            config.cell_width_px = width;
            changed = true;
        }
        if let Some(height) = self.cell_height_px {
            config.cell_height_px = height;
            changed = true;
        }
        if let Some(show) = self.show_copy {
            config.show_copy = show;
            changed = true;
        }
        if changed {
            config.source = ConfigSource::Cli;
        }
        config.validate()
    }
}
