//! Engine configuration
//!
//! Strongly-typed configuration for the window, frame timing and camera
//! defaults. All structs are serde-serializable and can be loaded from TOML
//! for tooling and tests; the demo application runs on the hardcoded
//! defaults and ships no config file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::time::{DEFAULT_FIXED_DELTA, DEFAULT_MAX_CATCHUP_STEPS};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error while reading a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,

    /// Whether the window is resizable
    pub resizable: bool,

    /// Whether to start maximized
    pub maximized: bool,

    /// Initial vsync setting
    pub vsync: bool,

    /// Minimum client area size
    pub min_size: (u32, u32),

    /// Maximum client area size
    pub max_size: (u32, u32),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "CircuitGame".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            maximized: true,
            vsync: true,
            min_size: (800, 600),
            max_size: (3840, 2160),
        }
    }
}

/// Frame timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fixed simulation step in seconds
    pub fixed_delta: f64,

    /// Cap on fixed-step catch-up work per frame
    pub max_catchup_steps: u32,

    /// Target sleep interval while the window is active, in milliseconds.
    /// Zero disables throttling for active windows.
    pub active_sleep_ms: u64,

    /// Target sleep interval while the window is idle (unfocused or
    /// minimized), in milliseconds
    pub idle_sleep_ms: u64,

    /// Master switch for the end-of-frame sleep
    pub sleep_enabled: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_delta: DEFAULT_FIXED_DELTA,
            max_catchup_steps: DEFAULT_MAX_CATCHUP_STEPS,
            active_sleep_ms: 0,
            idle_sleep_ms: 50,
            sleep_enabled: true,
        }
    }
}

/// Camera defaults applied at engine initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov: f32,

    /// Near clip plane distance
    pub near_clip: f32,

    /// Far clip plane distance
    pub far_clip: f32,

    /// Movement speed in units per second
    pub speed: f32,

    /// Mouse-look sensitivity
    pub sensitivity: f32,

    /// Initial position
    pub position: [f32; 3],

    /// Initial Euler rotation in degrees
    pub rotation: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 90.0,
            near_clip: 0.01,
            far_clip: 500.0,
            speed: 2.5,
            sensitivity: 0.1,
            position: [0.0; 3],
            rotation: [0.0; 3],
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Frame timing configuration
    pub timing: TimingConfig,

    /// Camera defaults
    pub camera: CameraConfig,
}

impl EngineConfig {
    /// Create a configuration with the given window title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig {
                title: title.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Set the initial window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set whether the window starts maximized
    pub fn with_maximized(mut self, maximized: bool) -> Self {
        self.window.maximized = maximized;
        self
    }

    /// Set the initial vsync state
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.window.vsync = vsync;
        self
    }

    /// Set the active/idle sleep intervals in milliseconds
    pub fn with_sleep_intervals(mut self, active_ms: u64, idle_ms: u64) -> Self {
        self.timing.active_sleep_ms = active_ms;
        self.timing.idle_sleep_ms = idle_ms;
        self
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(
                "window size must be non-zero".to_string(),
            ));
        }
        if self.window.max_size.0 < self.window.min_size.0
            || self.window.max_size.1 < self.window.min_size.1
        {
            return Err(ConfigError::Invalid(
                "window max size must not be smaller than min size".to_string(),
            ));
        }
        if self.timing.fixed_delta <= 0.0 {
            return Err(ConfigError::Invalid(
                "fixed delta must be positive".to_string(),
            ));
        }
        if self.timing.max_catchup_steps == 0 {
            return Err(ConfigError::Invalid(
                "at least one fixed catch-up step is required".to_string(),
            ));
        }
        if self.camera.near_clip >= self.camera.far_clip {
            return Err(ConfigError::Invalid(
                "camera near clip must be below far clip".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn toml_overrides_merge_over_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [window]
            title = "Test"
            width = 1024
            height = 768

            [timing]
            idle_sleep_ms = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.timing.idle_sleep_ms, 100);
        // untouched values keep their defaults
        assert_eq!(config.timing.active_sleep_ms, 0);
        assert!(config.window.vsync);
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let result = EngineConfig::from_toml_str("[window]\nwidth = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn inverted_clip_planes_are_rejected() {
        let result = EngineConfig::from_toml_str("[camera]\nnear_clip = 600.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
