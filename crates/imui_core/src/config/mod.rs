//! Configuration system
//!
//! Session and tick-driver settings, loadable from TOML or RON files.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

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
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
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

    /// Values that parsed but make no sense
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Session Configuration
///
/// Settings for one immediate-mode session. Window sizing is applied only
/// when a window's retained widget is first created; reused windows keep
/// whatever size they have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Width and height given to newly created windows
    pub default_window_size: (f32, f32),
    /// Whether a newly created window takes focus
    pub focus_new_windows: bool,
    /// Identity tag of a window's content sub-container
    pub content_tag: String,
    /// Separator between the segments of a generated identity
    pub id_separator: char,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_window_size: (400.0, 300.0),
            focus_new_windows: true,
            content_tag: "content".to_string(),
            id_separator: '/',
        }
    }
}

impl SessionConfig {
    /// Set the default window size
    pub fn with_window_size(mut self, width: f32, height: f32) -> Self {
        self.default_window_size = (width, height);
        self
    }

    /// Enable or disable focusing of new windows
    pub fn with_focus_new_windows(mut self, focus: bool) -> Self {
        self.focus_new_windows = focus;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.default_window_size;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default window size must be positive, got {width}x{height}"
            )));
        }
        if self.content_tag.is_empty() {
            return Err(ConfigError::Invalid("content tag cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Config for SessionConfig {}

/// # Tick Driver Configuration
///
/// Names of the two update loops and the fixed-step parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Context name of the variable-rate pass
    pub variable_context: String,
    /// Context name of the fixed-rate pass
    pub fixed_context: String,
    /// Fixed step length in seconds
    pub fixed_step: f32,
    /// Upper bound on fixed passes per tick (spiral-of-death guard)
    pub max_fixed_steps_per_tick: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            variable_context: "update".to_string(),
            fixed_context: "fixed_update".to_string(),
            fixed_step: 1.0 / 60.0,
            max_fixed_steps_per_tick: 5,
        }
    }
}

impl DriverConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variable_context.is_empty() || self.fixed_context.is_empty() {
            return Err(ConfigError::Invalid("context names cannot be empty".to_string()));
        }
        if self.variable_context == self.fixed_context {
            return Err(ConfigError::Invalid(
                "variable and fixed contexts must have different names".to_string(),
            ));
        }
        if !(self.fixed_step > 0.0 && self.fixed_step.is_finite()) {
            return Err(ConfigError::Invalid("fixed step must be positive".to_string()));
        }
        Ok(())
    }
}

impl Config for DriverConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
        assert!(DriverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_window_size() {
        let config = SessionConfig::default().with_window_size(0.0, 100.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_identical_context_names() {
        let config = DriverConfig {
            fixed_context: "update".to_string(),
            ..DriverConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_or_infinite_fixed_step() {
        for step in [f32::NAN, f32::INFINITY, -1.0] {
            let config = DriverConfig {
                fixed_step: step,
                ..DriverConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_toml_partial_file_uses_defaults() {
        let config: SessionConfig = toml::from_str("focus_new_windows = false").unwrap();
        assert!(!config.focus_new_windows);
        assert_eq!(config.content_tag, "content");
    }

    #[test]
    fn test_ron_roundtrip_via_file() {
        let path = std::env::temp_dir().join("imui_core_driver_config_test.ron");
        let path = path.to_str().unwrap();
        let config = DriverConfig {
            max_fixed_steps_per_tick: 3,
            ..DriverConfig::default()
        };
        config.save_to_file(path).unwrap();
        let loaded = DriverConfig::load_from_file(path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SessionConfig::load_from_file("settings.json");
        assert!(matches!(result, Err(ConfigError::Io(_)) | Err(ConfigError::UnsupportedFormat(_))));
    }
}
