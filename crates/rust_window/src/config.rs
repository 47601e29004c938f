//! Window configuration
//!
//! Creation parameters for a [`Window`](crate::Window), loadable from TOML or
//! RON files through the [`Config`] trait.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WindowError, WindowResult};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    ///
    /// # Errors
    /// Fails if the extension is not recognised, the file cannot be read, or
    /// its contents do not parse.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::of(path)?;
        let contents = std::fs::read_to_string(path)?;

        let parsed = match format {
            Format::Toml => toml::from_str(&contents).map_err(|e| e.to_string()),
            Format::Ron => ron::from_str(&contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    /// Save configuration to a `.toml` or `.ron` file
    ///
    /// # Errors
    /// Fails if the extension is not recognised, serialization fails, or the
    /// file cannot be written.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let serialized = match Format::of(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| e.to_string()),
        };
        let contents = serialized.map_err(|message| ConfigError::Serialize {
            path: path.display().to_string(),
            message,
        })?;

        std::fs::write(path, contents)?;
        Ok(())
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Errors reading or writing a configuration file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("Config file IO failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents are not a valid configuration
    #[error("Could not parse {path}: {message}")]
    Parse {
        /// Offending file
        path: String,
        /// Parser diagnostic
        message: String,
    },

    /// The configuration could not be encoded
    #[error("Could not serialize config for {path}: {message}")]
    Serialize {
        /// Destination file
        path: String,
        /// Encoder diagnostic
        message: String,
    },

    /// The file extension is neither `.toml` nor `.ron`
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Parameters used to create a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Allow the user to resize the window
    ///
    /// Off by default. Swapchain recreation on resize is the renderer's job.
    pub resizable: bool,
}

impl WindowConfig {
    /// Create a non-resizable window configuration
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            resizable: false,
        }
    }

    /// Set whether the window may be resized by the user
    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Reject sizes the windowing subsystem cannot honour
    ///
    /// # Errors
    /// Returns [`WindowError::InvalidDimensions`] if either dimension is zero.
    pub fn validate(&self) -> WindowResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WindowError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(800, 600, "Rust Window")
    }
}

impl Config for WindowConfig {}
