//! Window error types

use thiserror::Error;

use crate::config::ConfigError;

/// Window management errors
///
/// Every construction failure (`InvalidDimensions`, `InitializationFailed`,
/// `CreationFailed`) means no window exists; see [`WindowError::is_creation_error`].
#[derive(Error, Debug)]
pub enum WindowError {
    /// Requested size has a zero dimension
    #[error("Invalid window dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// The windowing subsystem could not be initialized
    #[error("Windowing subsystem initialization failed: {0}")]
    InitializationFailed(String),

    /// The windowing subsystem could not produce a window handle
    #[error("Window creation failed: {0}")]
    CreationFailed(String),

    /// No Vulkan loader is available to the windowing subsystem
    #[error("Vulkan is not supported by the windowing subsystem")]
    VulkanUnsupported,

    /// A presentation surface could not be created for the window
    #[error("Surface creation failed: {0}")]
    SurfaceCreationFailed(String),

    /// Window configuration could not be loaded
    #[error("Window configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WindowError {
    /// Whether this error came out of window construction
    pub fn is_creation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::InitializationFailed(_) | Self::CreationFailed(_)
        )
    }
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;
