//! Presentation window
//!
//! [`Window`] owns exactly one OS-level window for the lifetime of the value.
//! Construction joins (or initializes) the windowing subsystem and then
//! creates the handle; dropping the window destroys the handle and then
//! releases its share of the subsystem, in that order.
//!
//! The handle is never handed out by value. Graphics collaborators borrow it
//! through [`Window::native`], so a surface built from it cannot outlive the
//! window.
//!
//! # Thread Safety
//! `Window` is neither `Send` nor `Sync`: create, query and drop it on the
//! thread that owns the windowing subsystem (normally the main thread).

use ash::vk;

use crate::config::WindowConfig;
use crate::error::WindowResult;
use crate::glfw_backend::GlfwSystem;
use crate::subsystem::{Subsystem, WindowSystem};

/// A single presentation window
///
/// Not cloneable: one value owns one OS window. Moving the value transfers
/// ownership, so windows can be stored in containers.
pub struct Window<S: WindowSystem = GlfwSystem> {
    width: u32,
    height: u32,
    name: String,
    // `Some` from the end of construction until drop
    handle: Option<S::Handle>,
    subsystem: Subsystem<S>,
}

impl<S: WindowSystem> Window<S> {
    /// Create a window from a configuration
    ///
    /// Zero dimensions are rejected before the subsystem is touched. If the
    /// subsystem cannot be initialized or the handle cannot be created, the
    /// subsystem share acquired so far is released before returning.
    ///
    /// # Errors
    /// Returns [`WindowError::InvalidDimensions`](crate::WindowError::InvalidDimensions),
    /// [`WindowError::InitializationFailed`](crate::WindowError::InitializationFailed) or
    /// [`WindowError::CreationFailed`](crate::WindowError::CreationFailed).
    pub fn from_config(config: &WindowConfig) -> WindowResult<Self> {
        config.validate()?;

        let subsystem = Subsystem::<S>::acquire()?;
        let handle = subsystem.system_mut().create_window(config)?;
        log::debug!(
            "Created {}x{} window '{}'",
            config.width,
            config.height,
            config.title
        );

        Ok(Self {
            width: config.width,
            height: config.height,
            name: config.title.clone(),
            handle: Some(handle),
            subsystem,
        })
    }

    /// Whether the user has asked for this window to close
    pub fn should_close(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| self.subsystem.system().should_close(handle))
    }

    /// Process pending platform events
    ///
    /// Call once per frame; close requests only become visible to
    /// [`Window::should_close`] after the subsystem has processed them.
    pub fn poll_events(&self) {
        self.subsystem.system_mut().poll_events();
    }

    /// Width in pixels requested at creation
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels requested at creation
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Window title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Window size as a Vulkan extent
    pub fn extent(&self) -> vk::Extent2D {
        vk::Extent2D {
            width: self.width,
            height: self.height,
        }
    }

    /// Borrow the native window handle
    pub fn native(&self) -> &S::Handle {
        match &self.handle {
            Some(handle) => handle,
            None => unreachable!("window handle is only released in drop"),
        }
    }

    pub(crate) fn native_mut(&mut self) -> &mut S::Handle {
        match &mut self.handle {
            Some(handle) => handle,
            None => unreachable!("window handle is only released in drop"),
        }
    }

    pub(crate) fn subsystem(&self) -> &Subsystem<S> {
        &self.subsystem
    }
}

impl<S: WindowSystem> Drop for Window<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.subsystem.system_mut().destroy_window(handle);
            log::debug!("Destroyed window '{}'", self.name);
        }
        // `subsystem` drops after this, releasing the share
    }
}

impl<S: WindowSystem> std::fmt::Debug for Window<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
