//! # Rust Window
//!
//! A presentation window for Vulkan renderers, backed by GLFW.
//!
//! A [`Window`] owns one OS-level window. Creating it initializes the
//! windowing subsystem (shared and reference-counted across windows on the
//! same thread); dropping it destroys the window and releases the subsystem
//! once no window needs it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_window::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     let window = Window::new(800, 600, "Hello Vulkan")?;
//!
//!     while !window.should_close() {
//!         window.poll_events();
//!         // render a frame
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing Without a Display
//!
//! The [`headless`] backend implements the same [`WindowSystem`] contract in
//! memory, so render-loop drivers can be exercised in CI.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod glfw_backend;
pub mod headless;
pub mod logging;
pub mod subsystem;
pub mod window;

pub use config::{Config, ConfigError, WindowConfig};
pub use error::{WindowError, WindowResult};
pub use glfw_backend::{GlfwHandle, GlfwSystem};
pub use subsystem::{Subsystem, WindowSystem};
pub use window::Window;

/// Common imports for window users
pub mod prelude {
    pub use crate::{Config, Window, WindowConfig, WindowError, WindowResult};
}
