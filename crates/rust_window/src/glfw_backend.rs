//! GLFW windowing backend
//!
//! Provides cross-platform window creation for Vulkan presentation. Windows
//! are created without an OpenGL context; the renderer attaches its own
//! surface through [`Window::create_surface`].

use ash::vk;

use crate::config::WindowConfig;
use crate::error::{WindowError, WindowResult};
use crate::subsystem::WindowSystem;
use crate::window::Window;

/// GLFW library state
pub struct GlfwSystem {
    glfw: glfw::Glfw,
}

/// A GLFW window and its event queue
pub struct GlfwHandle {
    window: glfw::PWindow,
    // Kept alive alongside the window; events are not dispatched by this crate
    _events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwHandle {
    /// The underlying GLFW window
    pub fn window(&self) -> &glfw::PWindow {
        &self.window
    }
}

impl GlfwSystem {
    /// Instance extensions Vulkan needs to present to GLFW windows
    ///
    /// # Errors
    /// Returns [`WindowError::VulkanUnsupported`] if GLFW finds no Vulkan loader.
    pub fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or(WindowError::VulkanUnsupported)
    }
}

impl WindowSystem for GlfwSystem {
    type Handle = GlfwHandle;

    fn init() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;
        Ok(Self { glfw })
    }

    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<GlfwHandle> {
        // Configure for Vulkan (no OpenGL context)
        self.glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        self.glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (window, events) = self
            .glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                WindowError::CreationFailed(format!(
                    "GLFW could not create a {}x{} window",
                    config.width, config.height
                ))
            })?;

        Ok(GlfwHandle {
            window,
            _events: events,
        })
    }

    fn destroy_window(&mut self, handle: GlfwHandle) {
        // glfwDestroyWindow runs when the PWindow drops
        drop(handle);
    }

    fn should_close(&self, handle: &GlfwHandle) -> bool {
        handle.window.should_close()
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }
}

impl Window<GlfwSystem> {
    /// Create a GLFW window for Vulkan presentation
    ///
    /// Initializes GLFW if no other window holds it. Must be called on the
    /// main thread.
    ///
    /// # Errors
    /// Returns a creation error (see [`WindowError::is_creation_error`]) if
    /// either dimension is zero, GLFW fails to initialize, or the window
    /// cannot be created.
    pub fn new(width: u32, height: u32, name: &str) -> WindowResult<Self> {
        Self::from_config(&WindowConfig::new(width, height, name))
    }

    /// Get required Vulkan instance extensions from GLFW
    ///
    /// # Errors
    /// Returns [`WindowError::VulkanUnsupported`] if GLFW finds no Vulkan loader.
    pub fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.subsystem().system().required_instance_extensions()
    }

    /// Create a Vulkan surface bound to this window
    ///
    /// The caller owns the returned surface and must destroy it before the
    /// window is dropped.
    ///
    /// # Errors
    /// Returns [`WindowError::SurfaceCreationFailed`] with the Vulkan result
    /// code if GLFW cannot create the surface.
    pub fn create_surface(&mut self, instance: vk::Instance) -> WindowResult<vk::SurfaceKHR> {
        let mut surface = vk::SurfaceKHR::null();
        let result = self
            .native_mut()
            .window
            .create_window_surface(instance, std::ptr::null(), &mut surface);

        if result == vk::Result::SUCCESS {
            log::debug!("Created Vulkan surface for window '{}'", self.name());
            Ok(surface)
        } else {
            Err(WindowError::SurfaceCreationFailed(format!("{result:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "requires a display"]
    fn test_glfw_window_lifecycle() {
        let window = Window::new(800, 600, "Test").unwrap();
        assert!(!window.should_close());
        assert_eq!((window.width(), window.height()), (800, 600));
        drop(window);

        let window = Window::new(640, 480, "Second").unwrap();
        assert!(!window.should_close());
    }

    #[test]
    #[ignore = "requires a display"]
    fn test_glfw_close_request() {
        let mut window = Window::new(320, 240, "Close").unwrap();
        window.native_mut().window.set_should_close(true);
        assert!(window.should_close());
    }

    #[test]
    #[ignore = "requires a display and a Vulkan loader"]
    fn test_required_instance_extensions_include_surface() {
        let window = Window::new(320, 240, "Extensions").unwrap();
        let extensions = window.required_instance_extensions().unwrap();
        assert!(extensions.iter().any(|name| name == "VK_KHR_surface"));
    }

    #[test]
    #[ignore = "requires a display and a Vulkan loader"]
    #[allow(unsafe_code)]
    fn test_create_surface_for_window() {
        use std::ffi::CString;

        let mut window = Window::new(320, 240, "Surface").unwrap();
        let names: Vec<CString> = window
            .required_instance_extensions()
            .unwrap()
            .into_iter()
            .map(|name| CString::new(name).unwrap())
            .collect();
        let name_ptrs: Vec<_> = names.iter().map(|name| name.as_ptr()).collect();

        let entry = unsafe { ash::Entry::load() }.unwrap();
        let create_info = vk::InstanceCreateInfo::builder().enabled_extension_names(&name_ptrs);
        let instance = unsafe { entry.create_instance(&create_info, None) }.unwrap();

        let surface = window.create_surface(instance.handle()).unwrap();
        assert_ne!(surface, vk::SurfaceKHR::null());

        let surface_loader = ash::extensions::khr::Surface::new(&entry, &instance);
        unsafe {
            surface_loader.destroy_surface(surface, None);
            instance.destroy_instance(None);
        }
    }

    #[test]
    fn test_zero_size_rejected_before_glfw_init() {
        let err = Window::new(0, 600, "Zero").unwrap_err();
        assert!(matches!(err, WindowError::InvalidDimensions { width: 0, height: 600 }));
        assert!(!crate::Subsystem::<GlfwSystem>::is_active());
    }
}
