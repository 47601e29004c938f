//! Headless windowing backend
//!
//! An in-memory [`WindowSystem`] for machines without a display and for
//! exercising render-loop drivers in tests. The "display" is thread-local:
//! each thread sees its own set of windows, close flags and counters.
//!
//! User interaction is simulated with [`request_close`]. Lifecycle misuse
//! (destroying a window twice, terminating the display while windows are
//! open, creating a window on a terminated display) is recorded in
//! [`DisplayStats`] rather than tolerated silently.
//!
//! With the `testing` feature, environment failures can be injected through
//! `set_display_available` and `fail_next_window`.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::WindowConfig;
use crate::error::{WindowError, WindowResult};
use crate::subsystem::WindowSystem;
use crate::window::Window;

/// A window backed by the headless subsystem
pub type HeadlessWindow = Window<HeadlessSystem>;

/// Lifecycle counters of the headless display on this thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayStats {
    /// Subsystem initializations
    pub inits: usize,
    /// Subsystem terminations
    pub terminations: usize,
    /// Terminations that found windows still open
    pub terminations_with_live_windows: usize,
    /// Windows created
    pub windows_created: usize,
    /// Windows destroyed
    pub windows_destroyed: usize,
    /// Destroy calls for windows that were no longer alive
    pub double_destroys: usize,
    /// Creation attempts while the display was not initialized
    pub creates_before_init: usize,
}

#[derive(Default)]
struct Display {
    unavailable: bool,
    reject_next_window: bool,
    initialized: bool,
    next_id: u64,
    windows: HashMap<u64, HeadlessSurface>,
    stats: DisplayStats,
}

struct HeadlessSurface {
    config: WindowConfig,
    close_requested: bool,
}

thread_local! {
    static DISPLAY: RefCell<Display> = RefCell::new(Display::default());
}

/// Headless windowing subsystem
///
/// Only constructible through [`WindowSystem::init`]; dropping it marks the
/// display as terminated.
#[derive(Debug)]
pub struct HeadlessSystem {
    _private: (),
}

/// Opaque identifier of a headless window
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct HeadlessHandle {
    id: u64,
}

impl HeadlessHandle {
    /// Numeric identifier, unique per thread
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl WindowSystem for HeadlessSystem {
    type Handle = HeadlessHandle;

    fn init() -> WindowResult<Self> {
        DISPLAY.with(|display| {
            let mut display = display.borrow_mut();
            if display.unavailable {
                return Err(WindowError::InitializationFailed(
                    "no headless display available".to_string(),
                ));
            }
            display.initialized = true;
            display.stats.inits += 1;
            Ok(Self { _private: () })
        })
    }

    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<HeadlessHandle> {
        DISPLAY.with(|display| {
            let mut display = display.borrow_mut();
            if !display.initialized {
                display.stats.creates_before_init += 1;
                return Err(WindowError::CreationFailed(
                    "headless display is not initialized".to_string(),
                ));
            }
            if std::mem::take(&mut display.reject_next_window) {
                return Err(WindowError::CreationFailed(format!(
                    "headless display rejected {}x{} window",
                    config.width, config.height
                )));
            }

            display.stats.windows_created += 1;
            display.next_id += 1;
            let id = display.next_id;
            display.windows.insert(
                id,
                HeadlessSurface {
                    config: config.clone(),
                    close_requested: false,
                },
            );
            Ok(HeadlessHandle { id })
        })
    }

    fn destroy_window(&mut self, handle: HeadlessHandle) {
        DISPLAY.with(|display| {
            let mut display = display.borrow_mut();
            if display.windows.remove(&handle.id).is_some() {
                display.stats.windows_destroyed += 1;
            } else {
                log::warn!("Headless window {} destroyed twice", handle.id);
                display.stats.double_destroys += 1;
            }
        });
    }

    fn should_close(&self, handle: &HeadlessHandle) -> bool {
        DISPLAY.with(|display| {
            display
                .borrow()
                .windows
                .get(&handle.id)
                .map_or(true, |surface| surface.close_requested)
        })
    }

    fn poll_events(&mut self) {}
}

impl Drop for HeadlessSystem {
    fn drop(&mut self) {
        DISPLAY.with(|display| {
            let mut display = display.borrow_mut();
            if !display.windows.is_empty() {
                log::warn!(
                    "Headless display terminated with {} live windows",
                    display.windows.len()
                );
                display.windows.clear();
                display.stats.terminations_with_live_windows += 1;
            }
            display.initialized = false;
            display.stats.terminations += 1;
        });
    }
}

/// Simulate the user clicking the window's close control
pub fn request_close(window: &HeadlessWindow) {
    let id = window.native().id;
    DISPLAY.with(|display| {
        if let Some(surface) = display.borrow_mut().windows.get_mut(&id) {
            surface.close_requested = true;
        }
    });
}

/// Number of headless windows currently alive on this thread
pub fn live_window_count() -> usize {
    DISPLAY.with(|display| display.borrow().windows.len())
}

/// Whether the headless subsystem is initialized on this thread
pub fn is_initialized() -> bool {
    DISPLAY.with(|display| display.borrow().initialized)
}

/// Lifecycle counters accumulated on this thread
pub fn stats() -> DisplayStats {
    DISPLAY.with(|display| display.borrow().stats)
}

/// Title and size the subsystem recorded for a live window
pub fn surface_config(window: &HeadlessWindow) -> Option<WindowConfig> {
    let id = window.native().id;
    DISPLAY.with(|display| {
        display
            .borrow()
            .windows
            .get(&id)
            .map(|surface| surface.config.clone())
    })
}

/// Make subsystem initialization fail as if no display were attached
#[cfg(any(test, feature = "testing"))]
pub fn set_display_available(available: bool) {
    DISPLAY.with(|display| display.borrow_mut().unavailable = !available);
}

/// Make the next window creation on this thread fail
#[cfg(any(test, feature = "testing"))]
pub fn fail_next_window() {
    DISPLAY.with(|display| display.borrow_mut().reject_next_window = true);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_request_targets_single_window() {
        let first = HeadlessWindow::from_config(&WindowConfig::new(320, 240, "first")).unwrap();
        let second = HeadlessWindow::from_config(&WindowConfig::new(320, 240, "second")).unwrap();

        request_close(&first);

        assert!(first.should_close());
        assert!(!second.should_close());
    }

    #[test]
    fn test_surface_records_creation_parameters() {
        let window = HeadlessWindow::from_config(&WindowConfig::new(1024, 768, "Recorded")).unwrap();
        let config = surface_config(&window).unwrap();
        assert_eq!(config, WindowConfig::new(1024, 768, "Recorded"));
    }

    #[test]
    fn test_fail_next_window_is_one_shot() {
        fail_next_window();
        assert!(HeadlessWindow::from_config(&WindowConfig::default()).is_err());
        assert!(HeadlessWindow::from_config(&WindowConfig::default()).is_ok());
    }

    #[test]
    fn test_handle_ids_are_unique() {
        let a = HeadlessWindow::from_config(&WindowConfig::default()).unwrap();
        let b = HeadlessWindow::from_config(&WindowConfig::default()).unwrap();
        assert_ne!(a.native().id(), b.native().id());
    }

    #[test]
    fn test_create_on_terminated_display_fails() {
        let before = stats();
        let mut stale = HeadlessSystem { _private: () };
        assert!(!is_initialized());

        let err = stale.create_window(&WindowConfig::default()).unwrap_err();

        assert!(matches!(err, WindowError::CreationFailed(_)));
        assert_eq!(stats().creates_before_init, before.creates_before_init + 1);
        assert_eq!(stats().windows_created, before.windows_created);
        assert_eq!(live_window_count(), 0);
    }

    #[test]
    fn test_double_destroy_is_recorded() {
        let before = stats();
        let mut system = HeadlessSystem::init().unwrap();
        let handle = system.create_window(&WindowConfig::default()).unwrap();
        let id = handle.id();

        system.destroy_window(handle);
        system.destroy_window(HeadlessHandle { id });
        drop(system);

        let after = stats();
        assert_eq!(after.windows_destroyed, before.windows_destroyed + 1);
        assert_eq!(after.double_destroys, before.double_destroys + 1);
        assert_eq!(after.terminations_with_live_windows, before.terminations_with_live_windows);
    }

    #[test]
    fn test_terminate_with_open_window_is_recorded() {
        let before = stats();
        let mut system = HeadlessSystem::init().unwrap();
        let _leaked = system.create_window(&WindowConfig::default()).unwrap();

        drop(system);

        let after = stats();
        assert_eq!(
            after.terminations_with_live_windows,
            before.terminations_with_live_windows + 1
        );
        assert_eq!(live_window_count(), 0);
        assert!(!is_initialized());
    }
}
