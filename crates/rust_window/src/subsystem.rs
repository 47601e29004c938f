//! Shared windowing subsystem lifetime
//!
//! Windowing subsystems such as GLFW keep process-wide state that must be
//! initialized before the first window is created and terminated only after
//! the last one is gone. [`Subsystem`] is a reference-counted share of that
//! state: the first [`Subsystem::acquire`] on a thread initializes the
//! backend, later calls join the live instance, and dropping the last share
//! drops the backend value, which tears the subsystem down.
//!
//! # Thread Safety
//! Shares are `!Send` and `!Sync`. The registry is thread-local, so the thread
//! that creates the first window owns the subsystem for as long as any window
//! exists, matching the main-thread requirement of platform windowing APIs.

use std::any::{Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::config::WindowConfig;
use crate::error::WindowResult;

/// Backend contract for a platform windowing subsystem
///
/// Implementations own the subsystem's global state. Dropping the value must
/// terminate the subsystem, so a backend is only ever dropped after every
/// handle it produced has been passed to [`WindowSystem::destroy_window`].
pub trait WindowSystem: Sized + 'static {
    /// Opaque window resource produced by this subsystem
    type Handle;

    /// Initialize the subsystem
    ///
    /// # Errors
    /// Returns [`WindowError::InitializationFailed`](crate::WindowError::InitializationFailed)
    /// when no display or platform backend is available.
    fn init() -> WindowResult<Self>;

    /// Create a window for an already validated configuration
    ///
    /// Implementations apply their creation hints here: no client graphics
    /// API, and resizability as requested.
    ///
    /// # Errors
    /// Returns [`WindowError::CreationFailed`](crate::WindowError::CreationFailed)
    /// if the platform refuses the window.
    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<Self::Handle>;

    /// Destroy a window produced by [`WindowSystem::create_window`]
    fn destroy_window(&mut self, handle: Self::Handle);

    /// Whether the user asked for this window to close
    fn should_close(&self, handle: &Self::Handle) -> bool;

    /// Process pending platform events, updating close flags
    fn poll_events(&mut self);
}

thread_local! {
    static REGISTRY: RefCell<HashMap<TypeId, Weak<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Reference-counted share of an initialized windowing subsystem
pub struct Subsystem<S: WindowSystem> {
    system: Rc<RefCell<S>>,
}

impl<S: WindowSystem> Subsystem<S> {
    /// Join the live subsystem on this thread, initializing it if needed
    ///
    /// # Errors
    /// Propagates the error from [`WindowSystem::init`]; nothing is
    /// registered in that case.
    pub fn acquire() -> WindowResult<Self> {
        REGISTRY.with(|registry| {
            let mut registry = registry.borrow_mut();
            let key = TypeId::of::<S>();

            let live = registry
                .get(&key)
                .and_then(Weak::upgrade)
                .and_then(|shared| shared.downcast::<RefCell<S>>().ok());
            if let Some(system) = live {
                log::trace!("Joining live windowing subsystem ({} holders)", Rc::strong_count(&system));
                return Ok(Self { system });
            }

            let system = Rc::new(RefCell::new(S::init()?));
            let weak: Weak<dyn Any> = Rc::<RefCell<S>>::downgrade(&system);
            registry.insert(key, weak);
            log::debug!("Windowing subsystem initialized");

            Ok(Self { system })
        })
    }

    /// Whether a subsystem of this type is live on the current thread
    pub fn is_active() -> bool {
        REGISTRY.with(|registry| {
            registry
                .borrow()
                .get(&TypeId::of::<S>())
                .is_some_and(|weak| weak.strong_count() > 0)
        })
    }

    /// Number of shares currently holding the subsystem open
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.system)
    }

    /// Borrow the backend
    pub fn system(&self) -> Ref<'_, S> {
        self.system.borrow()
    }

    /// Mutably borrow the backend
    pub fn system_mut(&self) -> RefMut<'_, S> {
        self.system.borrow_mut()
    }
}

impl<S: WindowSystem> Drop for Subsystem<S> {
    fn drop(&mut self) {
        if Rc::strong_count(&self.system) == 1 {
            log::debug!("Last window released, terminating windowing subsystem");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WindowError;
    use std::cell::Cell;

    thread_local! {
        static INITS: Cell<usize> = const { Cell::new(0) };
        static TERMINATIONS: Cell<usize> = const { Cell::new(0) };
        static FAIL_INIT: Cell<bool> = const { Cell::new(false) };
    }

    struct CountingSystem;

    impl WindowSystem for CountingSystem {
        type Handle = ();

        fn init() -> WindowResult<Self> {
            if FAIL_INIT.with(Cell::get) {
                return Err(WindowError::InitializationFailed("refused".into()));
            }
            INITS.with(|c| c.set(c.get() + 1));
            Ok(Self)
        }

        fn create_window(&mut self, _config: &WindowConfig) -> WindowResult<()> {
            Ok(())
        }

        fn destroy_window(&mut self, _handle: ()) {}

        fn should_close(&self, _handle: &()) -> bool {
            false
        }

        fn poll_events(&mut self) {}
    }

    impl Drop for CountingSystem {
        fn drop(&mut self) {
            TERMINATIONS.with(|c| c.set(c.get() + 1));
        }
    }

    fn counts() -> (usize, usize) {
        (INITS.with(Cell::get), TERMINATIONS.with(Cell::get))
    }

    #[test]
    fn test_shares_initialize_once() {
        let (inits, terms) = counts();

        let first = Subsystem::<CountingSystem>::acquire().unwrap();
        let second = Subsystem::<CountingSystem>::acquire().unwrap();
        assert_eq!(counts(), (inits + 1, terms));
        assert_eq!(first.holders(), 2);
        assert!(Subsystem::<CountingSystem>::is_active());

        drop(first);
        assert_eq!(counts(), (inits + 1, terms));
        assert_eq!(second.holders(), 1);

        drop(second);
        assert_eq!(counts(), (inits + 1, terms + 1));
        assert!(!Subsystem::<CountingSystem>::is_active());
    }

    #[test]
    fn test_reacquire_after_release_reinitializes() {
        let (inits, terms) = counts();

        drop(Subsystem::<CountingSystem>::acquire().unwrap());
        drop(Subsystem::<CountingSystem>::acquire().unwrap());

        assert_eq!(counts(), (inits + 2, terms + 2));
    }

    #[test]
    fn test_failed_init_leaves_nothing_registered() {
        FAIL_INIT.with(|f| f.set(true));
        let result = Subsystem::<CountingSystem>::acquire();
        FAIL_INIT.with(|f| f.set(false));

        assert!(matches!(result, Err(WindowError::InitializationFailed(_))));
        assert!(!Subsystem::<CountingSystem>::is_active());
    }
}
