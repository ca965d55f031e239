//! Windows as seen by the event pump
//!
//! The engine does not own windows. An application creates its own window
//! type, implements [`Window`] for it and registers a shared reference in
//! the engine's [`WindowRegistry`]. The pump only asks three things of a
//! window: its native handle, whether it is still running, and to consume
//! one event.
//!
//! # Module Organization
//!
//! - **`registry`**: ordered registration and routing lookup

pub mod registry;

pub use registry::WindowRegistry;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::events::PlatformEvent;

/// Opaque native window identifier, the routing key for events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(u64);

impl WindowHandle {
    /// Wrap a native identifier
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The native identifier
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Event consumer contract for application windows
pub trait Window {
    /// Native handle events are routed on
    fn handle(&self) -> WindowHandle;

    /// Whether the window still accepts events
    fn is_running(&self) -> bool;

    /// Consume one event routed to this window
    fn process_event(&mut self, event: &PlatformEvent);
}

/// Window reference shared between its owner and the registry
pub type SharedWindow = Rc<RefCell<dyn Window>>;
