//! Ordered, append-only window registry

use std::rc::{Rc, Weak};
use std::cell::RefCell;

use super::{SharedWindow, Window, WindowHandle};

/// Windows the event pump routes to, in registration order
///
/// Entries are weak: the application keeps the strong reference and
/// destroying the window is its business. A destroyed window's slot stays
/// in place and is skipped when routing.
#[derive(Default)]
pub struct WindowRegistry {
    entries: Vec<Weak<RefCell<dyn Window>>>,
}

impl WindowRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a window
    ///
    /// Handles must be unique among running windows. Registering a second
    /// running window under a live handle is a caller bug and trips a debug
    /// assertion; release builds keep the first registration as the target.
    pub fn register(&mut self, window: SharedWindow) {
        if let Ok(new_window) = window.try_borrow() {
            let handle = new_window.handle();
            let duplicate = new_window.is_running() && self.has_running(handle);
            debug_assert!(!duplicate, "window handle {handle} is already registered");
            if duplicate {
                log::warn!("Window handle {} registered twice", handle);
            }
            log::debug!("Registered window {} (slot {})", handle, self.entries.len());
        }

        self.entries.push(Rc::downgrade(&window));
    }

    /// Number of registration slots, including destroyed windows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was ever registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live windows in registration order
    pub fn candidates(&self) -> impl Iterator<Item = SharedWindow> + '_ {
        self.entries.iter().filter_map(Weak::upgrade)
    }

    /// First running window with `handle`, in registration order
    pub fn find_target(&self, handle: WindowHandle) -> Option<SharedWindow> {
        self.candidates().find(|candidate| {
            candidate
                .try_borrow()
                .is_ok_and(|window| window.is_running() && window.handle() == handle)
        })
    }

    /// Whether a running window currently owns `handle`
    pub fn has_running(&self, handle: WindowHandle) -> bool {
        self.find_target(handle).is_some()
    }

    /// Number of windows still alive and running
    pub fn running_count(&self) -> usize {
        self.candidates()
            .filter(|candidate| candidate.try_borrow().is_ok_and(|window| window.is_running()))
            .count()
    }
}
