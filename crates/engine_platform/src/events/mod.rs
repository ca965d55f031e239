//! Per-frame native event pump
//!
//! Key principles:
//! - Drain only what is pending (never wait for new events)
//! - Deliver in native order
//! - Each event reaches at most one window: the first running window,
//!   in registration order, whose handle matches
//! - Unrouted events are dropped; that is normal operation, not an error
//!
//! Routing is a linear scan of the registry per event. Engines open a
//! handful of windows, so a handle-indexed map would not pay for itself.

use crate::native::NativePlatform;
use crate::window::{WindowHandle, WindowRegistry};

/// What happened, as far as the native layer tells us
///
/// The pump never looks at this; it only routes on [`PlatformEvent::window`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// User asked the window to close
    CloseRequested,
    /// Client area resized
    Resized {
        /// New width in screen coordinates
        width: u32,
        /// New height in screen coordinates
        height: u32,
    },
    /// Window moved
    Moved {
        /// New X position
        x: i32,
        /// New Y position
        y: i32,
    },
    /// Window gained input focus
    FocusGained,
    /// Window lost input focus
    FocusLost,
    /// Window was minimized
    Minimized,
    /// Window was restored from minimized or maximized
    Restored,
    /// Contents need repainting
    Refresh,
    /// Keyboard key
    Key {
        /// Native key code
        key: i32,
        /// Platform scancode
        scancode: i32,
        /// Pressed (true) or released (false)
        pressed: bool,
        /// Auto-repeat of a held key
        repeat: bool,
    },
    /// Text input
    Text(char),
    /// Cursor moved inside the window
    MouseMoved {
        /// X in window coordinates
        x: f64,
        /// Y in window coordinates
        y: f64,
    },
    /// Mouse button
    MouseButton {
        /// Native button index
        button: u8,
        /// Pressed (true) or released (false)
        pressed: bool,
    },
    /// Scroll wheel or trackpad scroll
    MouseWheel {
        /// Horizontal delta
        delta_x: f64,
        /// Vertical delta
        delta_y: f64,
    },
    /// Cursor entered (true) or left (false) the window
    CursorEntered(bool),
    /// Anything the native layer does not translate
    Other,
}

/// One unit of native activity
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformEvent {
    /// Target window, `None` for events not tied to a window
    pub window: Option<WindowHandle>,
    /// Native timestamp in seconds
    pub timestamp: f64,
    /// Payload
    pub kind: EventKind,
}

impl PlatformEvent {
    /// Event aimed at `window`
    pub const fn for_window(window: WindowHandle, kind: EventKind) -> Self {
        Self {
            window: Some(window),
            timestamp: 0.0,
            kind,
        }
    }

    /// Event with no target window
    pub const fn global(kind: EventKind) -> Self {
        Self {
            window: None,
            timestamp: 0.0,
            kind,
        }
    }

    /// Attach a native timestamp (builder pattern)
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Counters for one [`EventPump::poll_once`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Events delivered to a window
    pub dispatched: usize,
    /// Events no running window claimed
    pub dropped: usize,
}

impl DispatchStats {
    /// Events drained from the native queue
    pub const fn total(&self) -> usize {
        self.dispatched + self.dropped
    }
}

/// Drains the native queue and routes events to windows
///
/// Holds no state; everything lives in the registry and the native queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventPump;

impl EventPump {
    /// Drain every pending event and dispatch each one
    pub fn poll_once(native: &mut dyn NativePlatform, windows: &WindowRegistry) -> DispatchStats {
        let mut stats = DispatchStats::default();

        while let Some(event) = native.poll_event() {
            if Self::dispatch(&event, windows) {
                stats.dispatched += 1;
            } else {
                stats.dropped += 1;
            }
        }

        if stats.dropped > 0 {
            log::trace!("Dropped {} unrouted event(s)", stats.dropped);
        }
        stats
    }

    /// Deliver `event` to its owning window, returning whether one took it
    ///
    /// A window the application is still borrowing cannot take the event.
    /// If that window may be the target, the event is dropped rather than
    /// handed to a later entry.
    pub fn dispatch(event: &PlatformEvent, windows: &WindowRegistry) -> bool {
        let Some(target) = event.window else {
            return false;
        };

        for candidate in windows.candidates() {
            if let Ok(mut window) = candidate.try_borrow_mut() {
                if window.is_running() && window.handle() == target {
                    window.process_event(event);
                    return true;
                }
                continue;
            }

            let owns_target = candidate
                .try_borrow()
                .map_or(true, |window| window.is_running() && window.handle() == target);
            if owns_target {
                log::trace!("Window for {} is busy; dropping event", target);
                return false;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::HeadlessPlatform;
    use crate::window::Window;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestWindow {
        handle: WindowHandle,
        running: bool,
        received: Vec<EventKind>,
    }

    impl TestWindow {
        fn shared(handle: u64, running: bool) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self {
                handle: WindowHandle::new(handle),
                running,
                received: Vec::new(),
            }))
        }
    }

    impl Window for TestWindow {
        fn handle(&self) -> WindowHandle {
            self.handle
        }

        fn is_running(&self) -> bool {
            self.running
        }

        fn process_event(&mut self, event: &PlatformEvent) {
            self.received.push(event.kind.clone());
            if event.kind == EventKind::CloseRequested {
                self.running = false;
            }
        }
    }

    fn event_for(handle: u64, kind: EventKind) -> PlatformEvent {
        PlatformEvent::for_window(WindowHandle::new(handle), kind)
    }

    #[test]
    fn test_empty_registry_drops_everything() {
        let mut native = HeadlessPlatform::new("Linux");
        for handle in 1..=5 {
            native.push_event(event_for(handle, EventKind::Refresh));
        }
        let windows = WindowRegistry::new();

        let stats = EventPump::poll_once(&mut native, &windows);

        assert_eq!(stats, DispatchStats { dispatched: 0, dropped: 5 });
        assert_eq!(native.pending_events(), 0);
    }

    #[test]
    fn test_empty_queue_is_a_no_op() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, true);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());

        let stats = EventPump::poll_once(&mut native, &windows);

        assert_eq!(stats.total(), 0);
        assert!(a.borrow().received.is_empty());
    }

    #[test]
    fn test_event_reaches_only_its_window() {
        let mut native = HeadlessPlatform::new("Linux");
        let (a, b, c) = (
            TestWindow::shared(10, true),
            TestWindow::shared(20, true),
            TestWindow::shared(30, true),
        );
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());
        windows.register(b.clone());
        windows.register(c.clone());

        native.push_event(event_for(20, EventKind::FocusGained));
        let stats = EventPump::poll_once(&mut native, &windows);

        assert_eq!(stats.dispatched, 1);
        assert_eq!(b.borrow().received, vec![EventKind::FocusGained]);
        assert!(a.borrow().received.is_empty());
        assert!(c.borrow().received.is_empty());
    }

    #[test]
    fn test_unknown_handle_is_dropped() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, true);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());

        native.push_event(event_for(99, EventKind::Refresh));
        let stats = EventPump::poll_once(&mut native, &windows);

        assert_eq!(stats, DispatchStats { dispatched: 0, dropped: 1 });
        assert!(a.borrow().received.is_empty());
    }

    #[test]
    fn test_stopped_window_receives_nothing() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, false);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());

        native.push_event(event_for(1, EventKind::Refresh));
        let stats = EventPump::poll_once(&mut native, &windows);

        assert_eq!(stats.dropped, 1);
        assert!(a.borrow().received.is_empty());
    }

    #[test]
    fn test_trailing_events_after_close_are_dropped() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, true);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());

        native.push_events([
            event_for(1, EventKind::CloseRequested),
            event_for(1, EventKind::FocusLost),
            event_for(1, EventKind::Refresh),
        ]);
        let stats = EventPump::poll_once(&mut native, &windows);

        assert_eq!(stats, DispatchStats { dispatched: 1, dropped: 2 });
        assert_eq!(a.borrow().received, vec![EventKind::CloseRequested]);
    }

    #[test]
    fn test_events_keep_native_order() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, true);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());

        native.push_events([
            event_for(1, EventKind::MouseMoved { x: 1.0, y: 2.0 }),
            event_for(1, EventKind::MouseButton { button: 0, pressed: true }),
            event_for(1, EventKind::MouseButton { button: 0, pressed: false }),
        ]);
        EventPump::poll_once(&mut native, &windows);

        assert_eq!(
            a.borrow().received,
            vec![
                EventKind::MouseMoved { x: 1.0, y: 2.0 },
                EventKind::MouseButton { button: 0, pressed: true },
                EventKind::MouseButton { button: 0, pressed: false },
            ]
        );
    }

    #[test]
    fn test_windowless_events_are_dropped() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, true);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());

        native.push_event(PlatformEvent::global(EventKind::Other));
        let stats = EventPump::poll_once(&mut native, &windows);

        assert_eq!(stats.dropped, 1);
        assert!(a.borrow().received.is_empty());
    }

    #[test]
    fn test_window_borrowed_by_caller_drops_event() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, true);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());

        native.push_event(event_for(1, EventKind::Refresh));
        let held = a.borrow();
        let stats = EventPump::poll_once(&mut native, &windows);
        drop(held);

        assert_eq!(stats, DispatchStats { dispatched: 0, dropped: 1 });
        assert!(a.borrow().received.is_empty());
    }

    #[test]
    fn test_window_mutably_borrowed_by_caller_drops_event() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, true);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());

        native.push_event(event_for(1, EventKind::Refresh));
        let held = a.borrow_mut();
        let stats = EventPump::poll_once(&mut native, &windows);
        drop(held);

        assert_eq!(stats, DispatchStats { dispatched: 0, dropped: 1 });
        assert!(a.borrow().received.is_empty());
    }

    #[test]
    fn test_busy_window_does_not_block_others() {
        let mut native = HeadlessPlatform::new("Linux");
        let (a, b) = (TestWindow::shared(1, true), TestWindow::shared(2, true));
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());
        windows.register(b.clone());

        native.push_event(event_for(2, EventKind::FocusGained));
        let held = a.borrow();
        let stats = EventPump::poll_once(&mut native, &windows);
        drop(held);

        assert_eq!(stats.dispatched, 1);
        assert_eq!(b.borrow().received, vec![EventKind::FocusGained]);
    }

    #[test]
    fn test_dropped_window_is_skipped() {
        let mut native = HeadlessPlatform::new("Linux");
        let a = TestWindow::shared(1, true);
        let mut windows = WindowRegistry::new();
        windows.register(a.clone());
        drop(a);

        native.push_event(event_for(1, EventKind::Refresh));
        let stats = EventPump::poll_once(&mut native, &windows);

        assert_eq!(stats.dropped, 1);
        assert_eq!(windows.len(), 1);
    }
}
