//! Native layer using GLFW
//!
//! GLFW hands out one event receiver per window. This layer owns those
//! receivers and merges them into the single ordered queue the engine
//! drains each frame.

use std::collections::{HashMap, VecDeque};

use glfw::{Action, Glfw, GlfwReceiver, PWindow, WindowEvent, WindowMode};

use super::{NativeError, NativePlatform, Subsystems};
use crate::events::{EventKind, PlatformEvent};
use crate::platform::host_platform_name;
use crate::window::WindowHandle;

/// GLFW-backed [`NativePlatform`]
#[derive(Default)]
pub struct GlfwPlatform {
    glfw: Option<Glfw>,
    receivers: Vec<(WindowHandle, GlfwReceiver<(f64, WindowEvent)>)>,
    pending: VecDeque<PlatformEvent>,
    hints: HashMap<String, String>,
    pumped: bool,
}

impl GlfwPlatform {
    /// Uninitialized layer; the engine calls `init` during configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window whose events flow through this layer
    ///
    /// The returned handle is the routing key to report from
    /// [`crate::window::Window::handle`].
    pub fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<(WindowHandle, PWindow), NativeError> {
        let glfw = self
            .glfw
            .as_mut()
            .ok_or_else(|| NativeError::Failed("GLFW is not initialized".to_string()))?;

        let (mut window, events) = glfw
            .create_window(width, height, title, WindowMode::Windowed)
            .ok_or_else(|| NativeError::Failed(format!("Window creation failed: {title}")))?;
        window.set_all_polling(true);

        let handle = WindowHandle::new(window.window_ptr() as usize as u64);
        self.receivers.push((handle, events));
        log::debug!("Created GLFW window {} '{}' ({}x{})", handle, title, width, height);
        Ok((handle, window))
    }

    /// Value of a hint recorded by `set_hint`
    pub fn hint(&self, name: &str) -> Option<&str> {
        self.hints.get(name).map(String::as_str)
    }

    /// Pump the OS once and collect every window's events in timestamp order
    fn pump(&mut self) {
        let Some(glfw) = self.glfw.as_mut() else {
            return;
        };
        glfw.poll_events();

        let mut batch: Vec<PlatformEvent> = Vec::new();
        for (handle, receiver) in &self.receivers {
            for (timestamp, event) in glfw::flush_messages(receiver) {
                batch.push(PlatformEvent::for_window(*handle, translate(event)).with_timestamp(timestamp));
            }
        }
        batch.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        self.pending.extend(batch);
    }
}

impl NativePlatform for GlfwPlatform {
    fn platform_name(&mut self) -> Result<String, NativeError> {
        // GLFW is linked in, so there is no library to go missing here.
        Ok(host_platform_name().to_string())
    }

    fn set_hint(&mut self, name: &str, value: &str) -> bool {
        log::debug!("GLFW has no native hint {}; recorded {}={}", name, name, value);
        self.hints.insert(name.to_string(), value.to_string());
        false
    }

    fn init(&mut self, subsystems: Subsystems) -> Result<(), NativeError> {
        if self.glfw.is_some() {
            return Ok(());
        }

        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| NativeError::Failed(format!("GLFW initialization failed: {e:?}")))?;

        if subsystems.contains(Subsystems::HAPTIC) {
            log::debug!("GLFW has no haptic subsystem; force feedback unavailable");
        }
        log::info!("GLFW {} initialized", glfw::get_version_string());

        self.glfw = Some(glfw);
        Ok(())
    }

    fn disable_screen_saver(&mut self) {
        log::debug!("GLFW does not expose screen saver control");
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if !self.pumped {
            self.pump();
            self.pumped = true;
        }

        let event = self.pending.pop_front();
        if event.is_none() {
            self.pumped = false;
        }
        event
    }

    fn quit(&mut self) {
        self.receivers.clear();
        self.pending.clear();
        self.glfw = None;
        self.pumped = false;
    }
}

/// GLFW event to engine event
fn translate(event: WindowEvent) -> EventKind {
    match event {
        WindowEvent::Close => EventKind::CloseRequested,
        WindowEvent::Size(width, height) => EventKind::Resized {
            width: u32::try_from(width).unwrap_or(0),
            height: u32::try_from(height).unwrap_or(0),
        },
        WindowEvent::Pos(x, y) => EventKind::Moved { x, y },
        WindowEvent::Focus(true) => EventKind::FocusGained,
        WindowEvent::Focus(false) => EventKind::FocusLost,
        WindowEvent::Iconify(true) => EventKind::Minimized,
        WindowEvent::Iconify(false) => EventKind::Restored,
        WindowEvent::Refresh => EventKind::Refresh,
        WindowEvent::Key(key, scancode, action, _) => EventKind::Key {
            key: key as i32,
            scancode,
            pressed: action != Action::Release,
            repeat: action == Action::Repeat,
        },
        WindowEvent::Char(c) => EventKind::Text(c),
        WindowEvent::CursorPos(x, y) => EventKind::MouseMoved { x, y },
        WindowEvent::MouseButton(button, action, _) => EventKind::MouseButton {
            button: u8::try_from(button as i32).unwrap_or(u8::MAX),
            pressed: action == Action::Press,
        },
        WindowEvent::Scroll(delta_x, delta_y) => EventKind::MouseWheel { delta_x, delta_y },
        WindowEvent::CursorEnter(entered) => EventKind::CursorEntered(entered),
        _ => EventKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_window_events() {
        assert_eq!(translate(WindowEvent::Close), EventKind::CloseRequested);
        assert_eq!(translate(WindowEvent::Size(800, -1)), EventKind::Resized { width: 800, height: 0 });
        assert_eq!(translate(WindowEvent::Focus(false)), EventKind::FocusLost);
        assert_eq!(translate(WindowEvent::Scroll(0.0, -1.0)), EventKind::MouseWheel { delta_x: 0.0, delta_y: -1.0 });
    }

    #[test]
    fn test_translate_input() {
        match translate(WindowEvent::Key(glfw::Key::Escape, 9, Action::Repeat, glfw::Modifiers::empty())) {
            EventKind::Key { key, scancode, pressed, repeat } => {
                assert_eq!(key, glfw::Key::Escape as i32);
                assert_eq!(scancode, 9);
                assert!(pressed);
                assert!(repeat);
            }
            other => panic!("unexpected kind: {other:?}"),
        }

        assert_eq!(
            translate(WindowEvent::MouseButton(glfw::MouseButton::Button2, Action::Release, glfw::Modifiers::empty())),
            EventKind::MouseButton { button: 1, pressed: false }
        );
    }

    #[test]
    fn test_uninitialized_layer_is_quiet() {
        let mut native = GlfwPlatform::new();
        assert!(native.poll_event().is_none());
        assert!(native.create_window("x", 1, 1).is_err());
        assert!(!native.set_hint("H", "1"));
        assert_eq!(native.hint("H"), Some("1"));
    }
}
