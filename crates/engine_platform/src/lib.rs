//! # Engine Platform
//!
//! Process-wide engine bootstrap and per-window event dispatch.
//!
//! ## Features
//!
//! - **Platform Detection**: Classifies the host reported by the native layer
//! - **Backend Validation**: Declarative OS/backend compatibility table
//! - **Platform Quirks**: Global mouse capability and debugger workarounds
//! - **Subsystem Bring-up**: Video, joystick, controller and haptic in one step
//! - **Event Routing**: Each native event reaches exactly one owning window
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use engine_platform::prelude::*;
//!
//! struct GameWindow {
//!     handle: WindowHandle,
//!     running: bool,
//! }
//!
//! impl Window for GameWindow {
//!     fn handle(&self) -> WindowHandle {
//!         self.handle
//!     }
//!
//!     fn is_running(&self) -> bool {
//!         self.running
//!     }
//!
//!     fn process_event(&mut self, event: &PlatformEvent) {
//!         if matches!(event.kind, EventKind::CloseRequested) {
//!             self.running = false;
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::new(HeadlessPlatform::new("Linux"));
//!     engine.configure(Backend::OpenGl)?;
//!
//!     let window = Rc::new(RefCell::new(GameWindow { handle: WindowHandle::new(1), running: true }));
//!     engine.windows_mut().register(window.clone());
//!
//!     while window.borrow().running {
//!         engine.poll_events();
//!     }
//!
//!     engine.quit();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod events;
pub mod foundation;
pub mod native;
pub mod platform;
pub mod window;

mod engine;

pub use engine::{Engine, EngineError, PlatformState};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineError, PlatformState,
        core::config::EngineConfig,
        events::{DispatchStats, EventKind, EventPump, PlatformEvent},
        native::{HeadlessPlatform, NativeError, NativePlatform, Subsystems},
        platform::{Backend, OperatingSystem},
        window::{SharedWindow, Window, WindowHandle, WindowRegistry},
    };
}
