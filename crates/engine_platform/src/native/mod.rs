//! Native windowing layer seam
//!
//! The engine never talks to a windowing library directly. Everything it
//! needs from one (platform name, hints, subsystem bring-up, the event queue)
//! goes through [`NativePlatform`].
//!
//! # Implementations
//!
//! - **`HeadlessPlatform`**: scripted, windowless; used for tests and servers
//! - **`GlfwPlatform`**: GLFW-backed, behind the `glfw` feature

pub mod headless;

#[cfg(feature = "glfw")]
pub mod glfw_backend;

pub use headless::HeadlessPlatform;

#[cfg(feature = "glfw")]
pub use glfw_backend::GlfwPlatform;

use bitflags::bitflags;
use thiserror::Error;

use crate::events::PlatformEvent;

/// Hint disabling native thread naming (Windows debugger stall workaround)
pub const HINT_WINDOWS_DISABLE_THREAD_NAMING: &str = "WINDOWS_DISABLE_THREAD_NAMING";

bitflags! {
    /// Native subsystems brought up by [`NativePlatform::init`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Subsystems: u32 {
        /// Windows, displays and the event queue
        const VIDEO = 1 << 0;
        /// Raw joystick access
        const JOYSTICK = 1 << 1;
        /// Mapped game controllers
        const GAME_CONTROLLER = 1 << 2;
        /// Force feedback
        const HAPTIC = 1 << 3;

        /// Everything the engine needs at startup
        const ALL = Self::VIDEO.bits()
            | Self::JOYSTICK.bits()
            | Self::GAME_CONTROLLER.bits()
            | Self::HAPTIC.bits();
    }
}

/// Failures reported by a native layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NativeError {
    /// The native library could not be found or loaded
    #[error("native library not found: {0}")]
    LibraryNotFound(String),

    /// The native library was built for another architecture
    #[error("bad image format: {0}")]
    BadImageFormat(String),

    /// Any other native failure, with the layer's own diagnostic
    #[error("{0}")]
    Failed(String),
}

/// Operations the engine needs from a native windowing layer
///
/// All calls happen on the thread that owns the native event queue.
pub trait NativePlatform {
    /// Host platform name as the native layer reports it (`"Windows"`, `"Mac OS X"`, ...)
    ///
    /// This is the first call the engine makes; a missing or mismatched
    /// native library surfaces here.
    fn platform_name(&mut self) -> Result<String, NativeError>;

    /// Tell the native layer the application entry point is ready
    fn set_main_ready(&mut self) {}

    /// Set a named native hint, returning whether the layer accepted it
    fn set_hint(&mut self, name: &str, value: &str) -> bool;

    /// Bring up the requested subsystems as one step
    fn init(&mut self, subsystems: Subsystems) -> Result<(), NativeError>;

    /// Stop the OS screen saver from kicking in
    fn disable_screen_saver(&mut self);

    /// Next pending event, without waiting for new ones
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Tear the native layer down
    fn quit(&mut self);
}

/// Brings up the native subsystems the engine depends on
pub struct SubsystemInitializer {
    subsystems: Subsystems,
    disable_screen_saver: bool,
}

impl SubsystemInitializer {
    /// Initializer for every subsystem, disabling the screen saver afterwards
    pub const fn new() -> Self {
        Self {
            subsystems: Subsystems::ALL,
            disable_screen_saver: true,
        }
    }

    /// Keep or skip the screen saver step
    pub const fn with_screen_saver_disabled(mut self, disabled: bool) -> Self {
        self.disable_screen_saver = disabled;
        self
    }

    /// Initialize, then disable the screen saver
    ///
    /// Returns the native layer's diagnostic on failure; the caller decides
    /// which fatal error it becomes. There is no retry.
    pub fn run(&self, native: &mut dyn NativePlatform) -> Result<(), NativeError> {
        native.init(self.subsystems)?;
        log::info!("Native subsystems initialized: {:?}", self.subsystems);

        if self.disable_screen_saver {
            native.disable_screen_saver();
            log::debug!("Screen saver disabled");
        }
        Ok(())
    }
}

impl Default for SubsystemInitializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_contains_every_subsystem() {
        assert!(Subsystems::ALL.contains(Subsystems::VIDEO));
        assert!(Subsystems::ALL.contains(Subsystems::JOYSTICK));
        assert!(Subsystems::ALL.contains(Subsystems::GAME_CONTROLLER));
        assert!(Subsystems::ALL.contains(Subsystems::HAPTIC));
    }

    #[test]
    fn test_initializer_runs_init_then_screen_saver() {
        let mut native = HeadlessPlatform::new("Linux");
        SubsystemInitializer::new().run(&mut native).unwrap();

        assert_eq!(native.initialized(), Some(Subsystems::ALL));
        assert!(native.screen_saver_disabled());
    }

    #[test]
    fn test_initializer_can_keep_screen_saver() {
        let mut native = HeadlessPlatform::new("Linux");
        SubsystemInitializer::new()
            .with_screen_saver_disabled(false)
            .run(&mut native)
            .unwrap();

        assert!(!native.screen_saver_disabled());
    }

    #[test]
    fn test_initializer_failure_skips_screen_saver() {
        let mut native = HeadlessPlatform::new("Linux")
            .with_init_error(NativeError::Failed("no display".to_string()));
        let err = SubsystemInitializer::new().run(&mut native).unwrap_err();

        assert_eq!(err, NativeError::Failed("no display".to_string()));
        assert!(!native.screen_saver_disabled());
        assert_eq!(native.initialized(), None);
    }
}
