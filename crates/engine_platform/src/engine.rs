//! Engine bootstrap and event dispatch

use crate::{
    core::config::EngineConfig,
    events::{DispatchStats, EventPump},
    native::{NativeError, NativePlatform, SubsystemInitializer},
    platform::{self, debugger, Backend, OperatingSystem, PlatformQuirks},
    window::WindowRegistry,
};
use thiserror::Error;

/// Platform facts recorded by [`Engine::configure`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformState {
    /// Whether configuration completed
    pub configured: bool,
    /// Detected host OS
    pub os: Option<OperatingSystem>,
    /// Backend the application selected
    pub backend: Option<Backend>,
    /// Mouse can be queried outside the focused window
    pub global_mouse_supported: bool,
}

/// Main engine struct
///
/// Owns the native layer and the window registry. Configure once, register
/// windows, then call [`Engine::poll_events`] every frame. Everything runs
/// on the thread that owns the native event queue; the registry holds `Rc`
/// references, so the engine cannot leave that thread.
pub struct Engine<P: NativePlatform> {
    native: P,
    config: EngineConfig,
    state: PlatformState,
    windows: WindowRegistry,
    debugger_probe: fn() -> bool,
    shut_down: bool,
}

impl<P: NativePlatform> Engine<P> {
    /// Create an unconfigured engine over `native`
    pub fn new(native: P) -> Self {
        Self::with_config(native, EngineConfig::default())
    }

    /// Create an unconfigured engine with explicit settings
    pub fn with_config(native: P, config: EngineConfig) -> Self {
        Self {
            native,
            config,
            state: PlatformState::default(),
            windows: WindowRegistry::new(),
            debugger_probe: debugger::is_attached,
            shut_down: false,
        }
    }

    /// Replace how the engine checks for an attached debugger
    #[must_use]
    pub fn with_debugger_probe(mut self, probe: fn() -> bool) -> Self {
        self.debugger_probe = probe;
        self
    }

    /// One-time process configuration
    ///
    /// Detects the platform, validates `backend` for it, applies platform
    /// quirks and brings up the native subsystems, in that order. The first
    /// failing stage aborts configuration with a fatal error.
    ///
    /// Calling this twice is a programming error: debug builds panic, release
    /// builds log it and keep the first configuration.
    pub fn configure(&mut self, backend: Backend) -> Result<(), EngineError> {
        debug_assert!(!self.state.configured, "Engine has already been configured");
        if self.state.configured {
            log::error!("Engine has already been configured; ignoring configure({})", backend);
            return Ok(());
        }

        log::info!("Configuring engine for backend {}...", backend);

        let platform_name = self.native.platform_name().map_err(|e| {
            let error = EngineError::from_native_load(e);
            log::error!("{}", error);
            error
        })?;
        self.native.set_main_ready();

        let os = platform::detect(&platform_name)?;
        platform::validate_backend(os, backend)?;

        let quirks = PlatformQuirks::new(&platform_name, os, (self.debugger_probe)())
            .apply(&mut self.native);

        SubsystemInitializer::new()
            .with_screen_saver_disabled(self.config.disable_screen_saver)
            .run(&mut self.native)
            .map_err(|e| {
                let error = EngineError::from_native_init(e);
                log::error!("{}", error);
                error
            })?;

        self.state = PlatformState {
            configured: true,
            os: Some(os),
            backend: Some(backend),
            global_mouse_supported: quirks.global_mouse_supported,
        };
        log::info!("Engine configured: {} on {} ({})", backend, os, platform_name);
        Ok(())
    }

    /// Configure with the backend from the engine settings
    pub fn configure_from_config(&mut self) -> Result<(), EngineError> {
        self.configure(self.config.backend)
    }

    /// Lifecycle marker for the start of the main loop
    pub fn start(&mut self) {
        log::debug!("Engine started");
    }

    /// Tear down the native layer
    ///
    /// Irreversible for this engine. Polling afterwards does nothing.
    pub fn quit(&mut self) {
        if self.shut_down {
            return;
        }
        log::info!("Engine shutdown requested");
        self.native.quit();
        self.shut_down = true;
    }

    /// Drain pending native events and route each to its window
    ///
    /// Never fails; events nobody claims are dropped and counted.
    pub fn poll_events(&mut self) -> DispatchStats {
        if self.shut_down {
            log::warn!("poll_events called after quit");
            return DispatchStats::default();
        }
        debug_assert!(self.state.configured, "poll_events called before configure");
        EventPump::poll_once(&mut self.native, &self.windows)
    }

    /// Recorded platform facts
    pub const fn state(&self) -> &PlatformState {
        &self.state
    }

    /// Whether configuration completed
    pub const fn is_configured(&self) -> bool {
        self.state.configured
    }

    /// Whether [`Engine::quit`] ran
    pub const fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Mouse can be queried outside the focused window
    pub const fn supports_global_mouse(&self) -> bool {
        self.state.global_mouse_supported
    }

    /// Engine settings
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the window registry
    pub const fn windows(&self) -> &WindowRegistry {
        &self.windows
    }

    /// Get mutable access to the window registry
    pub fn windows_mut(&mut self) -> &mut WindowRegistry {
        &mut self.windows
    }

    /// Get the native layer
    pub const fn native(&self) -> &P {
        &self.native
    }

    /// Get mutable access to the native layer
    pub fn native_mut(&mut self) -> &mut P {
        &mut self.native
    }
}

/// Fatal configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The native windowing library is not installed
    #[error("Native library was not found: {0}")]
    MissingNativeDependency(String),

    /// The native library does not match this process's architecture
    #[error("Native library format mismatch: {0}")]
    BinaryFormatMismatch(String),

    /// The host OS is not one the engine supports
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The requested backend cannot run on the detected OS
    #[error("Incompatible backend {backend} on {os}: {reason}")]
    IncompatibleBackend {
        /// Requested backend
        backend: Backend,
        /// Detected OS
        os: OperatingSystem,
        /// Human-readable explanation
        reason: String,
    },

    /// Native subsystem initialization failed
    #[error("{0}")]
    SubsystemInitFailure(String),
}

impl EngineError {
    /// Map a failure from the first native call (library load)
    fn from_native_load(error: NativeError) -> Self {
        match error {
            NativeError::LibraryNotFound(detail) => Self::MissingNativeDependency(detail),
            NativeError::BadImageFormat(detail) => {
                Self::BinaryFormatMismatch(format!("This process is {} bit. {detail}", usize::BITS))
            }
            NativeError::Failed(detail) => Self::SubsystemInitFailure(detail),
        }
    }

    /// Map a failure from subsystem initialization
    fn from_native_init(error: NativeError) -> Self {
        match error {
            NativeError::LibraryNotFound(detail) => Self::MissingNativeDependency(detail),
            NativeError::BadImageFormat(detail) => {
                Self::BinaryFormatMismatch(format!("This process is {} bit. {detail}", usize::BITS))
            }
            NativeError::Failed(detail) => {
                Self::SubsystemInitFailure(format!("Unable to initialize native layer: {detail}"))
            }
        }
    }
}
