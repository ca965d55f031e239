//! # Engine Configuration
//!
//! Settings read before the engine is configured: which rendering backend to
//! ask for, how verbose logging is, and whether the OS screen saver is
//! suppressed while the engine runs. Loadable from `.toml` or `.ron` through
//! the [`Config`] trait.

use serde::{Deserialize, Serialize};

use crate::platform::Backend;

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// # Engine Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rendering backend passed to `configure`
    pub backend: Backend,
    /// Default log filter (`RUST_LOG` overrides it)
    pub log_level: String,
    /// Suppress the OS screen saver after subsystem init
    pub disable_screen_saver: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            backend: Backend::Default,
            log_level: "info".to_string(),
            disable_screen_saver: true,
        }
    }

    /// Set the backend
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Keep or allow the screen saver
    #[must_use]
    pub fn with_screen_saver_disabled(mut self, disabled: bool) -> Self {
        self.disable_screen_saver = disabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
