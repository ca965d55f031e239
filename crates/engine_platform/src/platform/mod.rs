//! Host platform classification
//!
//! The native layer reports the host as a free-form name (`"Windows"`,
//! `"Mac OS X"`, `"Linux"`, ...). Everything downstream works on the closed
//! [`OperatingSystem`] set produced here.

pub mod backend;
pub mod compatibility;
pub mod debugger;
pub mod quirks;

pub use backend::Backend;
pub use compatibility::{validate_backend, CompatibilityRule, COMPATIBILITY_TABLE};
pub use quirks::{AppliedQuirks, PlatformQuirks};

use std::fmt;

use crate::engine::EngineError;

/// Operating systems the engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
    /// Microsoft Windows
    Windows,
    /// Linux
    Linux,
    /// Apple macOS
    MacOs,
    /// Anything else; the engine refuses to start
    Unsupported,
}

impl OperatingSystem {
    /// Classify a native platform name (case-insensitive)
    pub fn from_platform_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            "mac os x" | "macos" => Self::MacOs,
            _ => Self::Unsupported,
        }
    }

    /// Display name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Unsupported => "Unsupported",
        }
    }

    /// Whether the engine can run here at all
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the host, failing when it is outside the supported set
pub fn detect(platform_name: &str) -> Result<OperatingSystem, EngineError> {
    let os = OperatingSystem::from_platform_name(platform_name);
    if os.is_supported() {
        log::debug!("Platform '{}' detected as {}", platform_name, os);
        Ok(os)
    } else {
        log::error!("Invalid OS: '{}'", platform_name);
        Err(EngineError::UnsupportedPlatform(format!(
            "Invalid OS: '{platform_name}'"
        )))
    }
}

/// Conventional platform name of the compile target
///
/// Matches the names native windowing layers report, so headless and
/// GLFW-backed runs feed the same strings into detection and quirks.
pub const fn host_platform_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "Windows"
    } else if cfg!(target_os = "macos") {
        "Mac OS X"
    } else if cfg!(target_os = "linux") {
        "Linux"
    } else if cfg!(target_os = "freebsd") {
        "FreeBSD"
    } else if cfg!(target_os = "openbsd") {
        "OpenBSD"
    } else if cfg!(target_os = "netbsd") {
        "NetBSD"
    } else if cfg!(target_os = "android") {
        "Android"
    } else if cfg!(target_os = "ios") {
        "iOS"
    } else {
        "Unknown"
    }
}
