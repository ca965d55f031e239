//! OS-conditioned behavior patches applied once during configuration

use super::OperatingSystem;
use crate::native::{NativePlatform, HINT_WINDOWS_DISABLE_THREAD_NAMING};

/// Platform names on which the mouse can be queried outside the focused window
pub const GLOBAL_MOUSE_PLATFORMS: &[&str] = &[
    "windows",
    "mac os x",
    "linux",
    "freebsd",
    "openbsd",
    "netbsd",
];

/// Windows-family platform names
const WINDOWS_FAMILY: &[&str] = &["windows", "winrt"];

/// Outcome of [`PlatformQuirks::apply`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedQuirks {
    /// Mouse position/state can be queried outside the client area
    pub global_mouse_supported: bool,
    /// The native layer accepted the hint disabling thread naming
    pub thread_naming_disabled: bool,
}

/// Quirk rules keyed on the native platform name
#[derive(Debug, Clone, Copy)]
pub struct PlatformQuirks<'a> {
    platform_name: &'a str,
    os: OperatingSystem,
    debugger_attached: bool,
}

impl<'a> PlatformQuirks<'a> {
    /// Rules for one configuration pass
    pub const fn new(platform_name: &'a str, os: OperatingSystem, debugger_attached: bool) -> Self {
        Self {
            platform_name,
            os,
            debugger_attached,
        }
    }

    /// Run every rule against the native layer
    pub fn apply(&self, native: &mut dyn NativePlatform) -> AppliedQuirks {
        let applied = AppliedQuirks {
            global_mouse_supported: supports_global_mouse(self.platform_name),
            thread_naming_disabled: self.fix_debugger_thread_naming(native),
        };
        self.fix_windows_paint_event();

        log::debug!(
            "Quirks for '{}': global_mouse={} thread_naming_disabled={}",
            self.platform_name,
            applied.global_mouse_supported,
            applied.thread_naming_disabled
        );
        applied
    }

    /// Thread naming stalls thread creation while a debugger is attached on Windows
    fn fix_debugger_thread_naming(&self, native: &mut dyn NativePlatform) -> bool {
        if !is_windows_family(self.platform_name) || !self.debugger_attached {
            return false;
        }

        let accepted = native.set_hint(HINT_WINDOWS_DISABLE_THREAD_NAMING, "1");
        if !accepted {
            log::warn!("Native layer ignored hint {}", HINT_WINDOWS_DISABLE_THREAD_NAMING);
        }
        accepted
    }

    fn fix_windows_paint_event(&self) {
        if self.os == OperatingSystem::Windows {
            // No known fix yet; this stage stays an explicit no-op.
        }
    }
}

/// Whether `platform_name` (case-insensitive) supports global mouse queries
pub fn supports_global_mouse(platform_name: &str) -> bool {
    GLOBAL_MOUSE_PLATFORMS
        .iter()
        .any(|name| platform_name.eq_ignore_ascii_case(name))
}

fn is_windows_family(platform_name: &str) -> bool {
    WINDOWS_FAMILY
        .iter()
        .any(|name| platform_name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::HeadlessPlatform;

    #[test]
    fn test_global_mouse_platforms() {
        for name in ["Windows", "Mac OS X", "Linux", "FreeBSD", "OpenBSD", "NetBSD", "linux"] {
            assert!(supports_global_mouse(name), "{name}");
        }
        for name in ["android", "iOS", "WinRT", "Mac OS", "linux ", ""] {
            assert!(!supports_global_mouse(name), "{name}");
        }
    }

    #[test]
    fn test_debugger_hint_on_windows_with_debugger() {
        let mut native = HeadlessPlatform::new("Windows");
        let applied = PlatformQuirks::new("Windows", OperatingSystem::Windows, true).apply(&mut native);

        assert!(applied.thread_naming_disabled);
        assert_eq!(native.hint(HINT_WINDOWS_DISABLE_THREAD_NAMING), Some("1"));
    }

    #[test]
    fn test_debugger_hint_on_winrt() {
        let mut native = HeadlessPlatform::new("WinRT");
        let applied = PlatformQuirks::new("WinRT", OperatingSystem::Unsupported, true).apply(&mut native);

        assert!(applied.thread_naming_disabled);
        assert!(!applied.global_mouse_supported);
    }

    #[test]
    fn test_rejected_hint_is_not_reported_as_applied() {
        let mut native = HeadlessPlatform::new("Windows").with_hints_rejected();
        let applied = PlatformQuirks::new("Windows", OperatingSystem::Windows, true).apply(&mut native);

        assert!(!applied.thread_naming_disabled);
        assert_eq!(native.hint(HINT_WINDOWS_DISABLE_THREAD_NAMING), None);
    }

    #[test]
    fn test_no_debugger_hint_without_debugger() {
        let mut native = HeadlessPlatform::new("Windows");
        let applied = PlatformQuirks::new("Windows", OperatingSystem::Windows, false).apply(&mut native);

        assert!(!applied.thread_naming_disabled);
        assert!(applied.global_mouse_supported);
        assert_eq!(native.hint(HINT_WINDOWS_DISABLE_THREAD_NAMING), None);
    }

    #[test]
    fn test_no_debugger_hint_off_windows() {
        let mut native = HeadlessPlatform::new("Linux");
        let applied = PlatformQuirks::new("Linux", OperatingSystem::Linux, true).apply(&mut native);

        assert!(!applied.thread_naming_disabled);
        assert_eq!(native.hint(HINT_WINDOWS_DISABLE_THREAD_NAMING), None);
    }
}
