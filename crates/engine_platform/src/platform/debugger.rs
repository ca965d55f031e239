//! Debugger presence check

/// Whether a debugger is attached to this process
#[cfg(target_os = "linux")]
pub fn is_attached() -> bool {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| tracer_pid(&status))
        .is_some_and(|pid| pid != 0)
}

/// Whether a debugger is attached to this process
#[cfg(windows)]
pub fn is_attached() -> bool {
    // SAFETY: takes no arguments and only reads the PEB of the calling process.
    unsafe { winapi::um::debugapi::IsDebuggerPresent() != 0 }
}

/// Whether a debugger is attached to this process
#[cfg(not(any(target_os = "linux", windows)))]
pub const fn is_attached() -> bool {
    false
}

/// `TracerPid` field of a procfs status file
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|value| value.trim().parse().ok())
}
