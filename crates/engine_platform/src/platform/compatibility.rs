//! Which rendering backends may run on which operating system
//!
//! The matrix lives in [`COMPATIBILITY_TABLE`]; adding a platform or a
//! backend restriction means adding a row, not another branch.

use super::{Backend, OperatingSystem};
use crate::engine::EngineError;

/// One row of the compatibility matrix
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityRule {
    /// Platform the row applies to
    pub os: OperatingSystem,
    /// Backends refused on that platform
    pub disallowed: &'static [Backend],
    /// Refuse every backend regardless of `disallowed`
    pub rejects_all: bool,
}

impl CompatibilityRule {
    /// Whether this row lets `backend` through
    pub fn allows(&self, backend: Backend) -> bool {
        !self.rejects_all && !self.disallowed.contains(&backend)
    }
}

/// The OS/backend matrix
pub const COMPATIBILITY_TABLE: &[CompatibilityRule] = &[
    CompatibilityRule {
        os: OperatingSystem::Windows,
        disallowed: &[Backend::Metal],
        rejects_all: false,
    },
    CompatibilityRule {
        os: OperatingSystem::Linux,
        disallowed: &[Backend::Metal, Backend::D3D11],
        rejects_all: false,
    },
    CompatibilityRule {
        os: OperatingSystem::MacOs,
        disallowed: &[Backend::D3D11],
        rejects_all: false,
    },
    CompatibilityRule {
        os: OperatingSystem::Unsupported,
        disallowed: &[],
        rejects_all: true,
    },
];

/// Look up the row for `os`
pub fn rule_for(os: OperatingSystem) -> Option<&'static CompatibilityRule> {
    COMPATIBILITY_TABLE.iter().find(|rule| rule.os == os)
}

/// Check `backend` against the matrix for `os`
pub fn validate_backend(os: OperatingSystem, backend: Backend) -> Result<(), EngineError> {
    let allowed = rule_for(os).is_some_and(|rule| rule.allows(backend));
    if allowed {
        return Ok(());
    }

    let reason = if os.is_supported() {
        format!("{backend} is not a suitable backend on {os}")
    } else {
        "No suitable backend found.".to_string()
    };
    log::error!("{}", reason);
    Err(EngineError::IncompatibleBackend { backend, os, reason })
}
