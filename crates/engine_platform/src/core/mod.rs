//! # Core Engine Module
//!
//! Shared configuration types used by the engine and its callers.
//!
//! ## Organization
//!
//! - **Config**: Engine settings and file loading
//! - **Foundation**: Low-level utilities (logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    Config,
    ConfigError,
    ConfigFormat,
    EngineConfig,
};
