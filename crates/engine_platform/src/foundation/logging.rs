//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use crate::core::config::EngineConfig;

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    init_with_level("info");
}

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still takes precedence. Calling this again after a logger is
/// installed does nothing.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Initialize the logging system from engine settings
pub fn init_from_config(config: &EngineConfig) {
    init_with_level(&config.log_level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_with_level("debug");
        init_from_config(&EngineConfig::default());
        init();
        info!("logging initialized");
    }
}
