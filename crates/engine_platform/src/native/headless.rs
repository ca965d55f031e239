//! Windowless native layer
//!
//! Events are pushed by the caller instead of coming from an OS queue, and
//! native failures can be injected. Everything the engine asks of it is
//! recorded so it can be inspected afterwards.

use std::collections::{HashMap, VecDeque};

use super::{NativeError, NativePlatform, Subsystems};
use crate::events::PlatformEvent;

/// Scripted [`NativePlatform`]
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    platform_name: String,
    name_error: Option<NativeError>,
    init_error: Option<NativeError>,
    main_ready: bool,
    reject_hints: bool,
    hints: HashMap<String, String>,
    initialized: Option<Subsystems>,
    screen_saver_disabled: bool,
    queue: VecDeque<PlatformEvent>,
    quit: bool,
}

impl HeadlessPlatform {
    /// Layer reporting `platform_name` as the host
    pub fn new(platform_name: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.into(),
            ..Self::default()
        }
    }

    /// Refuse every hint, as layers without hint support do
    #[must_use]
    pub const fn with_hints_rejected(mut self) -> Self {
        self.reject_hints = true;
        self
    }

    /// Fail the platform name query, as a missing or mismatched library would
    #[must_use]
    pub fn with_platform_error(mut self, error: NativeError) -> Self {
        self.name_error = Some(error);
        self
    }

    /// Fail subsystem initialization
    #[must_use]
    pub fn with_init_error(mut self, error: NativeError) -> Self {
        self.init_error = Some(error);
        self
    }

    /// Queue an event for the next poll
    pub fn push_event(&mut self, event: PlatformEvent) {
        self.queue.push_back(event);
    }

    /// Queue several events in order
    pub fn push_events(&mut self, events: impl IntoIterator<Item = PlatformEvent>) {
        self.queue.extend(events);
    }

    /// Events still waiting to be polled
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Value of a hint the engine set
    pub fn hint(&self, name: &str) -> Option<&str> {
        self.hints.get(name).map(String::as_str)
    }

    /// Subsystems brought up, if `init` succeeded
    pub const fn initialized(&self) -> Option<Subsystems> {
        self.initialized
    }

    /// Whether the screen saver was disabled
    pub const fn screen_saver_disabled(&self) -> bool {
        self.screen_saver_disabled
    }

    /// Whether the main-ready notification arrived
    pub const fn is_main_ready(&self) -> bool {
        self.main_ready
    }

    /// Whether `quit` was called
    pub const fn has_quit(&self) -> bool {
        self.quit
    }
}

impl NativePlatform for HeadlessPlatform {
    fn platform_name(&mut self) -> Result<String, NativeError> {
        match &self.name_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.platform_name.clone()),
        }
    }

    fn set_main_ready(&mut self) {
        self.main_ready = true;
    }

    fn set_hint(&mut self, name: &str, value: &str) -> bool {
        if self.reject_hints {
            return false;
        }
        self.hints.insert(name.to_string(), value.to_string());
        true
    }

    fn init(&mut self, subsystems: Subsystems) -> Result<(), NativeError> {
        if let Some(error) = &self.init_error {
            return Err(error.clone());
        }
        self.initialized = Some(subsystems);
        Ok(())
    }

    fn disable_screen_saver(&mut self) {
        self.screen_saver_disabled = true;
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.queue.pop_front()
    }

    fn quit(&mut self) {
        self.queue.clear();
        self.initialized = None;
        self.quit = true;
    }
}
