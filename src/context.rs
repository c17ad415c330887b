use crate::common::platform::Platform;
use crate::ui::prelude::*;

/// Run-wide settings fixed at startup and passed by reference to every
/// component.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub platform: Platform,
    pub debug: bool,
}

impl RunContext {
    pub fn new(platform: Platform, debug: bool) -> Self {
        Self { platform, debug }
    }

    /// Emit a debug trace line when debug output is enabled.
    pub fn debug(&self, code: &str, message: impl AsRef<str>) {
        if self.debug {
            emit(Level::Debug, code, &format!("DEBUG= {}", message.as_ref()), None);
        }
    }
}
