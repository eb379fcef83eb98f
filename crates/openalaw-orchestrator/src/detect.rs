use openalaw_core::agent::KeywordSet;
use serde::{Deserialize, Serialize};

/// Keywords that mark a task as needing the device.
pub const DEFAULT_SYSTEM_KEYWORDS: &[&str] = &[
    "screen",
    "touch",
    "click",
    "swipe",
    "tap",
    "gesture",
    "app",
    "application",
    "interface",
    "ui",
    "view",
    "input",
    "keyboard",
    "navigation",
    "activity",
    "window",
    "notification",
];

pub const DEFAULT_CAPTURE_KEYWORDS: &[&str] = &["screen"];
pub const DEFAULT_TOUCH_KEYWORDS: &[&str] = &["touch", "click"];

/// Which bridge call a system task maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemIntent {
    Capture,
    Touch,
    Unsupported,
}

/// Device-interaction rules, independent of execution-target routing: a task
/// can be routed locally or remotely and still need the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRules {
    pub interaction: KeywordSet,
    pub capture: KeywordSet,
    pub touch: KeywordSet,
}

impl Default for SystemRules {
    fn default() -> Self {
        Self {
            interaction: KeywordSet::new(DEFAULT_SYSTEM_KEYWORDS),
            capture: KeywordSet::new(DEFAULT_CAPTURE_KEYWORDS),
            touch: KeywordSet::new(DEFAULT_TOUCH_KEYWORDS),
        }
    }
}

impl SystemRules {
    pub fn requires_system_interaction(&self, task: &str) -> bool {
        self.interaction.matches(task)
    }

    /// Capture wins over touch. `tap` and `swipe` flag a task as
    /// system-interacting without mapping to a bridge call.
    pub fn intent(&self, task: &str) -> SystemIntent {
        if self.capture.matches(task) {
            SystemIntent::Capture
        } else if self.touch.matches(task) {
            SystemIntent::Touch
        } else {
            SystemIntent::Unsupported
        }
    }
}
