/// Settings kept in chrome.storage.local

use serde::{Deserialize, Serialize};

/// Storage key of the enabled flag
pub const ENABLED_KEY: &str = "extensionEnabled";

/// Storage key of an optional JSON navigation config override
pub const CONFIG_KEY: &str = "navConfig";

/// Extension settings
///
/// Only an explicit `false` disables the extension; a missing value counts
/// as enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "extensionEnabled", default = "enabled_by_default")]
    pub extension_enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl Settings {
    pub fn new() -> Self {
        Settings {
            extension_enabled: enabled_by_default(),
        }
    }

    /// Build from the raw stored value, which may be absent or not a bool
    pub fn from_stored(value: Option<bool>) -> Self {
        Settings {
            extension_enabled: value != Some(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.extension_enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.extension_enabled = enabled;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
