//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Seconds between periodic pod refreshes
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Quiet period after the last search edit before fetching
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Start with action output routed to a new terminal window
    #[serde(default = "default_false")]
    pub use_new_terminal: bool,

    /// Command suggested by the exec prompt
    #[serde(default = "default_exec_command")]
    pub exec_command: String,

    /// How long status messages stay in the footer
    #[serde(default = "default_status_timeout_secs")]
    pub status_timeout_secs: u64,

    /// Terminal launcher configuration
    #[serde(default)]
    pub terminal: TerminalConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Terminal launcher for interactive actions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminalConfig {
    /// Program and leading arguments, the kubectl command line is appended
    /// e.g. `["x-terminal-emulator", "-e"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Enable mouse support
    #[serde(default = "default_false")]
    pub enable_mouse: bool,
}

// Default value functions
fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_false() -> bool {
    false
}

fn default_exec_command() -> String {
    crate::actions::DEFAULT_EXEC_COMMAND.to_string()
}

fn default_status_timeout_secs() -> u64 {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            search_debounce_ms: default_search_debounce_ms(),
            use_new_terminal: default_false(),
            exec_command: default_exec_command(),
            status_timeout_secs: default_status_timeout_secs(),
            terminal: TerminalConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_mouse: default_false(),
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn search_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.search_debounce_ms)
    }

    pub fn status_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.status_timeout_secs)
    }
}
