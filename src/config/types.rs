use serde::{Deserialize, Serialize};

use crate::buffer::NotifyLevel;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub look: LookConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub dump: DumpConfig,
}

/// Look and feel defaults applied to new buffers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookConfig {
    /// Notify level given to every new buffer (default: all).
    #[serde(default)]
    pub buffer_notify_default: NotifyLevel,
    /// Whether new lines are added to the hotlist (default: true).
    #[serde(default = "default_hotlist_add")]
    pub hotlist_add: bool,
}

/// Input line settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Allocation block of the input line, in bytes (default: 256).
    #[serde(default = "default_input_block_size")]
    pub block_size: usize,
    /// Max entries kept in each buffer's history, 0 for unlimited (default: 100).
    #[serde(default = "default_history_max")]
    pub history_max: usize,
}

/// Settings of the introspection export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Number of most recent lines exported per buffer (default: 100).
    #[serde(default = "default_dump_lines")]
    pub lines: usize,
}

fn default_hotlist_add() -> bool {
    true
}

fn default_input_block_size() -> usize {
    256
}

fn default_history_max() -> usize {
    100
}

fn default_dump_lines() -> usize {
    100
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            buffer_notify_default: NotifyLevel::default(),
            hotlist_add: default_hotlist_add(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            block_size: default_input_block_size(),
            history_max: default_history_max(),
        }
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            lines: default_dump_lines(),
        }
    }
}
