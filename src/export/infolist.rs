//! Serializable buffer records.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::buffer::{Buffer, BufferId, BufferKind, KeyBinding, Line, NotifyLevel};
use crate::directory::BufferDirectory;

/// Flat description of one buffer and its most recent lines.
#[derive(Debug, Clone, Serialize)]
pub struct BufferInfo {
    pub id: BufferId,
    pub current_buffer: bool,
    pub number: u32,
    pub plugin_name: String,
    pub name: String,
    pub short_name: String,
    #[serde(rename = "type")]
    pub kind: BufferKind,
    pub notify: NotifyLevel,
    pub num_displayed: u32,
    pub lines_count: usize,
    pub lines_hidden: usize,
    pub prefix_max_length: usize,
    pub nicklist: bool,
    pub nicklist_case_sensitive: bool,
    pub nicklist_display_groups: bool,
    pub nicklist_max_length: usize,
    pub nicklist_visible_count: usize,
    pub title: Option<String>,
    pub input: bool,
    pub input_nick: Option<String>,
    pub input_string: String,
    pub input_pos: usize,
    pub highlight_words: Option<String>,
    pub highlight_tags: Option<String>,
    pub keys: Vec<KeyBinding>,
    pub lines: Vec<LineInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineInfo {
    pub date: DateTime<Local>,
    pub date_printed: DateTime<Local>,
    pub str_time: String,
    pub tags: Vec<String>,
    pub displayed: bool,
    pub highlight: bool,
    pub prefix: Option<String>,
    pub message: String,
}

impl From<&Line> for LineInfo {
    fn from(line: &Line) -> Self {
        Self {
            date: line.date,
            date_printed: line.date_printed,
            str_time: line.str_time.clone(),
            tags: line.tags.clone(),
            displayed: line.displayed,
            highlight: line.highlight,
            prefix: line.prefix.clone(),
            message: line.message.clone(),
        }
    }
}

impl BufferInfo {
    fn new(buffer: &Buffer, current: bool, line_count: usize) -> Self {
        let nicklist = buffer.nicklist();
        let input = buffer.input();
        Self {
            id: buffer.id(),
            current_buffer: current,
            number: buffer.number(),
            plugin_name: buffer.owner_name().to_string(),
            name: buffer.name().to_string(),
            short_name: buffer.short_name().to_string(),
            kind: buffer.kind(),
            notify: buffer.notify(),
            num_displayed: buffer.num_displayed(),
            lines_count: buffer.lines().len(),
            lines_hidden: buffer.lines().lines_hidden(),
            prefix_max_length: buffer.lines().prefix_max_length(),
            nicklist: nicklist.is_displayed(),
            nicklist_case_sensitive: nicklist.case_sensitive(),
            nicklist_display_groups: nicklist.display_groups(),
            nicklist_max_length: nicklist.max_length(),
            nicklist_visible_count: nicklist.visible_count(),
            title: buffer.title().map(str::to_string),
            input: buffer.input_enabled(),
            input_nick: input.nick().map(str::to_string),
            input_string: input.text().to_string(),
            input_pos: input.pos(),
            highlight_words: buffer.highlight_words().map(str::to_string),
            highlight_tags: buffer.highlight_tags().map(|tags| tags.raw.clone()),
            keys: buffer.keys().iter().cloned().collect(),
            lines: buffer
                .lines()
                .last_n(line_count)
                .iter()
                .map(LineInfo::from)
                .collect(),
        }
    }
}

impl BufferDirectory {
    pub fn buffer_info(&self, id: BufferId) -> Option<BufferInfo> {
        let buffer = self.get(id)?;
        Some(BufferInfo::new(
            buffer,
            self.current_buffer() == Some(id),
            self.config().dump.lines,
        ))
    }

    /// Every buffer in display order.
    pub fn infolist(&self) -> Vec<BufferInfo> {
        let current = self.current_buffer();
        let lines = self.config().dump.lines;
        self.registry()
            .iter()
            .map(|buffer| BufferInfo::new(buffer, current == Some(buffer.id()), lines))
            .collect()
    }
}

/// Pretty-printed JSON array.
pub fn to_json(infos: &[BufferInfo]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(infos)
}
