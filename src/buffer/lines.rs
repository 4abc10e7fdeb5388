//! Chat lines owned by a buffer.
//!
//! Line layout and wrapping belong to the renderer. The directory only
//! appends lines, discards them all, and exports the most recent ones.

use chrono::{DateTime, Local};

/// One printed line of a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Date attached to the message (may come from the server).
    pub date: DateTime<Local>,
    /// Date the line was actually printed.
    pub date_printed: DateTime<Local>,
    /// Pre-formatted time column.
    pub str_time: String,
    pub tags: Vec<String>,
    pub displayed: bool,
    pub highlight: bool,
    pub refresh_needed: bool,
    pub prefix: Option<String>,
    pub message: String,
}

impl Line {
    /// Build a displayed line stamped with the current time.
    pub fn new(prefix: Option<&str>, message: &str) -> Self {
        let now = Local::now();
        Self {
            date: now,
            date_printed: now,
            str_time: now.format("%H:%M:%S").to_string(),
            tags: Vec::new(),
            displayed: true,
            highlight: false,
            refresh_needed: false,
            prefix: prefix.map(str::to_string),
            message: message.to_string(),
        }
    }

    /// Attach tags from a comma-separated list.
    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = split_list(tags);
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Tags joined back with commas, as dumps show them.
    pub fn tags_joined(&self) -> String {
        self.tags.join(",")
    }
}

/// Ordered line storage plus the counters the status bar reads.
#[derive(Debug, Default)]
pub struct Lines {
    lines: Vec<Line>,
    lines_hidden: usize,
    prefix_max_length: usize,
    last_read: Option<usize>,
}

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line) {
        if !line.displayed {
            self.lines_hidden += 1;
        }
        if let Some(prefix) = &line.prefix {
            self.prefix_max_length = self.prefix_max_length.max(prefix.chars().count());
        }
        self.lines.push(line);
    }

    /// Drop every line and reset counters.
    pub fn free_all(&mut self) {
        self.lines.clear();
        self.lines_hidden = 0;
        self.prefix_max_length = 0;
        self.last_read = None;
    }

    /// Remember the current tail as the read marker.
    pub fn mark_read(&mut self) {
        self.last_read = self.lines.len().checked_sub(1);
    }

    pub fn last_read(&self) -> Option<usize> {
        self.last_read
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines_hidden(&self) -> usize {
        self.lines_hidden
    }

    pub fn prefix_max_length(&self) -> usize {
        self.prefix_max_length
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// The most recent `count` lines, oldest first.
    pub fn last_n(&self, count: usize) -> &[Line] {
        let start = self.lines.len().saturating_sub(count);
        &self.lines[start..]
    }
}

/// Split a comma-separated list, dropping empty items.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
