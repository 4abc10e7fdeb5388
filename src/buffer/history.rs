//! Per-buffer input history.

use std::collections::VecDeque;

/// Recall list of sent input lines, most recent first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<String>,
    cursor: Option<usize>,
    max_entries: usize,
}

impl History {
    /// `max_entries == 0` keeps every entry.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            max_entries,
        }
    }

    /// Record a sent line. Repeating the last line is not recorded twice.
    pub fn add(&mut self, text: &str) {
        self.cursor = None;
        if text.is_empty() || self.entries.front().is_some_and(|last| last == text) {
            return;
        }
        self.entries.push_front(text.to_string());
        if self.max_entries > 0 {
            self.entries.truncate(self.max_entries);
        }
    }

    /// Step back in time. Stays on the oldest entry once reached.
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => 0,
            Some(index) => (index + 1).min(self.entries.len() - 1),
        };
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Step forward in time. Returns `None` once back at the live line.
    pub fn next(&mut self) -> Option<&str> {
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                None
            }
            Some(index) => {
                self.cursor = Some(index - 1);
                self.entries.get(index - 1).map(String::as_str)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn free_all(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
