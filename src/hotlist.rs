//! Minimal hotlist: which buffers have unread activity.
//!
//! The directory adds entries when a printed line passes the buffer's notify
//! level or through the `hotlist` property, and purges them when a buffer is
//! cleared or closed.

use chrono::{DateTime, Local};

use crate::buffer::BufferId;

/// Importance of the activity recorded for a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HotlistPriority {
    Low = 0,
    Message = 1,
    Private = 2,
    Highlight = 3,
}

impl HotlistPriority {
    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Low),
            1 => Some(Self::Message),
            2 => Some(Self::Private),
            3 => Some(Self::Highlight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotlistEntry {
    pub buffer: BufferId,
    pub priority: HotlistPriority,
    pub added_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct Hotlist {
    entries: Vec<HotlistEntry>,
    add_enabled: bool,
    initial_buffer: Option<BufferId>,
}

impl Hotlist {
    pub fn new(add_enabled: bool) -> Self {
        Self {
            entries: Vec::new(),
            add_enabled,
            initial_buffer: None,
        }
    }

    pub fn add_enabled(&self) -> bool {
        self.add_enabled
    }

    pub(crate) fn set_add_enabled(&mut self, enabled: bool) {
        self.add_enabled = enabled;
    }

    /// Record activity. An existing entry only ever raises its priority.
    pub(crate) fn add(&mut self, buffer: BufferId, priority: HotlistPriority) {
        if !self.add_enabled {
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.buffer == buffer) {
            entry.priority = entry.priority.max(priority);
        } else {
            self.entries.push(HotlistEntry {
                buffer,
                priority,
                added_at: Local::now(),
            });
        }
        // highest priority first, insertion order within a priority
        self.entries.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    pub(crate) fn remove_buffer(&mut self, buffer: BufferId) {
        self.entries.retain(|entry| entry.buffer != buffer);
    }

    pub fn contains(&self, buffer: BufferId) -> bool {
        self.entries.iter().any(|entry| entry.buffer == buffer)
    }

    pub fn priority(&self, buffer: BufferId) -> Option<HotlistPriority> {
        self.entries
            .iter()
            .find(|entry| entry.buffer == buffer)
            .map(|entry| entry.priority)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HotlistEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Buffer to come back to after cycling through the hotlist.
    pub fn initial_buffer(&self) -> Option<BufferId> {
        self.initial_buffer
    }

    pub(crate) fn set_initial_buffer(&mut self, buffer: Option<BufferId>) {
        self.initial_buffer = buffer;
    }

    /// Forget every reference to `buffer`, entry and tracker alike.
    pub(crate) fn forget(&mut self, buffer: BufferId) {
        self.remove_buffer(buffer);
        if self.initial_buffer == Some(buffer) {
            self.initial_buffer = None;
        }
    }
}
