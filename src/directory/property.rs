//! Property access by name, the way plugins read and write buffers.
//!
//! Names are matched case-insensitively. Unknown names and values that do
//! not parse are ignored, never reported to the caller.

use super::BufferDirectory;
use crate::buffer::{BufferId, BufferKind, NotifyLevel, PluginId};
use crate::error::BufferError;
use crate::hotlist::HotlistPriority;

const KEY_BIND_PREFIX: &str = "key_bind_";
const KEY_UNBIND_PREFIX: &str = "key_unbind_";

impl BufferDirectory {
    /// Integer property; 0 for an unknown buffer or property.
    pub fn get_integer(&self, id: BufferId, property: &str) -> i64 {
        let Some(buffer) = self.registry.get(id) else {
            return 0;
        };
        match property.to_ascii_lowercase().as_str() {
            "number" => i64::from(buffer.number()),
            "notify" => buffer.notify().as_int(),
            "lines_hidden" => buffer.lines().lines_hidden() as i64,
            "num_displayed" => i64::from(buffer.num_displayed()),
            "type" => buffer.kind().as_int(),
            "nicklist" => i64::from(buffer.nicklist().is_displayed()),
            "nicklist_case_sensitive" => i64::from(buffer.nicklist().case_sensitive()),
            "nicklist_display_groups" => i64::from(buffer.nicklist().display_groups()),
            "input" => i64::from(buffer.input_enabled()),
            _ => 0,
        }
    }

    pub fn get_string(&self, id: BufferId, property: &str) -> Option<&str> {
        let buffer = self.registry.get(id)?;
        match property.to_ascii_lowercase().as_str() {
            "plugin" => Some(buffer.owner_name()),
            "name" => Some(buffer.name()),
            "short_name" => Some(buffer.short_name()),
            "title" => buffer.title(),
            "nick" => buffer.input().nick(),
            "highlight_words" => buffer.highlight_words(),
            "highlight_tags" => buffer.highlight_tags().map(|tags| tags.raw.as_str()),
            "input" => Some(buffer.input().text()),
            _ => None,
        }
    }

    /// Only `plugin` is a handle; `None` for core buffers.
    pub fn get_pointer(&self, id: BufferId, property: &str) -> Option<&PluginId> {
        let buffer = self.registry.get(id)?;
        if property.eq_ignore_ascii_case("plugin") {
            buffer.plugin()
        } else {
            None
        }
    }

    /// Set a property from its string form.
    ///
    /// `hotlist` is the one property that works without a buffer: `-` and
    /// `+` switch hotlist additions off and on.
    pub fn set(&mut self, id: Option<BufferId>, property: &str, value: &str) {
        let lowered = property.to_ascii_lowercase();
        if lowered == "hotlist" {
            self.set_hotlist(id, value);
            return;
        }
        let Some(id) = id else {
            tracing::debug!(property, "Property needs a buffer");
            return;
        };
        if let Err(err) = self.apply_property(id, &lowered, property, value) {
            tracing::debug!(buffer = %id, property, error = %err, "Property not set");
        }
    }

    fn set_hotlist(&mut self, id: Option<BufferId>, value: &str) {
        match value {
            "-" => self.hotlist.set_add_enabled(false),
            "+" => self.hotlist.set_add_enabled(true),
            _ => {
                let priority = value.parse().ok().and_then(HotlistPriority::from_int);
                match (id.filter(|id| self.registry.contains(*id)), priority) {
                    (Some(id), Some(priority)) => self.hotlist.add(id, priority),
                    _ => tracing::debug!(value, "Ignoring hotlist value"),
                }
            }
        }
    }

    fn apply_property(
        &mut self,
        id: BufferId,
        lowered: &str,
        property: &str,
        value: &str,
    ) -> Result<(), BufferError> {
        match lowered {
            "display" => self.display(id),
            "name" => self.rename(id, value),
            "type" => match BufferKind::parse(value) {
                Some(kind) => self.set_kind(id, kind),
                None => ignored(property, value),
            },
            "notify" => match value.parse::<i64>() {
                Ok(level) if level < 0 => {
                    let default = self.config.look.buffer_notify_default;
                    self.set_notify(id, default)
                }
                Ok(level) => match NotifyLevel::from_int(level) {
                    Some(notify) => self.set_notify(id, notify),
                    None => ignored(property, value),
                },
                Err(_) => ignored(property, value),
            },
            "title" => self.retitle(id, value),
            "nicklist" => match parse_flag(value) {
                Some(flag) => self.set_nicklist(id, flag),
                None => ignored(property, value),
            },
            "nicklist_case_sensitive" => match parse_flag(value) {
                Some(flag) => self.set_nicklist_case_sensitive(id, flag),
                None => ignored(property, value),
            },
            "nicklist_display_groups" => match parse_flag(value) {
                Some(flag) => self.set_nicklist_display_groups(id, flag),
                None => ignored(property, value),
            },
            "nick" => self.set_nick(id, Some(value)),
            "highlight_words" => self.set_highlight_words(id, Some(value)),
            "highlight_tags" => self.set_highlight_tags(id, Some(value)),
            "input" => self.set_input_text(id, value),
            _ if lowered.starts_with(KEY_BIND_PREFIX) => {
                let key = &property[KEY_BIND_PREFIX.len()..];
                self.active_mut(id)?.keys.bind(key, value);
                Ok(())
            }
            _ if lowered.starts_with(KEY_UNBIND_PREFIX) => {
                let key = &property[KEY_UNBIND_PREFIX.len()..];
                let keys = &mut self.active_mut(id)?.keys;
                if key == "*" {
                    keys.free_all();
                } else {
                    keys.unbind(key);
                }
                Ok(())
            }
            _ => ignored(property, value),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    value.parse::<i64>().ok().map(|v| v != 0)
}

fn ignored(property: &str, value: &str) -> Result<(), BufferError> {
    tracing::debug!(property, value, "Ignoring buffer property");
    Ok(())
}
