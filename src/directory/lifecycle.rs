//! Creating, closing and mutating buffers.

use super::BufferDirectory;
use crate::buffer::{
    split_list, Buffer, BufferId, BufferKind, BufferState, CallbackStatus, CloseCallback,
    HighlightTags, InputCallback, NotifyLevel, PluginId, RefreshFlags,
};
use crate::error::BufferError;
use crate::signal::Signal;
use crate::window::WindowId;

impl BufferDirectory {
    /// Register a new buffer at the tail of the list.
    ///
    /// The first buffer to appear while the current window shows nothing is
    /// attached to that window.
    pub fn create(
        &mut self,
        plugin: Option<PluginId>,
        name: &str,
        input_callback: Option<InputCallback>,
        close_callback: Option<CloseCallback>,
    ) -> Result<BufferId, BufferError> {
        if name.is_empty() {
            return Err(BufferError::EmptyName);
        }
        let owner = plugin
            .as_ref()
            .map_or(crate::buffer::CORE_OWNER, PluginId::name)
            .to_string();
        if self.registry.find(&owner, name).is_some() {
            tracing::warn!(owner = %owner, name, "A buffer with same name already exists");
            return Err(BufferError::DuplicateName {
                owner,
                name: name.to_string(),
            });
        }

        let id = BufferId(self.next_id);
        self.next_id += 1;

        let mut buffer = Buffer::new(id, plugin, name, &self.config);
        buffer.input_callback = input_callback;
        buffer.close_callback = close_callback;
        buffer.state = BufferState::Active;
        let number = self.registry.append(buffer);
        tracing::debug!(buffer = %id, number, owner = %owner, name, "Buffer created");

        if self.windows.current().buffer().is_none() {
            let window = self.windows.current_id();
            self.switch_window_to_buffer(window, id);
        }

        if let Some(buffer) = self.registry.get(id) {
            self.bus.emit(&Signal::BufferOpen(buffer));
        }
        Ok(id)
    }

    /// Run the full close sequence. Once started it always frees the buffer.
    pub fn close(&mut self, id: BufferId, switch_to_another: bool) -> Result<(), BufferError> {
        let buffer = self.active_mut(id)?;
        buffer.state = BufferState::Closing;
        let full_name = buffer.full_name();
        let number = buffer.number;

        if let Some(buffer) = self.registry.get(id) {
            self.bus.emit(&Signal::BufferClosing(buffer));
        }

        let callback = self
            .registry
            .get_mut(id)
            .and_then(|buffer| buffer.close_callback.take());
        if let (Some(mut callback), Some(buffer)) = (callback, self.registry.get(id)) {
            if callback(buffer) == CallbackStatus::Error {
                tracing::debug!(buffer = %id, "Close callback reported an error");
            }
        }

        if switch_to_another && self.registry.len() > 1 {
            for window in self.windows.showing(id) {
                self.switch_previous(window);
            }
        }

        self.hotlist.forget(id);
        if self.previous_buffer == Some(id) {
            self.previous_buffer = None;
        }

        self.registry.renumber_after(id);

        if let Some(buffer) = self.registry.get_mut(id) {
            buffer.release_owned();
        }

        let Some(mut buffer) = self.registry.unlink(id) else {
            return Err(BufferError::NotFound(id));
        };
        for window in self.windows.iter_mut() {
            if window.buffer == Some(id) {
                window.buffer = None;
                window.reset_scroll();
            }
        }

        self.bus.emit(&Signal::BufferClosed(&buffer));

        buffer.state = BufferState::Freed;
        drop(buffer);
        self.status_refresh_needed = true;
        tracing::info!(buffer = %id, number, name = %full_name, "Buffer closed");
        Ok(())
    }

    /// Close every buffer, tail first.
    pub fn close_all(&mut self) {
        while let Some(id) = self.registry.last() {
            if self.close(id, false).is_err() {
                break;
            }
        }
    }

    /// Drop all lines and forget unread activity.
    pub fn clear(&mut self, id: BufferId) -> Result<(), BufferError> {
        let buffer = self.active_mut(id)?;
        buffer.lines.free_all();
        buffer.refresh.ask_chat(RefreshFlags::CHAT_FULL);
        self.hotlist.remove_buffer(id);
        for window in self.windows.iter_mut() {
            if window.buffer == Some(id) {
                window.reset_scroll();
            }
        }
        self.status_refresh_needed = true;
        Ok(())
    }

    pub fn clear_all(&mut self) {
        let ids = self.registry.ids().to_vec();
        for id in ids {
            // a closing buffer is left alone
            let _ = self.clear(id);
        }
    }

    /// Switch the content model. Lines never survive a change.
    pub fn set_kind(&mut self, id: BufferId, kind: BufferKind) -> Result<(), BufferError> {
        let buffer = self.active_mut(id)?;
        if buffer.kind == kind {
            return Ok(());
        }
        buffer.lines.free_all();
        buffer.kind = kind;
        buffer.refresh.ask_chat(RefreshFlags::CHAT_FULL);
        Ok(())
    }

    /// Give the buffer a new name. An empty name is ignored.
    pub fn rename(&mut self, id: BufferId, name: &str) -> Result<(), BufferError> {
        let owner = self.active_mut(id)?.owner_name().to_string();
        if name.is_empty() {
            return Ok(());
        }
        if let Some(other) = self.registry.find(&owner, name) {
            if other == id {
                return Ok(());
            }
            return Err(BufferError::DuplicateName {
                owner,
                name: name.to_string(),
            });
        }
        let buffer = self.active_mut(id)?;
        buffer.name = name.to_string();
        self.status_refresh_needed = true;
        tracing::debug!(buffer = %id, owner = %owner, name, "Buffer renamed");

        if let Some(buffer) = self.registry.get(id) {
            self.bus.emit(&Signal::BufferRenamed(buffer));
        }
        Ok(())
    }

    /// Set the title; an empty title clears it.
    pub fn retitle(&mut self, id: BufferId, title: &str) -> Result<(), BufferError> {
        let buffer = self.active_mut(id)?;
        buffer.title = (!title.is_empty()).then(|| title.to_string());
        buffer.refresh.ask_title(1);
        self.bus.emit(&Signal::BufferTitleChanged);
        Ok(())
    }

    pub fn set_notify(&mut self, id: BufferId, notify: NotifyLevel) -> Result<(), BufferError> {
        self.active_mut(id)?.notify = notify;
        Ok(())
    }

    pub fn set_nicklist(&mut self, id: BufferId, displayed: bool) -> Result<(), BufferError> {
        self.active_mut(id)?.nicklist.display = displayed;
        self.windows_refresh_needed = true;
        Ok(())
    }

    pub fn set_nicklist_case_sensitive(
        &mut self,
        id: BufferId,
        case_sensitive: bool,
    ) -> Result<(), BufferError> {
        self.active_mut(id)?.nicklist.case_sensitive = case_sensitive;
        Ok(())
    }

    pub fn set_nicklist_display_groups(
        &mut self,
        id: BufferId,
        display_groups: bool,
    ) -> Result<(), BufferError> {
        let buffer = self.active_mut(id)?;
        buffer.nicklist.display_groups = display_groups;
        buffer.nicklist.recompute();
        buffer.refresh.ask_nicklist(1);
        Ok(())
    }

    /// Add a nick group under `parent` (the root group when `None`).
    pub fn add_nick_group(
        &mut self,
        id: BufferId,
        parent: Option<&str>,
        name: &str,
        visible: bool,
    ) -> Result<bool, BufferError> {
        let buffer = self.active_mut(id)?;
        let added = buffer.nicklist.add_group(parent, name, None, visible);
        if added {
            buffer.refresh.ask_nicklist(1);
        }
        Ok(added)
    }

    /// Add a nick to `group` (the root group when `None`).
    pub fn add_nick(
        &mut self,
        id: BufferId,
        group: Option<&str>,
        name: &str,
        prefix: Option<char>,
    ) -> Result<bool, BufferError> {
        let buffer = self.active_mut(id)?;
        let added = buffer.nicklist.add_nick(group, name, None, prefix, true);
        if added {
            buffer.refresh.ask_nicklist(1);
        }
        Ok(added)
    }

    pub fn remove_nick(&mut self, id: BufferId, name: &str) -> Result<bool, BufferError> {
        let buffer = self.active_mut(id)?;
        let removed = buffer.nicklist.remove_nick(name);
        if removed {
            buffer.refresh.ask_nicklist(1);
        }
        Ok(removed)
    }

    /// Nick shown in front of the input line.
    pub fn set_nick(&mut self, id: BufferId, nick: Option<&str>) -> Result<(), BufferError> {
        let buffer = self.active_mut(id)?;
        buffer.input.nick = nick.filter(|n| !n.is_empty()).map(str::to_string);
        buffer.refresh.ask_input(1);
        Ok(())
    }

    pub fn set_highlight_words(
        &mut self,
        id: BufferId,
        words: Option<&str>,
    ) -> Result<(), BufferError> {
        self.active_mut(id)?.highlight_words =
            words.filter(|w| !w.is_empty()).map(str::to_string);
        Ok(())
    }

    /// Comma separated tags; each tag is kept on its own as well.
    pub fn set_highlight_tags(
        &mut self,
        id: BufferId,
        tags: Option<&str>,
    ) -> Result<(), BufferError> {
        self.active_mut(id)?.highlight_tags =
            tags.filter(|t| !t.is_empty()).map(|raw| HighlightTags {
                raw: raw.to_string(),
                tags: split_list(raw),
            });
        Ok(())
    }

    /// Replace the whole input line.
    pub fn set_input_text(&mut self, id: BufferId, text: &str) -> Result<(), BufferError> {
        let buffer = self.active_mut(id)?;
        Self::replace_input(buffer, text);
        Ok(())
    }

    fn replace_input(buffer: &mut Buffer, text: &str) {
        buffer.input.delete_line();
        buffer.input.insert_str(text, Some(0));
        if let Some(completion) = buffer.completion.as_mut() {
            completion.stop();
        }
        buffer.refresh.ask_input(1);
    }

    /// Recall the previous history entry into the input line.
    pub fn history_previous(&mut self, id: BufferId) -> Result<Option<String>, BufferError> {
        let buffer = self.active_mut(id)?;
        let Some(text) = buffer.history.previous().map(str::to_string) else {
            return Ok(None);
        };
        Self::replace_input(buffer, &text);
        Ok(Some(text))
    }

    /// Recall the next history entry; past the newest the input is emptied.
    pub fn history_next(&mut self, id: BufferId) -> Result<Option<String>, BufferError> {
        let buffer = self.active_mut(id)?;
        let recalled = buffer.history.next().map(str::to_string);
        Self::replace_input(buffer, recalled.as_deref().unwrap_or(""));
        Ok(recalled)
    }

    pub fn set_close_callback(
        &mut self,
        id: BufferId,
        callback: Option<CloseCallback>,
    ) -> Result<(), BufferError> {
        self.active_mut(id)?.close_callback = callback;
        Ok(())
    }

    pub fn set_input_callback(
        &mut self,
        id: BufferId,
        callback: Option<InputCallback>,
    ) -> Result<(), BufferError> {
        self.active_mut(id)?.input_callback = callback;
        Ok(())
    }

    /// Submit a line of input: recorded in history, then handed to the
    /// input callback. `None` when the buffer has no callback.
    pub fn input_data(
        &mut self,
        id: BufferId,
        text: &str,
    ) -> Result<Option<CallbackStatus>, BufferError> {
        let buffer = self.active_mut(id)?;
        if !buffer.input_enabled {
            return Ok(None);
        }
        buffer.history.add(text);
        let Some(mut callback) = buffer.input_callback.take() else {
            return Ok(None);
        };

        let status = self.registry.get(id).map(|buffer| callback(buffer, text));
        if let Some(buffer) = self.registry.get_mut(id) {
            buffer.input_callback.get_or_insert(callback);
        }
        if status == Some(CallbackStatus::Error) {
            tracing::debug!(buffer = %id, "Input callback reported an error");
        }
        Ok(status)
    }

    /// Show the buffer before the one in `window`, wrapping to the tail.
    pub fn switch_previous(&mut self, window: WindowId) -> bool {
        let Some(current) = self.windows.get(window).and_then(|w| w.buffer()) else {
            return false;
        };
        if self.registry.len() < 2 {
            return false;
        }
        let target = self.registry.prev(current).or_else(|| self.registry.last());
        match target {
            Some(target) if target != current => {
                self.switch_window_to_buffer(window, target);
                true
            }
            _ => false,
        }
    }

    /// Show the buffer after the one in `window`, wrapping to the head.
    pub fn switch_next(&mut self, window: WindowId) -> bool {
        let Some(current) = self.windows.get(window).and_then(|w| w.buffer()) else {
            return false;
        };
        if self.registry.len() < 2 {
            return false;
        }
        let target = self.registry.next(current).or_else(|| self.registry.first());
        match target {
            Some(target) if target != current => {
                self.switch_window_to_buffer(window, target);
                true
            }
            _ => false,
        }
    }

    /// Show the buffer holding `number` in `window`.
    pub fn switch_by_number(&mut self, window: WindowId, number: u32) -> bool {
        let current = self.windows.get(window).and_then(|w| w.buffer());
        match self.registry.by_number(number) {
            Some(target) if Some(target) != current => {
                self.switch_window_to_buffer(window, target);
                true
            }
            _ => false,
        }
    }

    /// Show `id` in the current window.
    pub fn display(&mut self, id: BufferId) -> Result<(), BufferError> {
        self.active_mut(id)?;
        let window = self.windows.current_id();
        if self.windows.current().buffer() != Some(id) {
            self.switch_window_to_buffer(window, id);
        }
        Ok(())
    }

    /// Move a buffer to another position; numbers of everything between
    /// shift by one.
    pub fn move_to_number(&mut self, id: BufferId, number: u32) -> Result<(), BufferError> {
        self.active_mut(id)?;
        let Some((old_number, new_number)) = self.registry.move_to(id, number) else {
            return Ok(());
        };
        tracing::debug!(buffer = %id, old_number, new_number, "Buffer moved");

        self.bus.redraw(id);
        self.status_refresh_needed = true;
        if let Some(buffer) = self.registry.get(id) {
            self.bus.emit(&Signal::BufferMoved {
                buffer,
                old_number,
                new_number,
            });
        }
        Ok(())
    }

    /// Remember owners by name and detach them, ahead of a plugin reload.
    pub fn detach_plugin_for_upgrade(&mut self, plugin_name: &str) -> usize {
        let mut detached = 0;
        for buffer in self.registry.iter_mut() {
            if buffer.plugin.as_ref().map(PluginId::name) == Some(plugin_name) {
                buffer.plugin = None;
                buffer.plugin_name_for_upgrade = Some(plugin_name.to_string());
                detached += 1;
            }
        }
        detached
    }

    /// Give buffers recorded under `plugin_name` back to their reloaded owner.
    pub fn set_plugin_for_upgrade(&mut self, plugin_name: &str, plugin: &PluginId) -> usize {
        let mut rebound = 0;
        for buffer in self.registry.iter_mut() {
            if buffer.plugin_name_for_upgrade.as_deref() == Some(plugin_name) {
                buffer.plugin = Some(plugin.clone());
                buffer.plugin_name_for_upgrade = None;
                rebound += 1;
            }
        }
        tracing::debug!(plugin = plugin_name, rebound, "Buffers rebound after upgrade");
        rebound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalLog;
    use std::cell::Cell;
    use std::rc::Rc;

    fn irc() -> Option<PluginId> {
        Some(PluginId::new("irc"))
    }

    #[test]
    fn create_rejects_empty_and_duplicate_names() {
        let mut dir = BufferDirectory::default();
        assert_eq!(dir.create(None, "", None, None), Err(BufferError::EmptyName));
        dir.create(irc(), "freenode", None, None).unwrap();
        assert!(matches!(
            dir.create(irc(), "freenode", None, None),
            Err(BufferError::DuplicateName { .. })
        ));
        // same name, other owner
        assert!(dir.create(None, "freenode", None, None).is_ok());
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn first_buffer_is_attached_to_current_window() {
        let mut dir = BufferDirectory::default();
        let first = dir.create(None, "weechat", None, None).unwrap();
        let second = dir.create(irc(), "freenode", None, None).unwrap();
        assert_eq!(dir.current_buffer(), Some(first));
        assert_eq!(dir.get(first).unwrap().num_displayed(), 1);
        assert_eq!(dir.get(second).unwrap().num_displayed(), 0);
    }

    #[test]
    fn close_runs_callback_once_and_switches_windows() {
        let mut dir = BufferDirectory::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let core = dir.create(None, "weechat", None, None).unwrap();
        let chan = dir
            .create(
                irc(),
                "freenode.#rust",
                None,
                Some(Box::new(move |_: &Buffer| {
                    counter.set(counter.get() + 1);
                    CallbackStatus::Error
                })),
            )
            .unwrap();
        dir.display(chan).unwrap();

        dir.close(chan, true).unwrap();
        assert_eq!(calls.get(), 1);
        assert!(!dir.is_valid(chan));
        assert_eq!(dir.current_buffer(), Some(core));
        assert_eq!(dir.previous_buffer(), None);
        assert_eq!(dir.close(chan, true), Err(BufferError::NotFound(chan)));
    }

    #[test]
    fn close_without_switch_leaves_window_empty() {
        let mut dir = BufferDirectory::default();
        let core = dir.create(None, "weechat", None, None).unwrap();
        dir.create(irc(), "freenode", None, None).unwrap();
        dir.close(core, false).unwrap();
        assert_eq!(dir.current_buffer(), None);
    }

    #[test]
    fn close_sees_closing_state_in_callback() {
        let mut dir = BufferDirectory::default();
        let seen = Rc::new(Cell::new(None));
        let probe = Rc::clone(&seen);
        let id = dir
            .create(
                None,
                "weechat",
                None,
                Some(Box::new(move |buffer: &Buffer| {
                    probe.set(Some(buffer.state()));
                    CallbackStatus::Ok
                })),
            )
            .unwrap();
        dir.close(id, false).unwrap();
        assert_eq!(seen.get(), Some(BufferState::Closing));
    }

    #[test]
    fn rename_refuses_taken_name_and_ignores_empty() {
        let mut dir = BufferDirectory::default();
        let a = dir.create(irc(), "a", None, None).unwrap();
        dir.create(irc(), "b", None, None).unwrap();
        assert!(dir.rename(a, "b").is_err());
        dir.rename(a, "").unwrap();
        assert_eq!(dir.get(a).unwrap().name(), "a");
        dir.rename(a, "c").unwrap();
        assert_eq!(dir.search_by_name(Some("irc"), Some("c")), Some(a));
    }

    #[test]
    fn set_kind_discards_lines() {
        let mut dir = BufferDirectory::default();
        let id = dir.create(None, "weechat", None, None).unwrap();
        dir.print_line(id, crate::buffer::Line::new(None, "hi")).unwrap();
        dir.set_kind(id, BufferKind::Formatted).unwrap();
        assert_eq!(dir.get(id).unwrap().lines().len(), 1);
        dir.set_kind(id, BufferKind::Free).unwrap();
        assert!(dir.get(id).unwrap().lines().is_empty());
        assert_eq!(dir.get(id).unwrap().refresh().chat, 2);
    }

    #[test]
    fn input_data_records_history_and_keeps_callback() {
        let mut dir = BufferDirectory::default();
        let id = dir
            .create(
                irc(),
                "freenode",
                Some(Box::new(|buffer: &Buffer, text: &str| {
                    if text.starts_with('/') && buffer.name() == "freenode" {
                        CallbackStatus::Ok
                    } else {
                        CallbackStatus::Error
                    }
                })),
                None,
            )
            .unwrap();
        assert_eq!(dir.input_data(id, "/join #rust"), Ok(Some(CallbackStatus::Ok)));
        assert_eq!(dir.input_data(id, "hello"), Ok(Some(CallbackStatus::Error)));
        assert!(dir.get(id).unwrap().has_input_callback());
        assert_eq!(dir.get(id).unwrap().history().len(), 2);

        let bare = dir.create(None, "weechat", None, None).unwrap();
        assert_eq!(dir.input_data(bare, "x"), Ok(None));
    }

    #[test]
    fn history_recall_fills_input() {
        let mut dir = BufferDirectory::default();
        let id = dir.create(None, "weechat", None, None).unwrap();
        assert_eq!(dir.history_previous(id), Ok(None));
        dir.input_data(id, "/help").unwrap();
        dir.input_data(id, "/quit").unwrap();

        assert_eq!(dir.history_previous(id), Ok(Some("/quit".to_string())));
        assert_eq!(dir.history_previous(id), Ok(Some("/help".to_string())));
        assert_eq!(dir.history_previous(id), Ok(Some("/help".to_string())));
        assert_eq!(dir.get(id).unwrap().input().text(), "/help");

        assert_eq!(dir.history_next(id), Ok(Some("/quit".to_string())));
        assert_eq!(dir.history_next(id), Ok(None));
        assert_eq!(dir.get(id).unwrap().input().text(), "");
    }

    #[test]
    fn input_change_stops_completion() {
        let mut dir = BufferDirectory::default();
        let id = dir.create(None, "weechat", None, None).unwrap();
        if let Some(completion) = dir.registry.get_mut(id).unwrap().completion.as_mut() {
            completion.position = Some(2);
            completion.word_found = Some("freenode".to_string());
        }
        dir.set_input_text(id, "/join").unwrap();
        let completion = dir.get(id).unwrap().completion().unwrap();
        assert!(!completion.is_active());
        assert_eq!(completion.word_found, None);
    }

    #[test]
    fn switching_away_marks_lines_read() {
        let mut dir = BufferDirectory::default();
        let a = dir.create(None, "a", None, None).unwrap();
        let b = dir.create(None, "b", None, None).unwrap();
        dir.print_line(a, crate::buffer::Line::new(None, "one")).unwrap();
        dir.print_line(a, crate::buffer::Line::new(None, "two")).unwrap();
        assert_eq!(dir.get(a).unwrap().lines().last_read(), None);

        dir.display(b).unwrap();
        assert_eq!(dir.get(a).unwrap().lines().last_read(), Some(1));
        assert_eq!(dir.get(b).unwrap().lines().last_read(), None);
    }

    #[test]
    fn switching_wraps_and_tracks_previous() {
        let mut dir = BufferDirectory::default();
        let a = dir.create(None, "a", None, None).unwrap();
        let b = dir.create(None, "b", None, None).unwrap();
        let c = dir.create(None, "c", None, None).unwrap();
        let window = dir.windows().current_id();

        assert!(dir.switch_previous(window));
        assert_eq!(dir.current_buffer(), Some(c));
        assert_eq!(dir.previous_buffer(), Some(a));
        assert!(dir.switch_next(window));
        assert_eq!(dir.current_buffer(), Some(a));
        assert!(dir.switch_by_number(window, 2));
        assert_eq!(dir.current_buffer(), Some(b));
        assert!(!dir.switch_by_number(window, 2));
        assert!(!dir.switch_by_number(window, 9));
        assert_eq!(dir.get(b).unwrap().num_displayed(), 1);
        assert_eq!(dir.get(a).unwrap().num_displayed(), 0);
    }

    #[test]
    fn move_emits_old_and_new_numbers() {
        let mut dir = BufferDirectory::default();
        let log = SignalLog::shared();
        dir.subscribe(Rc::clone(&log));
        let a = dir.create(None, "a", None, None).unwrap();
        dir.create(None, "b", None, None).unwrap();
        dir.move_to_number(a, 2).unwrap();
        dir.move_to_number(a, 2).unwrap();

        let log = log.borrow();
        assert_eq!(log.names(), vec!["buffer_open", "buffer_open", "buffer_moved"]);
        assert!(log.redraws.contains(&a));
        assert_eq!(dir.get(a).unwrap().number(), 2);
    }

    #[test]
    fn upgrade_rebinds_owner() {
        let mut dir = BufferDirectory::default();
        let id = dir.create(irc(), "freenode", None, None).unwrap();
        assert_eq!(dir.detach_plugin_for_upgrade("irc"), 1);
        assert_eq!(dir.get(id).unwrap().plugin(), None);
        assert_eq!(dir.get(id).unwrap().owner_name(), "irc");
        assert_eq!(dir.get(id).unwrap().plugin_name_for_upgrade(), Some("irc"));

        let reloaded = PluginId::new("irc");
        assert_eq!(dir.set_plugin_for_upgrade("irc", &reloaded), 1);
        assert_eq!(dir.get(id).unwrap().plugin(), Some(&reloaded));
        assert_eq!(dir.get(id).unwrap().plugin_name_for_upgrade(), None);
    }

    #[test]
    fn detached_buffers_keep_their_owner_name() {
        let mut dir = BufferDirectory::default();
        let core = dir.create(None, "freenode", None, None).unwrap();
        let detached = dir.create(irc(), "freenode", None, None).unwrap();
        dir.detach_plugin_for_upgrade("irc");

        assert_eq!(dir.registry().find("core", "freenode"), Some(core));
        assert_eq!(dir.registry().find("irc", "freenode"), Some(detached));
        assert_eq!(dir.get(detached).unwrap().full_name(), "irc.freenode");
        assert!(matches!(
            dir.create(irc(), "freenode", None, None),
            Err(BufferError::DuplicateName { .. })
        ));

        assert_eq!(dir.set_plugin_for_upgrade("irc", &PluginId::new("irc")), 1);
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.check_numbering(), Ok(()));
    }

    #[test]
    fn clear_resets_scroll_and_hotlist() {
        let mut dir = BufferDirectory::default();
        let id = dir.create(None, "weechat", None, None).unwrap();
        dir.print_line(id, crate::buffer::Line::new(None, "one")).unwrap();
        let window = dir.windows().current_id();
        dir.scroll_window(window, 0);
        dir.take_refresh(id);

        dir.clear(id).unwrap();
        assert!(dir.get(id).unwrap().lines().is_empty());
        assert!(!dir.hotlist().contains(id));
        assert!(!dir.windows().current().is_scrolled());
        assert_eq!(dir.get(id).unwrap().refresh().chat, 2);
        assert!(dir.take_status_refresh());
    }
}
