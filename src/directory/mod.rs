//! The buffer directory: registry, windows, hotlist and signal bus owned by
//! one value.
//!
//! ```text
//! caller ──→ lifecycle / property ──→ registry + sub-state ──→ SignalBus ──→ sinks
//!        └─→ search (read only)
//! ```
//!
//! Everything runs to completion on the caller's thread. Sinks only ever see
//! shared references, which keeps them from re-entering a close in progress.

mod lifecycle;
mod property;
mod search;

use crate::buffer::{Buffer, BufferId, BufferState, Line, RefreshFlags};
use crate::config::Config;
use crate::error::BufferError;
use crate::hotlist::{Hotlist, HotlistPriority};
use crate::registry::{BufferRegistry, RegistryError};
use crate::signal::{NotificationSink, SignalBus};
use crate::window::{WindowId, WindowList};

#[derive(Debug)]
pub struct BufferDirectory {
    config: Config,
    registry: BufferRegistry,
    windows: WindowList,
    hotlist: Hotlist,
    bus: SignalBus,
    /// Buffer shown before the last window switch.
    previous_buffer: Option<BufferId>,
    next_id: u64,
    status_refresh_needed: bool,
    windows_refresh_needed: bool,
}

impl Default for BufferDirectory {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl BufferDirectory {
    pub fn new(config: Config) -> Self {
        let hotlist = Hotlist::new(config.look.hotlist_add);
        Self {
            config,
            registry: BufferRegistry::new(),
            windows: WindowList::new(),
            hotlist,
            bus: SignalBus::new(),
            previous_buffer: None,
            next_id: 1,
            status_refresh_needed: false,
            windows_refresh_needed: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &BufferRegistry {
        &self.registry
    }

    pub fn windows(&self) -> &WindowList {
        &self.windows
    }

    pub fn hotlist(&self) -> &Hotlist {
        &self.hotlist
    }

    pub fn get(&self, id: BufferId) -> Option<&Buffer> {
        self.registry.get(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// True while `id` names a live buffer.
    pub fn is_valid(&self, id: BufferId) -> bool {
        self.registry.contains(id)
    }

    pub fn previous_buffer(&self) -> Option<BufferId> {
        self.previous_buffer
    }

    /// Buffer shown in the focused window.
    pub fn current_buffer(&self) -> Option<BufferId> {
        self.windows.current().buffer()
    }

    pub fn subscribe(&mut self, sink: impl NotificationSink + 'static) {
        self.bus.subscribe(Box::new(sink));
    }

    pub fn check_numbering(&self) -> Result<(), RegistryError> {
        self.registry.check_numbering()
    }

    /// Open a new window showing `buffer` (or nothing).
    pub fn add_window(&mut self, buffer: Option<BufferId>) -> WindowId {
        let id = self.windows.add(None);
        if let Some(buffer) = buffer.filter(|b| self.registry.contains(*b)) {
            self.switch_window_to_buffer(id, buffer);
        }
        self.windows_refresh_needed = true;
        id
    }

    pub fn set_current_window(&mut self, window: WindowId) -> bool {
        self.windows.set_current(window)
    }

    /// Scroll `window` back so `line` is the first displayed line.
    pub fn scroll_window(&mut self, window: WindowId, line: usize) -> bool {
        match self.windows.get_mut(window) {
            Some(window) => {
                window.scroll_to(line);
                true
            }
            None => false,
        }
    }

    pub fn set_hotlist_initial_buffer(&mut self, buffer: Option<BufferId>) {
        self.hotlist
            .set_initial_buffer(buffer.filter(|b| self.registry.contains(*b)));
    }

    /// Append a line to a buffer and record the activity in the hotlist
    /// according to the buffer's notify level.
    pub fn print_line(&mut self, id: BufferId, line: Line) -> Result<(), BufferError> {
        let buffer = self.active_mut(id)?;
        let priority = if line.highlight {
            HotlistPriority::Highlight
        } else {
            HotlistPriority::Message
        };
        let displayed = line.displayed;
        buffer.lines.push(line);
        buffer.refresh.ask_chat(1);
        let notify = buffer.notify.as_int();

        let required = match priority {
            HotlistPriority::Highlight => 1,
            _ => 2,
        };
        if displayed && notify >= required {
            self.hotlist.add(id, priority);
        }
        Ok(())
    }

    pub fn ask_title_refresh(&mut self, id: BufferId, level: u8) {
        if let Some(buffer) = self.registry.get_mut(id) {
            buffer.refresh.ask_title(level);
        }
    }

    pub fn ask_chat_refresh(&mut self, id: BufferId, level: u8) {
        if let Some(buffer) = self.registry.get_mut(id) {
            buffer.refresh.ask_chat(level);
        }
    }

    pub fn ask_nicklist_refresh(&mut self, id: BufferId, level: u8) {
        if let Some(buffer) = self.registry.get_mut(id) {
            buffer.refresh.ask_nicklist(level);
        }
    }

    pub fn ask_input_refresh(&mut self, id: BufferId, level: u8) {
        if let Some(buffer) = self.registry.get_mut(id) {
            buffer.refresh.ask_input(level);
        }
    }

    /// Hand pending refresh levels to the renderer, resetting them.
    pub fn take_refresh(&mut self, id: BufferId) -> Option<RefreshFlags> {
        self.registry
            .get_mut(id)
            .map(|buffer| buffer.refresh.take())
    }

    pub fn take_status_refresh(&mut self) -> bool {
        std::mem::take(&mut self.status_refresh_needed)
    }

    pub fn take_windows_refresh(&mut self) -> bool {
        std::mem::take(&mut self.windows_refresh_needed)
    }

    fn active_mut(&mut self, id: BufferId) -> Result<&mut Buffer, BufferError> {
        let buffer = self.registry.get_mut(id).ok_or(BufferError::NotFound(id))?;
        if buffer.state == BufferState::Closing {
            return Err(BufferError::Closing(id));
        }
        Ok(buffer)
    }

    /// Show `buffer` in `window`, keeping display counts and the
    /// previous-buffer tracker in step.
    fn switch_window_to_buffer(&mut self, window: WindowId, buffer: BufferId) {
        let Some(win) = self.windows.get_mut(window) else {
            return;
        };
        let old = win.buffer.replace(buffer);
        win.reset_scroll();

        if let Some(old) = old {
            if let Some(previous) = self.registry.get_mut(old) {
                previous.num_displayed = previous.num_displayed.saturating_sub(1);
                if old != buffer {
                    previous.lines.mark_read();
                }
            }
            if old != buffer {
                self.previous_buffer = Some(old);
            }
        }
        if let Some(target) = self.registry.get_mut(buffer) {
            target.num_displayed += 1;
            target.refresh.ask_title(1);
            target.refresh.ask_chat(RefreshFlags::CHAT_FULL);
            target.refresh.ask_nicklist(1);
            target.refresh.ask_input(1);
        }
        self.status_refresh_needed = true;
        self.bus.redraw(buffer);
    }
}
