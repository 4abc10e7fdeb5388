//! Buffer record and the sub-state it owns.
//!
//! A [`Buffer`] is created and destroyed only by the directory; everything
//! here is either plain data or small owned collaborators (lines, nicklist,
//! input, history, completion, keys).

mod completion;
mod history;
mod input;
mod keys;
mod lines;
mod nicklist;

pub use completion::{Completion, TextSearch, TextSearchMode};
pub use history::History;
pub use input::InputState;
pub use keys::{KeyBinding, KeyTable};
pub use lines::{Line, Lines};
pub use nicklist::{Nick, NickGroup, Nicklist};

pub(crate) use lines::split_list;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Owner name used for buffers without a plugin.
pub const CORE_OWNER: &str = "core";

/// Stable handle to a buffer. Never reused within one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer#{}", self.0)
    }
}

/// Identity of the plugin owning a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginId(String);

impl PluginId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content model of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    /// Lines with prefix and message.
    #[default]
    Formatted,
    /// Free content addressed by line number.
    Free,
}

impl BufferKind {
    /// Parse a property value. The historical spelling `formated` is accepted.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("formatted") || value.eq_ignore_ascii_case("formated") {
            Some(Self::Formatted)
        } else if value.eq_ignore_ascii_case("free") {
            Some(Self::Free)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Formatted => "formatted",
            Self::Free => "free",
        }
    }

    pub fn as_int(self) -> i64 {
        match self {
            Self::Formatted => 0,
            Self::Free => 1,
        }
    }
}

/// Which events raise an attention indicator for a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    None = 0,
    Highlight = 1,
    Message = 2,
    #[default]
    All = 3,
}

impl NotifyLevel {
    pub const COUNT: i64 = 4;

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Highlight),
            2 => Some(Self::Message),
            3 => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_int(self) -> i64 {
        self as i64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Highlight => "highlight",
            Self::Message => "message",
            Self::All => "all",
        }
    }
}

/// Lifecycle position of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    Uninitialized,
    Active,
    /// Close sequence running; only reads are allowed.
    Closing,
    Freed,
}

/// Result reported by plugin callbacks. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStatus {
    Ok,
    Error,
}

/// Called with each line of input submitted on the buffer.
pub type InputCallback = Box<dyn FnMut(&Buffer, &str) -> CallbackStatus>;

/// Called once when the buffer starts closing.
pub type CloseCallback = Box<dyn FnMut(&Buffer) -> CallbackStatus>;

/// Redraw requests pending for the renderer.
///
/// Levels only go up through the `ask_*` methods. The renderer lowers them
/// back to zero with [`RefreshFlags::take`] once it has drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshFlags {
    pub title: u8,
    pub chat: u8,
    pub nicklist: u8,
    pub input: u8,
}

impl RefreshFlags {
    /// Chat refresh level that forces a full redraw.
    pub const CHAT_FULL: u8 = 2;

    pub fn ask_title(&mut self, level: u8) {
        self.title = self.title.max(level);
    }

    pub fn ask_chat(&mut self, level: u8) {
        self.chat = self.chat.max(level);
    }

    pub fn ask_nicklist(&mut self, level: u8) {
        self.nicklist = self.nicklist.max(level);
    }

    pub fn ask_input(&mut self, level: u8) {
        self.input = self.input.max(level);
    }

    pub fn any(&self) -> bool {
        self.title > 0 || self.chat > 0 || self.nicklist > 0 || self.input > 0
    }

    /// Hand the pending levels to the renderer and reset them.
    pub fn take(&mut self) -> RefreshFlags {
        std::mem::take(self)
    }
}

/// Highlight tags as configured, kept with their exploded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightTags {
    pub raw: String,
    pub tags: Vec<String>,
}

/// One conversation buffer.
pub struct Buffer {
    pub(crate) id: BufferId,
    pub(crate) number: u32,
    pub(crate) plugin: Option<PluginId>,
    pub(crate) plugin_name_for_upgrade: Option<String>,
    pub(crate) name: String,
    pub(crate) kind: BufferKind,
    pub(crate) notify: NotifyLevel,
    pub(crate) num_displayed: u32,
    pub(crate) state: BufferState,
    pub(crate) title: Option<String>,
    pub(crate) lines: Lines,
    pub(crate) nicklist: Nicklist,
    pub(crate) input_enabled: bool,
    pub(crate) input: InputState,
    pub(crate) history: History,
    pub(crate) completion: Option<Completion>,
    pub(crate) text_search: TextSearch,
    pub(crate) highlight_words: Option<String>,
    pub(crate) highlight_tags: Option<HighlightTags>,
    pub(crate) keys: KeyTable,
    pub(crate) refresh: RefreshFlags,
    pub(crate) input_callback: Option<InputCallback>,
    pub(crate) close_callback: Option<CloseCallback>,
}

impl Buffer {
    /// Build a buffer with the documented defaults. Not yet registered.
    pub(crate) fn new(id: BufferId, plugin: Option<PluginId>, name: &str, config: &Config) -> Self {
        Self {
            id,
            number: 0,
            plugin,
            plugin_name_for_upgrade: None,
            name: name.to_string(),
            kind: BufferKind::Formatted,
            notify: config.look.buffer_notify_default,
            num_displayed: 0,
            state: BufferState::Uninitialized,
            title: None,
            lines: Lines::new(),
            nicklist: Nicklist::new(),
            input_enabled: true,
            input: InputState::new(config.input.block_size),
            history: History::new(config.input.history_max),
            completion: Some(Completion::new()),
            text_search: TextSearch::default(),
            highlight_words: None,
            highlight_tags: None,
            keys: KeyTable::new(),
            refresh: RefreshFlags {
                title: 1,
                chat: RefreshFlags::CHAT_FULL,
                nicklist: 1,
                input: 1,
            },
            input_callback: None,
            close_callback: None,
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn plugin(&self) -> Option<&PluginId> {
        self.plugin.as_ref()
    }

    /// Owner name with `core` standing in for "no plugin". A buffer
    /// detached for a plugin upgrade keeps the name it was detached from.
    pub fn owner_name(&self) -> &str {
        match (&self.plugin, &self.plugin_name_for_upgrade) {
            (Some(plugin), _) => plugin.name(),
            (None, Some(upgrade)) => upgrade,
            (None, None) => CORE_OWNER,
        }
    }

    pub fn plugin_name_for_upgrade(&self) -> Option<&str> {
        self.plugin_name_for_upgrade.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner.name`, e.g. `irc.freenode.#rust`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.owner_name(), self.name)
    }

    /// Part of the name after the last `.`, or the whole name.
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, short)| short)
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    pub fn notify(&self) -> NotifyLevel {
        self.notify
    }

    pub fn num_displayed(&self) -> u32 {
        self.num_displayed
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    pub fn nicklist(&self) -> &Nicklist {
        &self.nicklist
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn text_search(&self) -> &TextSearch {
        &self.text_search
    }

    pub fn highlight_words(&self) -> Option<&str> {
        self.highlight_words.as_deref()
    }

    pub fn highlight_tags(&self) -> Option<&HighlightTags> {
        self.highlight_tags.as_ref()
    }

    pub fn keys(&self) -> &KeyTable {
        &self.keys
    }

    pub fn refresh(&self) -> RefreshFlags {
        self.refresh
    }

    pub fn has_close_callback(&self) -> bool {
        self.close_callback.is_some()
    }

    pub fn has_input_callback(&self) -> bool {
        self.input_callback.is_some()
    }

    /// True when the owner/name pair matches, `core` meaning no plugin.
    pub(crate) fn is_named(&self, owner: &str, name: &str) -> bool {
        self.owner_name() == owner && self.name == name
    }

    /// Owner filter used by searches: empty or absent matches everything.
    pub(crate) fn owner_matches(&self, owner: Option<&str>) -> bool {
        match owner {
            Some(owner) if !owner.is_empty() => self.owner_name() == owner,
            _ => true,
        }
    }

    /// Release owned sub-state in teardown order.
    ///
    /// Each step only touches its own field, so later steps never read
    /// something already released.
    pub(crate) fn release_owned(&mut self) {
        self.lines.free_all();
        self.title = None;
        self.name = String::new();
        self.input.release();
        if let Some(mut completion) = self.completion.take() {
            completion.free();
        }
        self.history.free_all();
        self.text_search.free();
        self.nicklist.remove_root();
        self.highlight_words = None;
        self.highlight_tags = None;
        self.keys.free_all();
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("id", &self.id)
            .field("number", &self.number)
            .field("owner", &self.owner_name())
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("notify", &self.notify)
            .field("state", &self.state)
            .field("title", &self.title)
            .field("lines", &self.lines.len())
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}
