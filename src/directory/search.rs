//! Read-only lookups over the directory.

use super::BufferDirectory;
use crate::buffer::{Buffer, BufferId};
use crate::window::WindowId;

impl BufferDirectory {
    /// Exact lookup. Without a name, the buffer of the current window.
    ///
    /// An absent or empty owner matches every owner; `core` stands for
    /// buffers without a plugin.
    pub fn search_by_name(&self, owner: Option<&str>, name: Option<&str>) -> Option<BufferId> {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return self.current_buffer();
        };
        self.registry
            .iter()
            .find(|buffer| buffer.owner_matches(owner) && buffer.name() == name)
            .map(Buffer::id)
    }

    /// Exact match first, then the first buffer whose name contains
    /// `fragment`.
    pub fn search_by_partial_name(&self, owner: Option<&str>, fragment: &str) -> Option<BufferId> {
        if fragment.is_empty() {
            return self.current_buffer();
        }
        let owned = |buffer: &&Buffer| buffer.owner_matches(owner);
        self.registry
            .iter()
            .filter(owned)
            .find(|buffer| buffer.name() == fragment)
            .or_else(|| {
                self.registry
                    .iter()
                    .filter(owned)
                    .find(|buffer| buffer.name().contains(fragment))
            })
            .map(Buffer::id)
    }

    pub fn search_by_number(&self, number: u32) -> Option<BufferId> {
        self.registry.by_number(number)
    }

    /// First buffer without an owning plugin, else the head of the list.
    pub fn search_main(&self) -> Option<BufferId> {
        self.registry
            .iter()
            .find(|buffer| buffer.plugin().is_none())
            .map(Buffer::id)
            .or_else(|| self.registry.first())
    }

    /// True when the buffer is shown somewhere and every window showing it
    /// is scrolled back.
    pub fn is_scrolled(&self, id: BufferId) -> bool {
        let mut showing = self
            .windows
            .iter()
            .filter(|window| window.buffer() == Some(id))
            .peekable();
        showing.peek().is_some() && showing.all(|window| window.is_scrolled())
    }

    /// A window showing `id`, preferring the current one.
    pub fn find_window(&self, id: BufferId) -> Option<WindowId> {
        let current = self.windows.current();
        if current.buffer() == Some(id) {
            return Some(current.id());
        }
        self.windows
            .iter()
            .find(|window| window.buffer() == Some(id))
            .map(|window| window.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PluginId;

    fn directory() -> (BufferDirectory, Vec<BufferId>) {
        let mut dir = BufferDirectory::default();
        let ids = vec![
            dir.create(None, "weechat", None, None).unwrap(),
            dir.create(Some(PluginId::new("irc")), "freenode", None, None)
                .unwrap(),
            dir.create(Some(PluginId::new("irc")), "freenode.#rust", None, None)
                .unwrap(),
        ];
        (dir, ids)
    }

    #[test]
    fn empty_name_falls_back_to_current_buffer() {
        let (dir, ids) = directory();
        assert_eq!(dir.search_by_name(None, None), Some(ids[0]));
        assert_eq!(dir.search_by_name(Some("irc"), Some("")), Some(ids[0]));
        assert_eq!(dir.search_by_partial_name(None, ""), Some(ids[0]));
    }

    #[test]
    fn owner_filter() {
        let (dir, ids) = directory();
        assert_eq!(dir.search_by_name(Some("irc"), Some("freenode")), Some(ids[1]));
        assert_eq!(dir.search_by_name(Some("core"), Some("freenode")), None);
        assert_eq!(dir.search_by_name(Some("core"), Some("weechat")), Some(ids[0]));
        assert_eq!(dir.search_by_name(Some(""), Some("weechat")), Some(ids[0]));
    }

    #[test]
    fn partial_prefers_exact_match() {
        let (dir, ids) = directory();
        assert_eq!(dir.search_by_partial_name(None, "freenode"), Some(ids[1]));
        assert_eq!(dir.search_by_partial_name(None, "#ru"), Some(ids[2]));
        assert_eq!(dir.search_by_partial_name(Some("core"), "free"), None);
    }

    #[test]
    fn main_and_number() {
        let (dir, ids) = directory();
        assert_eq!(dir.search_main(), Some(ids[0]));
        assert_eq!(dir.search_by_number(3), Some(ids[2]));
        assert_eq!(dir.search_by_number(0), None);
    }

    #[test]
    fn scrolled_needs_every_window() {
        let (mut dir, ids) = directory();
        assert!(!dir.is_scrolled(ids[1]));
        let first = dir.windows().current_id();
        let second = dir.add_window(Some(ids[0]));
        dir.scroll_window(first, 3);
        assert!(!dir.is_scrolled(ids[0]));
        dir.scroll_window(second, 1);
        assert!(dir.is_scrolled(ids[0]));
        assert_eq!(dir.find_window(ids[0]), Some(first));
        assert_eq!(dir.find_window(ids[2]), None);
    }
}
