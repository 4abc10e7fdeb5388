//! Window bookkeeping the directory needs.
//!
//! Geometry and drawing belong to the renderer. A window here is just the
//! buffer it shows and its scroll position markers.

use crate::buffer::BufferId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    id: WindowId,
    pub(crate) buffer: Option<BufferId>,
    /// The user scrolled back and no longer sees the end of the buffer.
    pub(crate) scroll: bool,
    pub(crate) first_line_displayed: bool,
    pub(crate) start_line: Option<usize>,
    pub(crate) start_line_pos: usize,
}

impl Window {
    fn new(id: WindowId, buffer: Option<BufferId>) -> Self {
        Self {
            id,
            buffer,
            scroll: false,
            first_line_displayed: true,
            start_line: None,
            start_line_pos: 0,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn buffer(&self) -> Option<BufferId> {
        self.buffer
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll
    }

    pub fn first_line_displayed(&self) -> bool {
        self.first_line_displayed
    }

    pub fn start_line(&self) -> Option<usize> {
        self.start_line
    }

    pub fn start_line_pos(&self) -> usize {
        self.start_line_pos
    }

    /// Scroll back so that `line` is the first one displayed.
    pub(crate) fn scroll_to(&mut self, line: usize) {
        self.scroll = true;
        self.first_line_displayed = line == 0;
        self.start_line = Some(line);
        self.start_line_pos = 0;
    }

    /// Jump back to the end of the buffer.
    pub(crate) fn reset_scroll(&mut self) {
        self.scroll = false;
        self.first_line_displayed = true;
        self.start_line = None;
        self.start_line_pos = 0;
    }
}

/// All windows plus the one holding focus.
#[derive(Debug)]
pub struct WindowList {
    windows: Vec<Window>,
    current: WindowId,
    next_id: u32,
}

impl Default for WindowList {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowList {
    /// One empty window, focused.
    pub fn new() -> Self {
        Self {
            windows: vec![Window::new(WindowId(1), None)],
            current: WindowId(1),
            next_id: 2,
        }
    }

    /// Open another window showing `buffer`.
    pub(crate) fn add(&mut self, buffer: Option<BufferId>) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.windows.push(Window::new(id, buffer));
        id
    }

    pub fn current(&self) -> &Window {
        self.get(self.current)
            .unwrap_or(&self.windows[0])
    }

    pub fn current_id(&self) -> WindowId {
        self.current
    }

    pub(crate) fn set_current(&mut self, id: WindowId) -> bool {
        if self.get(id).is_some() {
            self.current = id;
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|window| window.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|window| window.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        self.windows.iter_mut()
    }

    /// Ids of windows currently showing `buffer`.
    pub fn showing(&self, buffer: BufferId) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|window| window.buffer == Some(buffer))
            .map(Window::id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
