//! Object-path mirror of the buffer list for external bus consumers.
//!
//! Each buffer is published as `/org/weechat/buffer/<owner>/<name>`. The
//! mirror follows the directory through its signals only. Paths are unique
//! among published buffers.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::buffer::{Buffer, BufferId};
use crate::signal::{NotificationSink, Signal};

pub const PATH_ROOT: &str = "/org/weechat/buffer";

/// Replace every character outside `[A-Za-z0-9_/]` with `_` and drop
/// trailing slashes.
pub fn sanitize_path(path: &str) -> String {
    let sanitized: String = path
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '/' {
                c
            } else {
                '_'
            }
        })
        .collect();
    sanitized.trim_end_matches('/').to_string()
}

pub fn object_path(buffer: &Buffer) -> String {
    sanitize_path(&format!(
        "{PATH_ROOT}/{}/{}",
        buffer.owner_name(),
        buffer.name()
    ))
}

#[derive(Debug, Default)]
pub struct ObjectMirror {
    objects: BTreeMap<String, BufferId>,
    paths: HashMap<BufferId, String>,
}

impl ObjectMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to subscribe with while keeping read access.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn lookup(&self, path: &str) -> Option<BufferId> {
        self.objects.get(path).copied()
    }

    pub fn path_of(&self, id: BufferId) -> Option<&str> {
        self.paths.get(&id).map(String::as_str)
    }

    /// Published paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn publish(&mut self, buffer: &Buffer) {
        self.withdraw(buffer.id());
        let path = self.unique_path(object_path(buffer));
        tracing::trace!(buffer = %buffer.id(), path = %path, "Object published");
        self.objects.insert(path.clone(), buffer.id());
        self.paths.insert(buffer.id(), path);
    }

    /// Sanitizing can fold two names onto one path; later buffers get a
    /// `_2`, `_3`, ... suffix.
    fn unique_path(&self, base: String) -> String {
        if !self.objects.contains_key(&base) {
            return base;
        }
        let mut suffix = 2u32;
        loop {
            let path = format!("{base}_{suffix}");
            if !self.objects.contains_key(&path) {
                tracing::debug!(path = %path, "Object path taken, using suffix");
                return path;
            }
            suffix += 1;
        }
    }

    fn withdraw(&mut self, id: BufferId) {
        if let Some(path) = self.paths.remove(&id) {
            self.objects.remove(&path);
        }
    }
}

impl NotificationSink for ObjectMirror {
    fn on_signal(&mut self, signal: &Signal<'_>) {
        match *signal {
            Signal::BufferOpen(buffer) | Signal::BufferRenamed(buffer) => self.publish(buffer),
            Signal::BufferClosed(buffer) => self.withdraw(buffer.id()),
            _ => {}
        }
    }
}
