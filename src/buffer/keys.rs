//! Buffer-local key bindings.

use serde::Serialize;

/// A single key → command binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyBinding {
    pub key: String,
    pub command: String,
}

/// Sorted binding table local to one buffer.
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    bindings: Vec<KeyBinding>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `command`, replacing an existing binding for the key.
    ///
    /// Empty keys or commands are ignored and return false.
    pub fn bind(&mut self, key: &str, command: &str) -> bool {
        if key.is_empty() || command.is_empty() {
            return false;
        }
        self.unbind(key);
        let binding = KeyBinding {
            key: key.to_string(),
            command: command.to_string(),
        };
        let pos = self
            .bindings
            .partition_point(|existing| existing.key.as_str() < key);
        self.bindings.insert(pos, binding);
        tracing::trace!(key, command, "Bound buffer key");
        true
    }

    pub fn unbind(&mut self, key: &str) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|binding| binding.key != key);
        before != self.bindings.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| binding.key == key)
            .map(|binding| binding.command.as_str())
    }

    pub fn free_all(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter()
    }
}
