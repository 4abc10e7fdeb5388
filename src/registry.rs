//! Ordered collection of live buffers.
//!
//! Buffers live in an arena keyed by [`BufferId`]; `order` is the display
//! order. Walking `order` from head to tail always yields numbers `1..=N`.

use std::collections::HashMap;

use thiserror::Error;

use crate::buffer::{Buffer, BufferId};

/// Raised by [`BufferRegistry::check_numbering`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Buffer '{name}' at position {expected} has number {found}")]
    Numbering {
        expected: u32,
        found: u32,
        name: String,
    },

    #[error("Buffer {0} is ordered but missing from the arena")]
    Dangling(BufferId),
}

#[derive(Debug, Default)]
pub struct BufferRegistry {
    buffers: HashMap<BufferId, Buffer>,
    order: Vec<BufferId>,
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: BufferId) -> bool {
        self.buffers.contains_key(&id)
    }

    pub fn get(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.buffers.get_mut(&id)
    }

    /// Buffers in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.order.iter().filter_map(|id| self.buffers.get(id))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Buffer> {
        self.buffers.values_mut()
    }

    /// Ids in display order.
    pub fn ids(&self) -> &[BufferId] {
        &self.order
    }

    pub fn first(&self) -> Option<BufferId> {
        self.order.first().copied()
    }

    pub fn last(&self) -> Option<BufferId> {
        self.order.last().copied()
    }

    pub fn next(&self, id: BufferId) -> Option<BufferId> {
        let pos = self.position(id)?;
        self.order.get(pos + 1).copied()
    }

    pub fn prev(&self, id: BufferId) -> Option<BufferId> {
        let pos = self.position(id)?;
        pos.checked_sub(1).map(|p| self.order[p])
    }

    /// Exact lookup by owner name (`core` for no plugin) and buffer name.
    pub fn find(&self, owner: &str, name: &str) -> Option<BufferId> {
        self.iter()
            .find(|buffer| buffer.is_named(owner, name))
            .map(Buffer::id)
    }

    pub fn by_number(&self, number: u32) -> Option<BufferId> {
        self.iter()
            .find(|buffer| buffer.number == number)
            .map(Buffer::id)
    }

    /// Link `buffer` at the tail and give it the next number.
    pub fn append(&mut self, mut buffer: Buffer) -> u32 {
        let number = self
            .last()
            .and_then(|id| self.buffers.get(&id))
            .map_or(1, |last| last.number + 1);
        buffer.number = number;
        let id = buffer.id;
        self.order.push(id);
        self.buffers.insert(id, buffer);
        number
    }

    /// Decrement the number of every buffer after `id`.
    pub(crate) fn renumber_after(&mut self, id: BufferId) {
        let Some(pos) = self.position(id) else {
            return;
        };
        for next in &self.order[pos + 1..] {
            if let Some(buffer) = self.buffers.get_mut(next) {
                buffer.number -= 1;
            }
        }
    }

    /// Unlink `id` without touching other numbers.
    pub(crate) fn unlink(&mut self, id: BufferId) -> Option<Buffer> {
        let pos = self.position(id)?;
        self.order.remove(pos);
        self.buffers.remove(&id)
    }

    /// Unlink `id` and close the numbering gap it leaves.
    pub fn remove(&mut self, id: BufferId) -> Option<Buffer> {
        self.renumber_after(id);
        self.unlink(id)
    }

    /// Move `id` so that it ends up holding `target` (clamped to at least 1).
    ///
    /// Returns the old and new numbers, or `None` when nothing moved: a
    /// single buffer, an unknown id, or a target equal to the current number.
    /// A target beyond the last number appends at the tail.
    pub fn move_to(&mut self, id: BufferId, target: u32) -> Option<(u32, u32)> {
        if self.order.len() < 2 {
            return None;
        }
        let target = target.max(1);
        let old = self.buffers.get(&id)?.number;
        if target == old {
            return None;
        }
        let pos = self.position(id)?;
        self.order.remove(pos);

        if target == 1 {
            self.order.insert(0, id);
        } else {
            // numbers must match the order before searching by number
            self.renumber();
            let holder = self
                .order
                .iter()
                .position(|other| self.buffers.get(other).map(|b| b.number) == Some(target));
            match holder {
                Some(index) => self.order.insert(index, id),
                None => self.order.push(id),
            }
        }
        self.renumber();

        let new = self.buffers.get(&id).map_or(target, |b| b.number);
        Some((old, new))
    }

    /// Reassign numbers `1..=N` following the current order.
    pub fn renumber(&mut self) {
        for (index, id) in self.order.iter().enumerate() {
            if let Some(buffer) = self.buffers.get_mut(id) {
                buffer.number = index as u32 + 1;
            }
        }
    }

    /// Verify that walking the order yields `1..=N`.
    pub fn check_numbering(&self) -> Result<(), RegistryError> {
        for (index, id) in self.order.iter().enumerate() {
            let buffer = self.buffers.get(id).ok_or(RegistryError::Dangling(*id))?;
            let expected = index as u32 + 1;
            if buffer.number != expected {
                return Err(RegistryError::Numbering {
                    expected,
                    found: buffer.number,
                    name: buffer.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn position(&self, id: BufferId) -> Option<usize> {
        self.order.iter().position(|other| *other == id)
    }
}
