//! Errors returned by directory operations.

use thiserror::Error;

use crate::buffer::BufferId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Buffer name must not be empty")]
    EmptyName,

    #[error("A buffer with same name ({owner}.{name}) already exists")]
    DuplicateName { owner: String, name: String },

    #[error("Buffer {0} not found")]
    NotFound(BufferId),

    #[error("Buffer {0} is closing")]
    Closing(BufferId),
}
