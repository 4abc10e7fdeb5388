//! Snapshots of the directory for plugins, scripts and crash dumps.

mod dump;
mod infolist;

pub use infolist::{to_json, BufferInfo, LineInfo};
