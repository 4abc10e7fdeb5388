//! Buffer directory and lifecycle manager of a terminal chat client.

pub mod buffer;
pub mod config;
pub mod directory;
pub mod error;
pub mod export;
pub mod hotlist;
pub mod logging;
pub mod mirror;
pub mod registry;
pub mod script;
pub mod signal;
pub mod window;
