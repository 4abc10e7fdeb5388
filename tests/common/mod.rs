//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use chatbuf::buffer::{BufferId, PluginId};
use chatbuf::directory::BufferDirectory;
use std::path::PathBuf;
use tempfile::TempDir;

/// Directory holding one buffer per `(owner, name)` pair, created in order.
pub fn directory_with(buffers: &[(Option<&str>, &str)]) -> (BufferDirectory, Vec<BufferId>) {
    let mut dir = BufferDirectory::default();
    let ids = buffers
        .iter()
        .map(|(owner, name)| {
            dir.create(owner.map(PluginId::new), name, None, None)
                .expect("Failed to create buffer")
        })
        .collect();
    (dir, ids)
}

/// Directory with core buffers `b1..=bN`.
pub fn numbered_directory(count: usize) -> (BufferDirectory, Vec<BufferId>) {
    let names: Vec<String> = (1..=count).map(|i| format!("b{i}")).collect();
    let pairs: Vec<(Option<&str>, &str)> = names.iter().map(|n| (None, n.as_str())).collect();
    directory_with(&pairs)
}

/// Buffer names in display order.
pub fn names(dir: &BufferDirectory) -> Vec<String> {
    dir.registry()
        .iter()
        .map(|buffer| buffer.name().to_string())
        .collect()
}

/// Buffer numbers in display order.
pub fn numbers(dir: &BufferDirectory) -> Vec<u32> {
    dir.registry().iter().map(|buffer| buffer.number()).collect()
}

/// Panics unless the registry is numbered `1..=N`.
pub fn assert_numbering(dir: &BufferDirectory) {
    if let Err(err) = dir.check_numbering() {
        panic!("numbering broken: {err}");
    }
    let expected: Vec<u32> = (1..=dir.len() as u32).collect();
    assert_eq!(numbers(dir), expected);
}

/// Create a temporary config file with the given content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
