//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

/// SHA-256 hex digest of the ASCII bytes `hello`.
pub const HELLO_DIGEST: &str =
    "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// Write a source file under `dir` and return its path.
pub fn write_source(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Names of all entries currently in the store's partial directory.
pub fn partial_entries(store_root: &Path) -> Vec<String> {
    let partial = store_root.join("partial");
    if !partial.exists() {
        return Vec::new();
    }
    fs::read_dir(partial)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}
