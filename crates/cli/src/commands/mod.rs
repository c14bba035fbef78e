//! CLI command implementations.

pub mod convert;
pub mod selection;
pub mod token;

use std::path::{Path, PathBuf};

/// Curated selection list file within the data directory.
pub fn selection_path(data_dir: &Path) -> PathBuf {
    data_dir.join("selection.json")
}

/// Durable store file within the data directory.
pub fn store_path(data_dir: &Path) -> PathBuf {
    data_dir.join("store.json")
}
