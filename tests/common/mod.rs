//! Common test utilities

#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Create a temporary directory with a yar.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("yar.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// A fixed reference time well after the epoch
pub fn reference_time() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

/// Create `rel` under `root` (with parent directories) and set its modification time
pub fn write_file_at(root: &Path, rel: &str, mtime: SystemTime) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = File::create(&path).unwrap();
    file.set_modified(mtime).unwrap();
    path
}

/// Turn string literals into owned pattern lists
pub fn patterns(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
