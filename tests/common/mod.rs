//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary config root with a wapi.yml file
pub fn create_test_root(config: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wapi.yml");
    fs::write(&config_path, config).unwrap();
    (temp_dir, config_path)
}

/// Write `<root>/module/<name>.yml`
pub fn write_module(root: &TempDir, name: &str, content: &str) -> PathBuf {
    let module_dir = root.path().join("module");
    fs::create_dir_all(&module_dir).unwrap();
    let path = module_dir.join(format!("{}.yml", name));
    fs::write(&path, content).unwrap();
    path
}

/// Write `<root>/env/<space>.yml`
pub fn write_env(root: &TempDir, space: &str, content: &str) -> PathBuf {
    let env_dir = root.path().join("env");
    fs::create_dir_all(&env_dir).unwrap();
    let path = env_dir.join(format!("{}.yml", space));
    fs::write(&path, content).unwrap();
    path
}
