//! Cross-platform directory path resolution
//!
//! - Linux/macOS: XDG Base Directory specification (~/.config)
//! - Windows: Known Folder API (AppData\Roaming)

use directories::BaseDirs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "helmgraph";

/// Get the configuration directory path
///
/// HELMGRAPH_CONFIG_DIR wins when set, otherwise:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/helmgraph or ~/.config/helmgraph
/// - Windows: %APPDATA%\helmgraph
///
/// Without a home directory the path is relative: ./.config/helmgraph
pub fn config_dir() -> PathBuf {
    resolve_config_dir(
        std::env::var_os("HELMGRAPH_CONFIG_DIR").map(PathBuf::from),
        platform_config_home(),
    )
}

#[cfg(not(windows))]
fn platform_config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().join(".config")))
}

#[cfg(windows)]
fn platform_config_home() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

fn resolve_config_dir(override_dir: Option<PathBuf>, config_home: Option<PathBuf>) -> PathBuf {
    match override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => config_home
            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
            .join(APP_DIR),
    }
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
