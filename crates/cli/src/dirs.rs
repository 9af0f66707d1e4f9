//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific log directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/auto-xp/logs`
/// - Linux: `~/.cache/auto-xp/logs` (or `$XDG_CACHE_HOME/auto-xp/logs`)
/// - Windows: `%LOCALAPPDATA%\auto-xp\cache\logs`
/// - Fallback: `<tmp>/auto-xp/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "auto-xp")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("auto-xp"))
        .join("logs")
}
