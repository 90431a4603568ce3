//! Filesystem path helpers.
//!
//! Resolves where tunegrid keeps files it writes on its own behalf (trace
//! exports) and expands user-supplied paths from configuration.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "tunegrid";

/// Returns the per-user data directory for tunegrid.
///
/// Resolves to `$XDG_DATA_HOME/tunegrid` (usually `~/.local/share/tunegrid`)
/// on Linux and the platform equivalent elsewhere. Falls back to the current
/// directory when the platform reports no data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use tunegrid::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// if let Some(home) = dirs::home_dir() {
///     assert_eq!(expand_tilde("~/traces.json"), home.join("traces.json"));
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

/// Resolves a configured trace file location.
///
/// `~` is expanded; a bare relative path is placed inside [`data_dir`].
#[must_use]
pub fn resolve_trace_file(configured: &str) -> PathBuf {
    let expanded = expand_tilde(configured);
    if expanded.is_absolute() {
        expanded
    } else {
        data_dir().join(expanded)
    }
}

/// Creates the parent directory of `path` if it is missing.
///
/// # Errors
///
/// Returns the underlying I/O error when the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
