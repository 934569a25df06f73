//! Directory key normalization
//!
//! Absolute directory paths are turned into display keys by removing the
//! configured root prefix. The prefix is resolved once per run and passed in
//! explicitly, so nothing here reads the environment.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Strip one leading occurrence of `prefix` from `path`.
///
/// An empty prefix, or one that does not match, leaves the path unchanged.
pub fn normalize_key(path: &str, prefix: &str) -> String {
    path.strip_prefix(prefix).unwrap_or(path).to_string()
}

/// Build the map key for a directory from its absolute path.
pub fn directory_key(absolute: &Path, prefix: &str) -> String {
    normalize_key(&absolute.to_string_lossy(), prefix)
}

/// Resolve `path` against the current directory and clean it lexically.
///
/// Symlinks are not followed; `.` components are dropped and `..` removes
/// the preceding component.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(clean(&absolute))
}

fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() && !cleaned.has_root() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}
