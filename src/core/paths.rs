//! Path normalization utilities
//!
//! Manifest entries always use '/' as separator and are relative to the project root.

use std::path::{Component, Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Build the URL path for a file found under `dir`, e.g. `/styles/theme.css`.
///
/// Only normal components are kept, so `./src/` and `src` produce the same entry.
/// Directory components are normalized; the file name is kept verbatim since a
/// backslash in a Unix file name is a literal character.
pub fn entry_path(dir: &Path, relative: &Path) -> String {
    let parents = relative.parent().unwrap_or_else(|| Path::new(""));

    let mut url = String::new();
    for component in dir.components().chain(parents.components()) {
        if let Component::Normal(part) = component {
            url.push('/');
            url.push_str(&normalize_path(Path::new(part)));
        }
    }
    if let Some(name) = relative.file_name() {
        url.push('/');
        url.push_str(&name.to_string_lossy());
    }
    url
}

/// Extension as the substring from the last '.' to the end of the name.
///
/// `.DS_Store` is its own extension; a name without a dot has none.
pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|idx| &file_name[idx..])
}

/// Resolve the project root from the working directory.
///
/// Invoking from inside a known scripts directory (e.g. `project/scripts`) resolves
/// to its parent so manifest paths do not depend on where the tool was started.
pub fn resolve_project_root(cwd: &Path, script_dirs: &[String]) -> PathBuf {
    let in_script_dir = cwd
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| script_dirs.iter().any(|dir| dir == name))
        .unwrap_or(false);

    match cwd.parent() {
        Some(parent) if in_script_dir => parent.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}
