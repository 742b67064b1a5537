//! Entry producer
//!
//! Walks one source directory with the ignore crate's walker, standard filters off,
//! so dotfiles and gitignored assets are still listed.

use ignore::{DirEntry, WalkBuilder};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::core::config::ManifestConfig;
use crate::core::error::ManifestError;
use crate::core::paths::{entry_path, normalize_path};

/// One cached file, e.g. `/styles/main.css`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ManifestEntry {
    /// Configured source directory that produced this entry
    pub source_dir: String,

    /// URL path, always starting with '/'
    pub path: String,
}

impl ManifestEntry {
    /// The entry as written to the manifest, newline included
    pub fn line(&self) -> String {
        format!("{}\n", self.path)
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Collect manifest entries for every file under `dir` (relative to `project_root`).
///
/// Siblings are visited in file name order. Subtrees named in `ignored_dirs` are not
/// entered, and files whose extension is excluded are dropped. A missing directory is
/// an error: an empty result would silently drop assets from the manifest.
pub fn produce_manifest_entries(
    project_root: &Path,
    dir: &Path,
    config: &ManifestConfig,
) -> Result<Vec<ManifestEntry>, ManifestError> {
    let scan_path = project_root.join(dir);

    match fs::metadata(&scan_path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ManifestError::NotADirectory { path: scan_path }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ManifestError::DirectoryNotFound { path: scan_path })
        }
        Err(e) => return Err(ManifestError::io(scan_path, e)),
    }

    let ignored = config.clone();
    let mut builder = WalkBuilder::new(&scan_path);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| !is_ignored(entry, &ignored));

    let source_dir = normalize_path(dir);
    let mut entries = Vec::new();

    for result in builder.build() {
        let entry = result.map_err(|source| ManifestError::Walk {
            dir: scan_path.clone(),
            source,
        })?;

        if !is_listable_file(&entry) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if config.is_excluded(&file_name) {
            debug!(path = %entry.path().display(), "excluded by extension");
            continue;
        }

        // Walk results are rooted at scan_path
        let relative = match entry.path().strip_prefix(&scan_path) {
            Ok(r) => r,
            Err(_) => continue,
        };

        entries.push(ManifestEntry {
            source_dir: source_dir.clone(),
            path: entry_path(dir, relative),
        });
    }

    Ok(entries)
}

fn is_ignored(entry: &DirEntry, config: &ManifestConfig) -> bool {
    let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
    let ignored = is_dir && config.is_ignored_dir(&entry.file_name().to_string_lossy());
    if ignored {
        debug!(path = %entry.path().display(), "skipping ignored directory");
    }
    ignored
}

/// Regular files, plus any symlink that does not resolve to a directory (dangling
/// links included)
fn is_listable_file(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        _ => false,
    }
}
