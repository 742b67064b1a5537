//! Manifest module - collecting entries and writing the appcache file
//!
//! Provides:
//! - scan: per-directory entry producer
//! - render: manifest text and entry listings

pub mod render;
pub mod scan;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::config::ManifestConfig;
use crate::core::error::ManifestError;
use scan::{produce_manifest_entries, ManifestEntry};

/// Outcome of a successful `generate`
#[derive(Debug, Clone)]
pub struct ManifestSummary {
    pub output: PathBuf,
    pub entries: usize,
}

/// Entries for every configured source directory, in configured order.
pub fn collect_entries(
    project_root: &Path,
    config: &ManifestConfig,
) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut all = Vec::new();
    for dir in &config.source_dirs {
        let entries = produce_manifest_entries(project_root, dir, config)?;
        debug!(dir = %dir.display(), count = entries.len(), "collected entries");
        all.extend(entries);
    }
    Ok(all)
}

/// Walk the source directories and overwrite the manifest file.
///
/// Entries are collected before the output is opened, so a walk failure leaves any
/// previous manifest in place.
pub fn generate_manifest(
    project_root: &Path,
    config: &ManifestConfig,
    timestamp: &str,
) -> Result<ManifestSummary, ManifestError> {
    let entries = collect_entries(project_root, config)?;
    let output = config.output_path(project_root);

    let file = File::create(&output).map_err(|e| ManifestError::io(&output, e))?;
    let mut writer = BufWriter::new(file);
    render::write_manifest(&mut writer, timestamp, &entries)
        .and_then(|_| writer.flush())
        .map_err(|e| ManifestError::io(&output, e))?;

    Ok(ManifestSummary {
        output,
        entries: entries.len(),
    })
}
