//! Error types for manifest generation

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while collecting entries or writing the manifest.
///
/// Every variant aborts the run; nothing here is retried.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to walk {}: {source}", dir.display())]
    Walk {
        dir: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
