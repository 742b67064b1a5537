//! Manifest configuration
//!
//! Defaults reproduce the fixed layout (`src`, `styles`, `js` into `cache.appcache`).
//! An optional `mkappcache.json` in the project root overrides any field.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::ManifestError;
use crate::core::paths::{file_extension, resolve_project_root};

/// Config file looked up in the project root
pub const DEFAULT_CONFIG_FILE: &str = "mkappcache.json";

/// Everything the generator needs to know about the project layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Manifest filename, relative to the project root.
    pub output: PathBuf,

    /// Source directories, walked and written in this order.
    pub source_dirs: Vec<PathBuf>,

    /// Extensions (including the leading '.') that never make it into the manifest.
    /// One flat list: media formats sit next to `.excss` and `.DS_Store`.
    pub excluded_extensions: Vec<String>,

    /// Directory names whose whole subtree is skipped.
    pub ignored_dirs: Vec<String>,

    /// Directory names that resolve to their parent as project root.
    pub script_dirs: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("cache.appcache"),
            source_dirs: ["src", "styles", "js"].into_iter().map(PathBuf::from).collect(),
            excluded_extensions: [
                ".mp3", ".mp4", ".ogv", ".ogg", ".webm", ".DS_Store", ".excss",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            ignored_dirs: vec![".svn".to_string()],
            script_dirs: vec!["scripts".to_string()],
        }
    }
}

impl ManifestConfig {
    /// Load `mkappcache.json` from the project root, or defaults when it is absent.
    ///
    /// A file that exists but does not parse is an error rather than a silent fallback.
    pub fn discover(project_root: &Path) -> Result<Self, ManifestError> {
        let candidate = project_root.join(DEFAULT_CONFIG_FILE);
        match fs::read_to_string(&candidate) {
            Ok(content) => Self::parse(&candidate, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ManifestError::io(candidate, e)),
        }
    }

    /// Locate the project root from the working directory and load its config.
    ///
    /// A directory holding `mkappcache.json` is a project root. Otherwise the parent's
    /// config (or the defaults) decides, through its `script_dirs`, whether the
    /// working directory is a scripts directory of that parent.
    pub fn discover_from_cwd(cwd: &Path) -> Result<(PathBuf, Self), ManifestError> {
        if cwd.join(DEFAULT_CONFIG_FILE).is_file() {
            return Ok((cwd.to_path_buf(), Self::discover(cwd)?));
        }

        if let Some(parent) = cwd.parent() {
            let config = Self::discover(parent)?;
            if resolve_project_root(cwd, &config.script_dirs) == parent {
                return Ok((parent.to_path_buf(), config));
            }
        }

        Ok((cwd.to_path_buf(), Self::default()))
    }

    /// Read configuration from an explicit file, which must exist.
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|source| ManifestError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether a file with this name is dropped by extension.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        file_extension(file_name)
            .map(|ext| self.excluded_extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    /// Whether a directory with this name is skipped along with its subtree.
    pub fn is_ignored_dir(&self, dir_name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == dir_name)
    }

    pub fn output_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ManifestConfig::default();
        assert_eq!(config.output, PathBuf::from("cache.appcache"));
        assert_eq!(
            config.source_dirs,
            vec![
                PathBuf::from("src"),
                PathBuf::from("styles"),
                PathBuf::from("js")
            ]
        );
        assert_eq!(config.excluded_extensions.len(), 7);
        assert_eq!(config.ignored_dirs, vec![".svn"]);
    }

    #[test]
    fn test_is_excluded() {
        let config = ManifestConfig::default();
        assert!(config.is_excluded("intro.mp4"));
        assert!(config.is_excluded("theme.excss"));
        assert!(config.is_excluded(".DS_Store"));
        assert!(!config.is_excluded("app.js"));
        assert!(!config.is_excluded("README"));
        // Matching is case-sensitive
        assert!(!config.is_excluded("intro.MP4"));
    }

    #[test]
    fn test_discover_without_file() {
        let temp = tempdir().unwrap();
        let config = ManifestConfig::discover(temp.path()).unwrap();
        assert_eq!(config, ManifestConfig::default());
    }

    #[test]
    fn test_discover_partial_file() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{"output": "offline.appcache", "source_dirs": ["assets"]}"#,
        )
        .unwrap();

        let config = ManifestConfig::discover(temp.path()).unwrap();
        assert_eq!(config.output, PathBuf::from("offline.appcache"));
        assert_eq!(config.source_dirs, vec![PathBuf::from("assets")]);
        assert_eq!(config.ignored_dirs, vec![".svn"]);
    }

    #[test]
    fn test_discover_malformed_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();

        let err = ManifestConfig::discover(temp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Config { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("custom.json");
        fs::write(&path, r#"{"outptu": "typo.appcache"}"#).unwrap();

        assert!(ManifestConfig::from_path(&path).is_err());
    }

    #[test]
    fn test_from_path_missing() {
        let temp = tempdir().unwrap();
        let err = ManifestConfig::from_path(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn test_discover_from_scripts_dir_defaults() {
        let temp = tempdir().unwrap();
        let scripts = temp.path().join("scripts");
        fs::create_dir_all(&scripts).unwrap();

        let (root, config) = ManifestConfig::discover_from_cwd(&scripts).unwrap();
        assert_eq!(root, temp.path());
        assert_eq!(config, ManifestConfig::default());
    }

    #[test]
    fn test_discover_from_custom_script_dir() {
        let temp = tempdir().unwrap();
        let tools = temp.path().join("tools");
        fs::create_dir_all(&tools).unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{"source_dirs": ["public"], "script_dirs": ["tools"]}"#,
        )
        .unwrap();

        let (root, config) = ManifestConfig::discover_from_cwd(&tools).unwrap();
        assert_eq!(root, temp.path());
        assert_eq!(config.source_dirs, vec![PathBuf::from("public")]);
    }

    #[test]
    fn test_discover_from_unlisted_subdir() {
        let temp = tempdir().unwrap();
        let scripts = temp.path().join("scripts");
        fs::create_dir_all(&scripts).unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{"script_dirs": ["tools"]}"#,
        )
        .unwrap();

        // The parent's config no longer treats scripts/ as a scripts directory
        let (root, config) = ManifestConfig::discover_from_cwd(&scripts).unwrap();
        assert_eq!(root, scripts);
        assert_eq!(config, ManifestConfig::default());
    }

    #[test]
    fn test_discover_from_cwd_with_own_config() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{"output": "site.appcache"}"#,
        )
        .unwrap();

        let (root, config) = ManifestConfig::discover_from_cwd(temp.path()).unwrap();
        assert_eq!(root, temp.path());
        assert_eq!(config.output, PathBuf::from("site.appcache"));
    }
}
