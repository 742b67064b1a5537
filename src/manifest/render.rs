//! Renderer module
//!
//! Writes the manifest text and renders entry listings (text, jsonl, json).

use std::io::{self, Write};

use crate::manifest::scan::ManifestEntry;

pub const HEADER: &str = "CACHE MANIFEST";
pub const NETWORK_SECTION: &str = "NETWORK:";
pub const NETWORK_WILDCARD: &str = "*";

/// Write a complete manifest:
///
/// ```text
/// CACHE MANIFEST
/// #<timestamp>
///
/// /src/app.js
///
/// NETWORK:
/// *
/// ```
pub fn write_manifest<W: Write>(
    out: &mut W,
    timestamp: &str,
    entries: &[ManifestEntry],
) -> io::Result<()> {
    out.write_all(render_manifest(timestamp, entries).as_bytes())
}

/// Render a manifest to a string
pub fn render_manifest(timestamp: &str, entries: &[ManifestEntry]) -> String {
    let mut text = String::new();
    text.push_str(HEADER);
    text.push('\n');

    // The timestamp changes on every run, forcing clients to refetch
    text.push('#');
    text.push_str(timestamp);
    text.push_str("\n\n");

    for entry in entries {
        text.push_str(&entry.line());
    }

    text.push('\n');
    text.push_str(NETWORK_SECTION);
    text.push('\n');
    text.push_str(NETWORK_WILDCARD);
    text.push('\n');
    text
}

/// Output format for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    #[default]
    Text,
    Jsonl,
    Json,
}

impl std::str::FromStr for ListFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ListFormat::Text),
            "jsonl" => Ok(ListFormat::Jsonl),
            "json" => Ok(ListFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render entries for the `list` command
pub fn render_entries(entries: &[ManifestEntry], format: ListFormat) -> String {
    match format {
        ListFormat::Text => entries
            .iter()
            .map(|e| e.path.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        ListFormat::Jsonl => entries
            .iter()
            .filter_map(|e| serde_json::to_string(e).ok())
            .collect::<Vec<_>>()
            .join("\n"),
        ListFormat::Json => {
            serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dir: &str, path: &str) -> ManifestEntry {
        ManifestEntry {
            source_dir: dir.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_manifest_bytes() {
        let entries = vec![
            entry("src", "/src/app.js"),
            entry("styles", "/styles/main.css"),
        ];
        let text = render_manifest("2010-05-01 12:34:56.000000", &entries);

        assert_eq!(
            text,
            "CACHE MANIFEST\n\
             #2010-05-01 12:34:56.000000\n\
             \n\
             /src/app.js\n\
             /styles/main.css\n\
             \n\
             NETWORK:\n\
             *\n"
        );
    }

    #[test]
    fn test_manifest_without_entries() {
        let text = render_manifest("ts", &[]);
        assert_eq!(text, "CACHE MANIFEST\n#ts\n\n\nNETWORK:\n*\n");
    }

    #[test]
    fn test_write_manifest_matches_render() {
        let entries = vec![entry("styles", "/styles/main.css")];
        let mut buf = Vec::new();
        write_manifest(&mut buf, "ts", &entries).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), render_manifest("ts", &entries));
    }

    #[test]
    fn test_manifest_framing() {
        let text = render_manifest("ts", &[entry("js", "/js/a.js")]);
        assert!(text.starts_with("CACHE MANIFEST\n"));
        assert!(text.ends_with("NETWORK:\n*\n"));
    }

    #[test]
    fn test_list_format_parse() {
        assert_eq!("text".parse::<ListFormat>().unwrap(), ListFormat::Text);
        assert_eq!("JSONL".parse::<ListFormat>().unwrap(), ListFormat::Jsonl);
        assert_eq!("json".parse::<ListFormat>().unwrap(), ListFormat::Json);
        assert!("yaml".parse::<ListFormat>().is_err());
    }

    #[test]
    fn test_render_entries_text() {
        let entries = vec![entry("src", "/src/a.js"), entry("js", "/js/b.js")];
        assert_eq!(
            render_entries(&entries, ListFormat::Text),
            "/src/a.js\n/js/b.js"
        );
    }

    #[test]
    fn test_render_entries_jsonl() {
        let entries = vec![entry("src", "/src/a.js")];
        let out = render_entries(&entries, ListFormat::Jsonl);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["source_dir"], "src");
        assert_eq!(value["path"], "/src/a.js");
    }

    #[test]
    fn test_render_entries_json_empty() {
        assert_eq!(render_entries(&[], ListFormat::Json), "[]");
    }
}
