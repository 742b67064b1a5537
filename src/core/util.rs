//! Common utilities

use chrono::{DateTime, Local};

/// Format used for the manifest's version comment, e.g. `2024-03-01 09:15:02.123456`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Current local time
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Render a timestamp for the manifest comment line
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
