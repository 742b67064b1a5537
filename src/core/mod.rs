//! Core module - Configuration, errors and path handling
//!
//! This module provides:
//! - Manifest configuration (ManifestConfig) and its discovery
//! - Typed errors (ManifestError)
//! - Path normalization and project root resolution
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod paths;
pub mod util;
