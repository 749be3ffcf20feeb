//! Output writers for reports, flame graphs and call graphs.
//!
//! This module handles writing data to disk in various formats:
//! - JSON source reports
//! - SVG flame graphs
//! - Callgrind profiles

pub mod callgrind;
pub mod json;
pub mod svg;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use callgrind::{write_callgrind, write_callgrind_file};
pub use json::{read_report, write_report};
pub use svg::write_svg;

/// Validate an output path and create its parent directories
///
/// # Errors
/// * `OutputError::InvalidPath` - path is empty, is a directory, or its parent
///   cannot be created
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    validate_output_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Validate that output path is writable
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
