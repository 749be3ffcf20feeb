//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised while reconstructing the event hierarchy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// The new interval partially overlaps a sibling without nesting
    #[error(
        "overlapping, non-nesting interval [{start}, {end}) against sibling [{sibling_start}, {sibling_end})"
    )]
    Overlap {
        start: u64,
        end: u64,
        sibling_start: u64,
        sibling_end: u64,
    },
}

/// Errors that can occur during trace parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read trace file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Invalid exclude pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Errors that can occur while building the forests of one trace
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("{group} event '{label}' at [{start}, {end}) does not nest: {source}")]
    NonNesting {
        group: String,
        label: String,
        start: u64,
        end: u64,
        #[source]
        source: HierarchyError,
    },
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Empty block data")]
    EmptyBlocks,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
