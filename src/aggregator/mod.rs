//! Aggregation of trace data into source statistics.
//!
//! This module transforms parsed traces into:
//! - Per-source accumulated parse times
//! - A text table for terminal output

pub mod source_stats;

// Re-export main types and functions
pub use source_stats::{
    collect_source_stats, generate_text_summary, normalize_path, SourceAccumulator,
};
