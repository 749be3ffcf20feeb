//! Output JSON schema definitions for source statistics.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// Top-level report written by the analyze command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Number of trace files that contributed
    pub files_analyzed: usize,

    /// Per-source statistics, cheapest average first
    pub sources: Vec<SourceStat>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// Accumulated parse time of one included source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStat {
    /// Normalized path of the source
    pub file: String,

    /// Summed duration in microseconds
    pub total_duration_us: u64,

    /// Number of times the source was parsed
    pub count: u64,
}

impl SourceStat {
    /// Mean duration per inclusion in microseconds
    pub fn average_us(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_duration_us as f64 / self.count as f64
        }
    }
}
