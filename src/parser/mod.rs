//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Reading raw JSON written by `-ftime-trace`
//! - Splitting events into thread groups
//! - Locating trace files and filtering sources
//! - Defining output schema

pub mod discovery;
pub mod event;
pub mod filter;
pub mod schema;
pub mod time_trace;

// Re-export main types
pub use discovery::find_trace_files;
pub use event::{Event, ThreadGroup};
pub use filter::ExcludeFilter;
pub use schema::{SourceReport, SourceStat};
pub use time_trace::{build_forests, parse_trace, read_trace_file, ParsedTrace, TraceForests};
