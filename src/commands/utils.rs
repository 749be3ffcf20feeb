use super::models::TraceInputs;
use crate::parser::{find_trace_files, parse_trace, read_trace_file, ParsedTrace};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Resolve the inputs to a sorted list of trace files
pub fn collect_trace_files(inputs: &TraceInputs) -> Result<Vec<PathBuf>> {
    let trace_files = find_trace_files(&inputs.files, &inputs.dirs);
    if trace_files.is_empty() {
        anyhow::bail!("No trace files found");
    }
    info!("Found {} trace files", trace_files.len());
    Ok(trace_files)
}

/// Read and parse one trace file
pub fn load_trace(path: &Path) -> Result<ParsedTrace> {
    let source = path.display().to_string();
    let raw_trace = read_trace_file(path)
        .with_context(|| format!("Failed to read trace file {}", source))?;
    let trace = parse_trace(&source, &raw_trace)
        .with_context(|| format!("Failed to parse trace data of {}", source))?;
    Ok(trace)
}

/// Fail when a batch run produced nothing
pub fn ensure_processed(processed: usize, total: usize) -> Result<()> {
    if processed == 0 {
        anyhow::bail!("None of the {} trace files could be processed", total);
    }
    if processed < total {
        warn!("{} of {} trace files were skipped", total - processed, total);
    }
    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Time Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Flame graphs, call graphs and source statistics for compiler time traces.");
}
