//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Discovers trace files
//! 2. Accumulates `Source` event durations per included file
//! 3. Writes the JSON report and optionally prints a table

use super::models::AnalyzeArgs;
use super::utils::{collect_trace_files, ensure_processed, load_trace};
use crate::aggregator::{generate_text_summary, SourceAccumulator};
use crate::output::write_report;
use crate::parser::ExcludeFilter;
use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Unreadable traces are logged and skipped.
///
/// # Errors
/// * Invalid exclude patterns
/// * No trace file could be processed
/// * Report write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    let filter = ExcludeFilter::new(&args.exclude).context("Invalid exclude list")?;
    info!("Exclude list: {:?}", filter.describe());

    let trace_files = collect_trace_files(&args.inputs)?;
    let total = trace_files.len();

    let mut accumulator = SourceAccumulator::new();
    for (idx, path) in trace_files.iter().enumerate() {
        info!("{}/{}: analyzing {}", idx + 1, total, path.display());
        match load_trace(path) {
            Ok(trace) => accumulator.add_trace(&trace, &filter),
            Err(e) => warn!("Skipping trace: {:#}", e),
        }
    }

    ensure_processed(accumulator.files_analyzed(), total)?;
    let report = accumulator.into_report();

    match &args.outfile {
        Some(outfile) => {
            write_report(&report, outfile).context("Failed to write source report")?;
            info!("✓ Report written to: {}", outfile.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize source report")?;
            println!("{}", json);
        }
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("SOURCE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Traces analyzed: {}", report.files_analyzed);
        println!("Unique sources:  {}", report.sources.len());
        println!("\n{}", generate_text_summary(&report.sources, args.summary_lines));
        println!("{}", "=".repeat(80));
    }

    info!("Analyze completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("No trace files or directories given");
    }

    if args
        .outfile
        .as_ref()
        .is_some_and(|path| path.as_os_str().is_empty())
    {
        anyhow::bail!("Output file path cannot be empty");
    }

    if args.print_summary && args.summary_lines == 0 {
        anyhow::bail!("summary_lines must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::models::TraceInputs;
    use std::path::PathBuf;

    fn inputs() -> TraceInputs {
        TraceInputs {
            files: vec![PathBuf::from("trace.json")],
            dirs: Vec::new(),
        }
    }

    #[test]
    fn test_validate_args_valid() {
        let args = AnalyzeArgs {
            inputs: inputs(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_no_inputs() {
        assert!(validate_args(&AnalyzeArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_empty_outfile() {
        let args = AnalyzeArgs {
            inputs: inputs(),
            outfile: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_summary_lines() {
        let args = AnalyzeArgs {
            inputs: inputs(),
            print_summary: true,
            summary_lines: 0,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }
}
