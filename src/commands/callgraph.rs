//! Callgraph command implementation.
//!
//! Projects the primary-thread hierarchy of every trace onto profile entries
//! and writes all of them into one callgrind file.

use super::models::CallgraphArgs;
use super::utils::{collect_trace_files, ensure_processed, load_trace};
use crate::callgraph::{project_profile, ProfileEntry};
use crate::output::write_callgrind_file;
use crate::parser::build_forests;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::path::Path;
use std::time::Instant;

/// Execute the callgraph command
///
/// **Public** - main entry point called from main.rs
pub fn execute_callgraph(args: CallgraphArgs) -> Result<()> {
    let start_time = Instant::now();

    let trace_files = collect_trace_files(&args.inputs)?;
    let total = trace_files.len();
    let mut entries = Vec::new();
    let mut processed = 0usize;

    for (idx, path) in trace_files.iter().enumerate() {
        info!("{}/{}: building call graph for {}", idx + 1, total, path.display());
        match profile_trace(path) {
            Ok(roots) => {
                entries.extend(roots);
                processed += 1;
            }
            Err(e) => error!("{:#}", e),
        }
    }

    ensure_processed(processed, total)?;

    write_callgrind_file(&entries, &args.output).context("Failed to write callgrind profile")?;
    info!("✓ Call graph written to: {}", args.output.display());

    info!("Callgraph completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn profile_trace(path: &Path) -> Result<Vec<ProfileEntry>> {
    let trace = load_trace(path)?;
    let forests = build_forests(trace)
        .with_context(|| format!("Failed to build hierarchy for {}", path.display()))?;

    let roots = project_profile(forests.primary.flatten(), &forests.source);
    debug!(
        "{}: {} profile roots from {} primary nodes",
        forests.source,
        roots.len(),
        forests.primary.len()
    );
    Ok(roots)
}

/// Validate callgraph arguments
///
/// **Public** - can be called before execute_callgraph for early validation
pub fn validate_args(args: &CallgraphArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("No trace files or directories given");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output.is_dir() {
        anyhow::bail!("Output path is a directory: {}", args.output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::models::TraceInputs;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args() {
        let args = CallgraphArgs {
            inputs: TraceInputs {
                files: vec![PathBuf::from("a.json")],
                dirs: Vec::new(),
            },
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_output() {
        let args = CallgraphArgs {
            inputs: TraceInputs {
                files: vec![PathBuf::from("a.json")],
                dirs: Vec::new(),
            },
            output: PathBuf::new(),
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_is_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = CallgraphArgs {
            inputs: TraceInputs {
                files: vec![PathBuf::from("a.json")],
                dirs: Vec::new(),
            },
            output: temp_dir.path().to_path_buf(),
        };
        assert!(validate_args(&args).is_err());
    }
}
