//! Flame command implementation.
//!
//! For every trace: rebuild both hierarchies, project them onto blocks and
//! write one SVG named after the trace file.

use super::models::FlameArgs;
use super::utils::{collect_trace_files, ensure_processed, load_trace};
use crate::flamegraph::{generate_flamegraph, project_layout};
use crate::output::write_svg;
use crate::parser::build_forests;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

/// Execute the flame command
///
/// **Public** - main entry point called from main.rs
///
/// A trace that fails (unreadable, non-nesting events, nothing to draw) is
/// logged and the remaining traces are still rendered.
pub fn execute_flame(args: FlameArgs) -> Result<()> {
    let start_time = Instant::now();

    let trace_files = collect_trace_files(&args.inputs)?;
    let total = trace_files.len();
    let mut used_names = HashSet::new();
    let mut written = 0usize;

    for (idx, path) in trace_files.iter().enumerate() {
        info!("{}/{}: drawing flame graph for {}", idx + 1, total, path.display());

        let name = svg_output_name(path, &used_names);
        let svg_path = args.outdir.join(format!("{}.svg", name));
        match render_trace(path, &svg_path, &args) {
            Ok(()) => {
                info!("✓ Flame graph written to: {}", svg_path.display());
                used_names.insert(name);
                written += 1;
            }
            Err(e) => error!("{:#}", e),
        }
    }

    ensure_processed(written, total)?;
    info!(
        "Flame completed in {:.2}s ({} graphs)",
        start_time.elapsed().as_secs_f64(),
        written
    );
    Ok(())
}

fn render_trace(path: &Path, svg_path: &Path, args: &FlameArgs) -> Result<()> {
    let trace = load_trace(path)?;
    let forests = build_forests(trace)
        .with_context(|| format!("Failed to build hierarchy for {}", path.display()))?;

    let (top, bottom) = project_layout(forests.primary.flatten(), forests.worker.flatten());
    debug!("Projected {} primary and {} worker blocks", top.len(), bottom.len());

    let title = match &args.title {
        Some(title) => title.clone(),
        None => display_name(path),
    };
    let config = args.flamegraph_config.clone().with_title(title);

    let svg = generate_flamegraph(&top, &bottom, &config)
        .with_context(|| format!("Failed to generate flame graph for {}", path.display()))?;
    write_svg(&svg, svg_path)
        .with_context(|| format!("Failed to write {}", svg_path.display()))?;

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// File stem of the trace, suffixed with a counter when already written
///
/// Does not reserve the name; callers insert it once the graph is written.
fn svg_output_name(trace: &Path, used: &HashSet<String>) -> String {
    let stem = trace
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_string());

    let mut name = stem.clone();
    let mut counter = 1;
    while used.contains(&name) {
        counter += 1;
        name = format!("{}-{}", stem, counter);
    }

    name
}

/// Validate flame arguments
///
/// **Public** - can be called before execute_flame for early validation
pub fn validate_args(args: &FlameArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("No trace files or directories given");
    }

    if args.outdir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    if args.outdir.is_file() {
        anyhow::bail!("Output directory is a file: {}", args.outdir.display());
    }

    if args.flamegraph_config.width == 0 {
        anyhow::bail!("Flame graph width must be greater than 0");
    }

    if args.flamegraph_config.frame_height == 0 {
        anyhow::bail!("Frame height must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::models::TraceInputs;
    use std::path::PathBuf;

    #[test]
    fn test_svg_output_name_collisions() {
        let mut used = HashSet::new();

        let first = svg_output_name(Path::new("a/main.json"), &used);
        assert_eq!(first, "main");
        used.insert(first);

        assert_eq!(svg_output_name(Path::new("b/main.json"), &used), "main-2");
        assert_eq!(svg_output_name(Path::new("b/util.json"), &used), "util");
    }

    #[test]
    fn test_svg_output_name_not_reserved_by_lookup() {
        let used = HashSet::new();

        assert_eq!(svg_output_name(Path::new("broken/main.json"), &used), "main");
        assert_eq!(svg_output_name(Path::new("good/main.json"), &used), "main");
    }

    #[test]
    fn test_validate_args() {
        let mut args = FlameArgs {
            inputs: TraceInputs {
                files: Vec::new(),
                dirs: vec![PathBuf::from("build")],
            },
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());

        args.flamegraph_config.width = 0;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_no_inputs() {
        assert!(validate_args(&FlameArgs::default()).is_err());
    }
}
