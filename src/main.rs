//! Time Trace Studio CLI
//!
//! Flame graphs, call graphs and source statistics for the JSON traces
//! written by clang's `-ftime-trace`.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use time_trace_studio::commands::{
    analyze, callgraph, display_version, execute_analyze, execute_callgraph, execute_flame, flame,
    AnalyzeArgs, CallgraphArgs, FlameArgs, TraceInputs,
};
use time_trace_studio::flamegraph::{parse_palette, FlamegraphConfig};
use time_trace_studio::utils::config::DEFAULT_FLAMEGRAPH_WIDTH;

/// Time Trace Studio - compile time analysis for clang time traces
#[derive(Parser, Debug)]
#[command(name = "time-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Trace selection shared by all batch commands
#[derive(Args, Debug)]
struct InputArgs {
    /// Trace files to process
    #[arg(short, long, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Directories searched recursively for *.json traces
    #[arg(short, long, num_args = 1..)]
    dirs: Vec<PathBuf>,
}

impl From<InputArgs> for TraceInputs {
    fn from(args: InputArgs) -> Self {
        Self {
            files: args.files,
            dirs: args.dirs,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Accumulate include parse times per source file
    Analyze {
        #[command(flatten)]
        inputs: InputArgs,

        /// Items to exclude, e.g. '/usr/*'
        #[arg(long, num_args = 1..)]
        exclude: Vec<String>,

        /// Output path for the JSON report (stdout if omitted)
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of rows in the text summary
        #[arg(long, default_value = "30")]
        summary_lines: usize,
    },

    /// Draw one SVG flame graph per trace
    Flame {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory
        #[arg(short, long, default_value = "flamegraphs")]
        outdir: PathBuf,

        /// Flame graph title (defaults to the trace file name)
        #[arg(long)]
        title: Option<String>,

        /// Flame graph width in pixels
        #[arg(long, default_value_t = DEFAULT_FLAMEGRAPH_WIDTH)]
        width: usize,

        /// Palette of the primary thread panel (hot, mem, io, red, green, ...)
        #[arg(long, value_parser = parse_palette)]
        palette: Option<inferno::flamegraph::color::BasicPalette>,
    },

    /// Write a combined callgrind profile of all traces
    Callgraph {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output path for the callgrind file
        #[arg(short, long, default_value = "callgrind.out.time-trace")]
        output: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            inputs,
            exclude,
            outfile,
            summary,
            summary_lines,
        } => {
            let args = AnalyzeArgs {
                inputs: inputs.into(),
                exclude,
                outfile,
                print_summary: summary,
                summary_lines,
            };

            analyze::validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Flame {
            inputs,
            outdir,
            title,
            width,
            palette,
        } => {
            let mut config = FlamegraphConfig::new().with_width(width);
            if let Some(palette) = palette {
                config = config.with_palette(palette);
            }

            let args = FlameArgs {
                inputs: inputs.into(),
                outdir,
                title,
                flamegraph_config: config,
            };

            flame::validate_args(&args)?;
            execute_flame(args)?;
        }

        Commands::Callgraph { inputs, output } => {
            let args = CallgraphArgs {
                inputs: inputs.into(),
                output,
            };

            callgraph::validate_args(&args)?;
            execute_callgraph(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
