use crate::flamegraph::FlamegraphConfig;
use std::path::PathBuf;

/// Trace files given on the command line
#[derive(Debug, Clone, Default)]
pub struct TraceInputs {
    /// Explicit trace files
    pub files: Vec<PathBuf>,

    /// Directories searched recursively for `*.json`
    pub dirs: Vec<PathBuf>,
}

impl TraceInputs {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    pub inputs: TraceInputs,

    /// Exact paths or `*` wildcards to leave out
    pub exclude: Vec<String>,

    /// Output path for the JSON report (stdout if None)
    pub outfile: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Rows of the text summary
    pub summary_lines: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            inputs: TraceInputs::default(),
            exclude: Vec::new(),
            outfile: None,
            print_summary: false,
            summary_lines: 30,
        }
    }
}

/// Arguments for the flame command
#[derive(Debug, Clone)]
pub struct FlameArgs {
    pub inputs: TraceInputs,

    /// Directory receiving one `<stem>.svg` per trace
    pub outdir: PathBuf,

    /// Fixed title; the trace file name is used if None
    pub title: Option<String>,

    pub flamegraph_config: FlamegraphConfig,
}

impl Default for FlameArgs {
    fn default() -> Self {
        Self {
            inputs: TraceInputs::default(),
            outdir: PathBuf::from("flamegraphs"),
            title: None,
            flamegraph_config: FlamegraphConfig::default(),
        }
    }
}

/// Arguments for the callgraph command
#[derive(Debug, Clone)]
pub struct CallgraphArgs {
    pub inputs: TraceInputs,

    /// Output path of the combined callgrind profile
    pub output: PathBuf,
}

impl Default for CallgraphArgs {
    fn default() -> Self {
        Self {
            inputs: TraceInputs::default(),
            output: PathBuf::from("callgrind.out.time-trace"),
        }
    }
}
