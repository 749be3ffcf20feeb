//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Trace timestamps and durations are in microseconds
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;
pub const MICROS_PER_MILLI: f64 = 1_000.0;

/// Events on threads with an id below this bound belong to the primary group
pub const PRIMARY_THREAD_ID_BOUND: i64 = 1;

/// Trace event phase of complete ("X") events, the only ones with a duration
pub const COMPLETE_EVENT_PHASE: &str = "X";

/// Event emitted once per included source file
pub const SOURCE_EVENT_NAME: &str = "Source";

/// Root event spanning a whole compilation unit
pub const COMPILATION_UNIT_ROOT: &str = "ExecuteCompiler";

/// Compiler phases that are only meaningful together with their source file
pub const COMPILER_PHASE_NAMES: &[&str] = &[
    "Frontend",
    "Backend",
    "CodeGenPasses",
    "PerformPendingInstantiations",
    "PerModulePasses",
];

// Flamegraph defaults
pub const DEFAULT_FLAMEGRAPH_WIDTH: usize = 1200;
pub const DEFAULT_FRAME_HEIGHT: usize = 16;
pub const MIN_TIMELINE_SPAN: u64 = 100; // never scale a timeline shorter than this

/// Extension of trace files picked up during directory discovery
pub const TRACE_FILE_EXTENSION: &str = "json";
