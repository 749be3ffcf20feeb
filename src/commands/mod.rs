//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod callgraph;
pub mod flame;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::execute_analyze;
pub use callgraph::execute_callgraph;
pub use flame::execute_flame;
pub use models::{AnalyzeArgs, CallgraphArgs, FlameArgs, TraceInputs};
pub use utils::display_version;
