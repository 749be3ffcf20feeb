//! Time Trace Studio
//!
//! Flame graphs, call-graph profiles and source statistics for the JSON
//! traces written by clang's `-ftime-trace`.
//!
//! The core is [`hierarchy::IntervalForest`], which rebuilds the nesting of
//! flat, timestamped events. Projectors turn the rebuilt hierarchy into
//! flame graph blocks ([`flamegraph`]) and callgrind entries ([`callgraph`]).
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install time-trace-studio
//! time-trace flame -d build/ --outdir flamegraphs
//! ```

pub mod aggregator;
pub mod callgraph;
pub mod commands;
pub mod flamegraph;
pub mod hierarchy;
pub mod output;
pub mod parser;
pub mod utils;
