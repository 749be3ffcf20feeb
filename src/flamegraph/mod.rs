//! Flame chart layout and SVG generation.
//!
//! This module converts flattened event hierarchies into positioned blocks
//! and renders those blocks as an SVG time chart.

pub mod generator;
pub mod layout;

// Re-export main types
pub use generator::{generate_flamegraph, parse_palette, FlamegraphConfig};
pub use layout::{project_blocks, project_layout, Block};
