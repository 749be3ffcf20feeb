//! Call hierarchy reconstruction from flat trace events.
//!
//! This module handles:
//! - The `Interval` view every event exposes
//! - Incremental insertion into a forest of nested intervals
//! - Depth-annotated pre-order traversal for the projectors

pub mod forest;
pub mod interval;

// Re-export main types
pub use forest::{FlatNode, Flatten, HierarchyNode, IntervalForest, NodeId};
pub use interval::{Interval, Span};
