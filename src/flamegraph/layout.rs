//! Project flattened hierarchies onto flame graph blocks.
//!
//! A block keeps the event's own timeline position, so the graph reads as a
//! time chart: x is the start, width the duration, and the row comes from
//! the hierarchy depth (never re-derived from geometry).

use crate::hierarchy::FlatNode;
use crate::parser::{Event, ThreadGroup};

/// One rectangle of the flame graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Offset from the left edge (trace time)
    pub offset: u64,
    /// Width (trace time)
    pub width: u64,
    /// Row; 0 is the outermost event
    pub depth: usize,
    /// Palette selector (0 primary, 1 worker)
    pub color_class: u8,
    /// Label drawn on the block
    pub name: String,
    /// Hover text and color key
    pub full_name: String,
}

impl Block {
    pub fn left(&self) -> u64 {
        self.offset
    }

    pub fn right(&self) -> u64 {
        self.offset.saturating_add(self.width)
    }

    pub fn middle(&self) -> f64 {
        self.offset as f64 + self.width as f64 / 2.0
    }

    /// True if `pos` falls on the block, edges included
    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.left() && pos <= self.right()
    }
}

/// Blocks of one forest, in flatten order
pub fn project_blocks<'a, I>(flattened: I, group: ThreadGroup) -> Vec<Block>
where
    I: IntoIterator<Item = FlatNode<'a, Event>>,
{
    flattened
        .into_iter()
        .map(|flat| {
            let event = flat.event();
            Block {
                offset: event.start,
                width: event.duration,
                depth: flat.depth,
                color_class: group.color_class(),
                name: event.short_name().to_string(),
                full_name: event.full_name().to_string(),
            }
        })
        .collect()
}

/// Blocks for the primary and the worker panel
///
/// **Public** - main entry point for layout
pub fn project_layout<'a, P, W>(primary: P, worker: W) -> (Vec<Block>, Vec<Block>)
where
    P: IntoIterator<Item = FlatNode<'a, Event>>,
    W: IntoIterator<Item = FlatNode<'a, Event>>,
{
    (
        project_blocks(primary, ThreadGroup::Primary),
        project_blocks(worker, ThreadGroup::Worker),
    )
}

/// Right edge of the rightmost block
pub fn max_right(blocks: &[Block]) -> u64 {
    blocks.iter().map(Block::right).max().unwrap_or(0)
}

/// Deepest row in use
pub fn max_depth(blocks: &[Block]) -> Option<usize> {
    blocks.iter().map(|block| block.depth).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::IntervalForest;

    #[test]
    fn test_block_edges() {
        let block = Block {
            offset: 10,
            width: 20,
            depth: 0,
            color_class: 0,
            name: "x".to_string(),
            full_name: "x".to_string(),
        };
        assert_eq!(block.right(), 30);
        assert_eq!(block.middle(), 20.0);
        assert!(block.contains(10));
        assert!(block.contains(30));
        assert!(!block.contains(31));
        assert!(!block.contains(9));
    }

    #[test]
    fn test_project_layout_groups() {
        let mut primary = IntervalForest::new();
        primary
            .insert(Event::new(0, 100, "Source").with_detail("/usr/include/vector"))
            .unwrap();
        primary.insert(Event::new(10, 10, "ParseClass")).unwrap();

        let mut worker = IntervalForest::new();
        worker.insert(Event::new(200, 50, "OptModule")).unwrap();

        let (top, bottom) = project_layout(primary.flatten(), worker.flatten());

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "vector");
        assert_eq!(top[0].full_name, "/usr/include/vector");
        assert_eq!(top[0].color_class, 0);
        assert_eq!(top[1].depth, 1);

        assert_eq!(bottom.len(), 1);
        assert_eq!(bottom[0].color_class, 1);
        assert_eq!(bottom[0].offset, 200);
        assert_eq!(max_right(&bottom), 250);
    }
}
