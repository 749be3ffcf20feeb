//! Reconstruct the nesting of flat, timestamped events.
//!
//! Trace files store events as a flat list. Two events either do not
//! intersect at all, or one of them fully contains the other (a call and
//! its callee). `IntervalForest` rebuilds that implicit tree incrementally,
//! in whatever order the events arrive.
//!
//! Nodes live in an arena and refer to each other by `NodeId`, so moving a
//! run of siblings under a new parent only rewrites index lists. Depth is not
//! stored; it falls out of the pre-order walk in [`IntervalForest::flatten`].

use super::interval::Interval;
use crate::utils::error::HierarchyError;
use log::debug;

/// Stable handle of a node inside its forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One event plus its place in the hierarchy
#[derive(Debug, Clone)]
pub struct HierarchyNode<E> {
    event: E,
    parent: Option<NodeId>,
    /// Ordered by start, pairwise disjoint
    children: Vec<NodeId>,
}

impl<E> HierarchyNode<E> {
    fn new(event: E) -> Self {
        Self {
            event,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    /// `None` for top-level nodes
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl<E: Interval> Interval for HierarchyNode<E> {
    fn start(&self) -> u64 {
        self.event.start()
    }

    fn duration(&self) -> u64 {
        self.event.duration()
    }
}

/// Where a new node goes at one sibling level
enum Slot {
    /// Fully inside this sibling: continue one level down
    Inside(NodeId),
    /// Between siblings, at this index
    At(usize),
}

/// Forest of properly nested intervals
///
/// Top-level nodes sit at depth 0 (the container itself is depth -1).
/// Siblings are kept sorted by start and never partially overlap.
#[derive(Debug, Clone)]
pub struct IntervalForest<E> {
    nodes: Vec<HierarchyNode<E>>,
    roots: Vec<NodeId>,
}

impl<E> Default for IntervalForest<E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }
}

impl<E: Interval> IntervalForest<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the whole forest
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in start order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode<E> {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode<E>> {
        self.nodes.get(id.0)
    }

    /// Number of ancestors of `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        depth
    }

    /// Deepest level in use, `None` for an empty forest
    pub fn max_depth(&self) -> Option<usize> {
        self.flatten().map(|flat| flat.depth).max()
    }

    /// Insert one event, keeping every sibling level sorted and disjoint.
    ///
    /// Siblings fully covered by the new interval become its children; the
    /// new node then descends into the sibling that contains it, if any.
    ///
    /// # Errors
    /// `HierarchyError::Overlap` if the interval partially overlaps a sibling.
    /// The forest is left in an unspecified state and must be discarded.
    pub fn insert(&mut self, event: E) -> Result<NodeId, HierarchyError> {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HierarchyNode::new(event));
        self.place(None, id)?;
        Ok(id)
    }

    /// Insert every event, stopping at the first overlap
    pub fn insert_all<I>(&mut self, events: I) -> Result<(), HierarchyError>
    where
        I: IntoIterator<Item = E>,
    {
        for event in events {
            self.insert(event)?;
        }
        Ok(())
    }

    /// Pre-order walk: every node with its depth, parents before children,
    /// siblings in start order.
    pub fn flatten(&self) -> Flatten<'_, E> {
        Flatten {
            forest: self,
            stack: self.roots.iter().rev().map(|&id| (id, 0)).collect(),
        }
    }

    fn siblings(&self, level: Option<NodeId>) -> &Vec<NodeId> {
        match level {
            None => &self.roots,
            Some(parent) => &self.nodes[parent.0].children,
        }
    }

    fn siblings_mut(&mut self, level: Option<NodeId>) -> &mut Vec<NodeId> {
        match level {
            None => &mut self.roots,
            Some(parent) => &mut self.nodes[parent.0].children,
        }
    }

    fn place(&mut self, level: Option<NodeId>, id: NodeId) -> Result<(), HierarchyError> {
        let (start, end) = {
            let node = &self.nodes[id.0];
            (node.start(), node.end())
        };

        let mut level = level;
        loop {
            let covered = self.take_covered(level, start, end);
            if !covered.is_empty() {
                self.adopt(id, covered)?;
            }

            match self.locate(level, start, end)? {
                Slot::Inside(sibling) => level = Some(sibling),
                Slot::At(index) => {
                    self.siblings_mut(level).insert(index, id);
                    self.nodes[id.0].parent = level;
                    return Ok(());
                }
            }
        }
    }

    /// Remove the run of siblings lying within `[start, end]`.
    ///
    /// Sorted, disjoint siblings have non-decreasing ends, so the covered
    /// ones form one contiguous range.
    fn take_covered(&mut self, level: Option<NodeId>, start: u64, end: u64) -> Vec<NodeId> {
        let siblings = self.siblings(level);
        let first = siblings.partition_point(|&s| self.nodes[s.0].start() < start);
        let last = first + siblings[first..].partition_point(|&s| self.nodes[s.0].end() <= end);

        if first == last {
            return Vec::new();
        }
        self.siblings_mut(level).drain(first..last).collect()
    }

    fn adopt(&mut self, id: NodeId, covered: Vec<NodeId>) -> Result<(), HierarchyError> {
        if self.nodes[id.0].children.is_empty() {
            for &child in &covered {
                self.nodes[child.0].parent = Some(id);
            }
            self.nodes[id.0].children = covered;
            return Ok(());
        }

        for child in covered {
            self.place(Some(id), child)?;
        }
        Ok(())
    }

    fn locate(&self, level: Option<NodeId>, start: u64, end: u64) -> Result<Slot, HierarchyError> {
        let siblings = self.siblings(level);
        // First sibling reaching at least as far as the new interval
        let index = siblings.partition_point(|&s| self.nodes[s.0].end() < end);

        if index > 0 {
            let before = &self.nodes[siblings[index - 1].0];
            debug_assert!(
                before.start() < start,
                "covered sibling survived the covering phase"
            );
            if before.end() > start {
                return Err(overlap(start, end, before));
            }
        }

        let Some(&candidate) = siblings.get(index) else {
            return Ok(Slot::At(index));
        };

        let next = &self.nodes[candidate.0];
        if next.start() <= start {
            Ok(Slot::Inside(candidate))
        } else if end <= next.start() {
            Ok(Slot::At(index))
        } else {
            Err(overlap(start, end, next))
        }
    }
}

fn overlap<E: Interval>(start: u64, end: u64, sibling: &HierarchyNode<E>) -> HierarchyError {
    debug!(
        "Interval [{}, {}) partially overlaps [{}, {})",
        start,
        end,
        sibling.start(),
        sibling.end()
    );
    HierarchyError::Overlap {
        start,
        end,
        sibling_start: sibling.start(),
        sibling_end: sibling.end(),
    }
}

/// A node as seen by the pre-order walk
#[derive(Debug)]
pub struct FlatNode<'a, E> {
    pub id: NodeId,
    pub node: &'a HierarchyNode<E>,
    pub depth: usize,
}

impl<'a, E> FlatNode<'a, E> {
    pub fn event(&self) -> &'a E {
        &self.node.event
    }
}

impl<E> Clone for FlatNode<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for FlatNode<'_, E> {}

/// Iterator returned by [`IntervalForest::flatten`]
#[derive(Debug)]
pub struct Flatten<'a, E> {
    forest: &'a IntervalForest<E>,
    stack: Vec<(NodeId, usize)>,
}

impl<E> Clone for Flatten<'_, E> {
    fn clone(&self) -> Self {
        Self {
            forest: self.forest,
            stack: self.stack.clone(),
        }
    }
}

impl<'a, E> Iterator for Flatten<'a, E> {
    type Item = FlatNode<'a, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let node = &self.forest.nodes[id.0];
        self.stack
            .extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        Some(FlatNode { id, node, depth })
    }
}
