//! Read-only view of a timed event.

/// Half-open time span `[start, start + duration)` of one traced event.
///
/// Everything the hierarchy needs from an event goes through this trait,
/// so the forest stays independent of the trace format.
pub trait Interval {
    fn start(&self) -> u64;

    fn duration(&self) -> u64;

    fn end(&self) -> u64 {
        self.start().saturating_add(self.duration())
    }

    fn mid(&self) -> f64 {
        self.start() as f64 + self.duration() as f64 / 2.0
    }

    /// True if `other` lies within this interval (shared edges included)
    fn contains(&self, other: &impl Interval) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }
}

/// Bare interval without any payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u64,
    pub duration: u64,
}

impl Span {
    pub fn new(start: u64, duration: u64) -> Self {
        Self { start, duration }
    }

    /// Build from both edges; `end` before `start` collapses to zero width
    pub fn from_bounds(start: u64, end: u64) -> Self {
        Self {
            start,
            duration: end.saturating_sub(start),
        }
    }
}

impl Interval for Span {
    fn start(&self) -> u64 {
        self.start
    }

    fn duration(&self) -> u64 {
        self.duration
    }
}
