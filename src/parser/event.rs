//! Normalized trace events, the input of the hierarchy.

use crate::hierarchy::Interval;
use crate::utils::config::PRIMARY_THREAD_ID_BOUND;
use std::fmt;
use std::path::Path;

/// Partition of trace rows
///
/// The primary group is the main (frontend) thread; every other thread id
/// belongs to the worker group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThreadGroup {
    #[default]
    Primary,
    Worker,
}

impl ThreadGroup {
    pub fn from_thread_id(tid: i64) -> Self {
        if tid < PRIMARY_THREAD_ID_BOUND {
            Self::Primary
        } else {
            Self::Worker
        }
    }

    /// Color class used by the flamegraph (0 primary, 1 worker)
    pub fn color_class(self) -> u8 {
        match self {
            Self::Primary => 0,
            Self::Worker => 1,
        }
    }
}

impl fmt::Display for ThreadGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Worker => write!(f, "worker"),
        }
    }
}

/// One complete trace event, immutable once read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Start time in microseconds
    pub start: u64,
    /// Duration in microseconds
    pub duration: u64,
    pub label: String,
    /// File path or sub-phase name
    pub detail: Option<String>,
    pub thread_group: ThreadGroup,
}

impl Event {
    pub fn new(start: u64, duration: u64, label: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            label: label.into(),
            detail: None,
            thread_group: ThreadGroup::Primary,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_thread_group(mut self, thread_group: ThreadGroup) -> Self {
        self.thread_group = thread_group;
        self
    }

    /// `detail` when present, otherwise `label`
    pub fn full_name(&self) -> &str {
        self.detail.as_deref().unwrap_or(&self.label)
    }

    /// Last path component of the full name
    pub fn short_name(&self) -> &str {
        let full_name = self.full_name();
        Path::new(full_name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(full_name)
    }
}

impl Interval for Event {
    fn start(&self) -> u64 {
        self.start
    }

    fn duration(&self) -> u64 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_group_from_tid() {
        assert_eq!(ThreadGroup::from_thread_id(0), ThreadGroup::Primary);
        assert_eq!(ThreadGroup::from_thread_id(-1), ThreadGroup::Primary);
        assert_eq!(ThreadGroup::from_thread_id(1), ThreadGroup::Worker);
        assert_eq!(ThreadGroup::from_thread_id(17), ThreadGroup::Worker);
    }

    #[test]
    fn test_names() {
        let event = Event::new(0, 10, "Source").with_detail("/usr/include/c++/vector");
        assert_eq!(event.full_name(), "/usr/include/c++/vector");
        assert_eq!(event.short_name(), "vector");

        let bare = Event::new(0, 10, "Frontend");
        assert_eq!(bare.full_name(), "Frontend");
        assert_eq!(bare.short_name(), "Frontend");
    }

    #[test]
    fn test_interval_view() {
        let event = Event::new(100, 100, "Total");
        assert_eq!(event.end(), 200);
        assert_eq!(event.mid(), 150.0);
    }
}
