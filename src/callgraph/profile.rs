//! Project a flattened hierarchy onto call-graph profile entries.
//!
//! Every node becomes its own entry (same-named nodes are not merged) with
//! inclusive and exclusive time in seconds. The tree is rebuilt from the
//! depth-annotated pre-order sequence alone.

use crate::hierarchy::FlatNode;
use crate::parser::Event;
use crate::utils::config::{COMPILATION_UNIT_ROOT, COMPILER_PHASE_NAMES, MICROS_PER_SECOND};
use std::collections::HashMap;

/// How a synthetic event label is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    /// Replace the label with the source identifier
    SourceIdentifier,
    /// `"<source>:<label>"`
    PrefixWithSource,
}

impl LabelRule {
    fn apply(self, label: &str, source: &str) -> String {
        match self {
            Self::SourceIdentifier => source.to_string(),
            Self::PrefixWithSource => format!("{}:{}", source, label),
        }
    }
}

/// Substitution table for event labels
#[derive(Debug, Clone)]
pub struct LabelRules {
    rules: HashMap<String, LabelRule>,
}

impl Default for LabelRules {
    fn default() -> Self {
        let rules = COMPILER_PHASE_NAMES
            .iter()
            .map(|phase| (phase.to_string(), LabelRule::PrefixWithSource))
            .chain([(COMPILATION_UNIT_ROOT.to_string(), LabelRule::SourceIdentifier)])
            .collect();
        Self { rules }
    }
}

impl LabelRules {
    /// Table without any substitution
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn with_rule(mut self, label: impl Into<String>, rule: LabelRule) -> Self {
        self.rules.insert(label.into(), rule);
        self
    }

    /// Resolve the display identifier of `label`
    pub fn resolve(&self, label: &str, source: &str) -> String {
        match self.rules.get(label) {
            Some(rule) => rule.apply(label, source),
            None => label.to_string(),
        }
    }
}

/// One node of the call-graph profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub name: String,
    pub call_count: u32,
    /// The trace format cannot tell recursion apart, always 1
    pub recursive_call_count: u32,
    /// Exclusive time in seconds
    pub self_time: f64,
    /// Inclusive time in seconds
    pub total_time: f64,
    /// Callees in hierarchy order
    pub calls: Vec<ProfileEntry>,
}

impl ProfileEntry {
    /// Pre-order walk over this entry and all its callees
    pub fn iter(&self) -> impl Iterator<Item = &ProfileEntry> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let entry = stack.pop()?;
            stack.extend(entry.calls.iter().rev());
            Some(entry)
        })
    }

    /// Number of entries in this subtree
    pub fn entry_count(&self) -> usize {
        self.iter().count()
    }
}

/// Entry under construction, waiting for its children
struct Pending {
    name: String,
    depth: usize,
    duration_us: u64,
    children_us: u64,
    calls: Vec<ProfileEntry>,
}

impl Pending {
    fn into_entry(self) -> ProfileEntry {
        debug_assert!(
            self.children_us <= self.duration_us,
            "children of '{}' outlast their parent",
            self.name
        );
        let self_us = self.duration_us.saturating_sub(self.children_us);
        ProfileEntry {
            name: self.name,
            call_count: 1,
            recursive_call_count: 1,
            self_time: self_us as f64 / MICROS_PER_SECOND,
            total_time: self.duration_us as f64 / MICROS_PER_SECOND,
            calls: self.calls,
        }
    }
}

/// Profile roots of a flattened forest, using the default label table
///
/// **Public** - main entry point for call-graph projection
pub fn project_profile<'a, I>(flattened: I, source: &str) -> Vec<ProfileEntry>
where
    I: IntoIterator<Item = FlatNode<'a, Event>>,
{
    project_profile_with(flattened, source, &LabelRules::default())
}

/// Profile roots of a flattened forest with a custom label table
pub fn project_profile_with<'a, I>(
    flattened: I,
    source: &str,
    rules: &LabelRules,
) -> Vec<ProfileEntry>
where
    I: IntoIterator<Item = FlatNode<'a, Event>>,
{
    let mut roots = Vec::new();
    let mut stack: Vec<Pending> = Vec::new();

    for flat in flattened {
        while stack.last().is_some_and(|open| open.depth >= flat.depth) {
            close_entry(&mut stack, &mut roots);
        }

        let event = flat.event();
        stack.push(Pending {
            name: rules.resolve(event.full_name(), source),
            depth: flat.depth,
            duration_us: event.duration,
            children_us: 0,
            calls: Vec::new(),
        });
    }

    while !stack.is_empty() {
        close_entry(&mut stack, &mut roots);
    }

    roots
}

fn close_entry(stack: &mut Vec<Pending>, roots: &mut Vec<ProfileEntry>) {
    let Some(done) = stack.pop() else {
        return;
    };
    let duration_us = done.duration_us;
    let entry = done.into_entry();

    match stack.last_mut() {
        Some(parent) => {
            parent.children_us += duration_us;
            parent.calls.push(entry);
        }
        None => roots.push(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_rules() {
        let rules = LabelRules::default();
        assert_eq!(rules.resolve("ExecuteCompiler", "a.json"), "a.json");
        assert_eq!(rules.resolve("Frontend", "a.json"), "a.json:Frontend");
        assert_eq!(
            rules.resolve("PerModulePasses", "a.json"),
            "a.json:PerModulePasses"
        );
        assert_eq!(rules.resolve("ParseClass", "a.json"), "ParseClass");
    }

    #[test]
    fn test_custom_rule() {
        let rules = LabelRules::empty().with_rule("OptModule", LabelRule::PrefixWithSource);
        assert_eq!(rules.resolve("OptModule", "b"), "b:OptModule");
        assert_eq!(rules.resolve("Frontend", "b"), "Frontend");
    }

    #[test]
    fn test_entry_iter_preorder() {
        let leaf = |name: &str| ProfileEntry {
            name: name.to_string(),
            call_count: 1,
            recursive_call_count: 1,
            self_time: 0.0,
            total_time: 0.0,
            calls: Vec::new(),
        };
        let mut root = leaf("root");
        let mut left = leaf("left");
        left.calls.push(leaf("left.child"));
        root.calls.push(left);
        root.calls.push(leaf("right"));

        let names: Vec<&str> = root.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["root", "left", "left.child", "right"]);
        assert_eq!(root.entry_count(), 4);
    }
}
