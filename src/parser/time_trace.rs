//! Main parser for compiler time-trace files.
//!
//! Reads the JSON envelope written by `-ftime-trace`, keeps the complete
//! ("X") events and splits them into the primary and worker thread groups.

use super::event::{Event, ThreadGroup};
use crate::hierarchy::IntervalForest;
use crate::utils::config::COMPLETE_EVENT_PHASE;
use crate::utils::error::{ParseError, TraceError};
use log::{debug, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw event from the `traceEvents` array
///
/// Field names follow the Chrome trace event format.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceEvent {
    /// Process id
    #[serde(default)]
    pub pid: i64,

    /// Thread id (each thread is a separate row)
    #[serde(default)]
    pub tid: i64,

    /// Phase: "X" for complete events, "M" for metadata
    #[serde(default)]
    pub ph: String,

    /// Start time in microseconds
    #[serde(default)]
    pub ts: Option<u64>,

    /// Duration in microseconds
    #[serde(default)]
    pub dur: u64,

    /// Label shown on the item
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub cat: Option<String>,

    #[serde(default)]
    pub args: Option<TraceArgs>,
}

/// `args` object of a trace event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceArgs {
    #[serde(default)]
    pub detail: Option<String>,

    #[serde(default)]
    pub count: Option<u64>,
}

impl TraceEvent {
    fn is_complete(&self) -> bool {
        self.ph == COMPLETE_EVENT_PHASE
    }

    fn detail(&self) -> Option<&str> {
        self.args.as_ref().and_then(|args| args.detail.as_deref())
    }
}

/// Parsed trace data (internal representation)
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    /// Identifier of the trace, normally its file path
    pub source: String,
    pub primary: Vec<Event>,
    pub worker: Vec<Event>,
}

impl ParsedTrace {
    /// All events, primary group first
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.primary.iter().chain(self.worker.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.worker.is_empty()
    }
}

/// The two independent hierarchies of one trace
#[derive(Debug, Clone, Default)]
pub struct TraceForests {
    pub source: String,
    pub primary: IntervalForest<Event>,
    pub worker: IntervalForest<Event>,
}

/// Read a trace file into raw JSON
///
/// **Public** - first step of every command
///
/// # Errors
/// * `ParseError::IoError` - file cannot be opened
/// * `ParseError::JsonError` - file is not valid JSON
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<serde_json::Value, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace file: {}", path.display());

    let file = File::open(path)?;
    let raw_trace = serde_json::from_reader(BufReader::new(file))?;
    Ok(raw_trace)
}

/// Parse raw trace JSON
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `source` - Identifier of the trace (used in labels and messages)
/// * `raw_trace` - Raw JSON with a `traceEvents` array
///
/// # Errors
/// * `ParseError::InvalidFormat` - not an object, or no trace events
pub fn parse_trace(source: &str, raw_trace: &serde_json::Value) -> Result<ParsedTrace, ParseError> {
    debug!("Parsing trace: {}", source);

    let trace_obj = raw_trace.as_object().ok_or_else(|| {
        ParseError::InvalidFormat("Trace must be a JSON object".to_string())
    })?;

    let events_array = trace_obj
        .get("traceEvents")
        .and_then(|value| value.as_array())
        .filter(|events| !events.is_empty())
        .ok_or_else(|| ParseError::InvalidFormat("No trace events found".to_string()))?;

    let mut parsed = ParsedTrace {
        source: source.to_string(),
        ..Default::default()
    };

    for event in parse_events_array(events_array)? {
        let Some(event) = to_event(event) else {
            continue;
        };
        match event.thread_group {
            ThreadGroup::Primary => parsed.primary.push(event),
            ThreadGroup::Worker => parsed.worker.push(event),
        }
    }

    debug!(
        "Parsed {} primary and {} worker events",
        parsed.primary.len(),
        parsed.worker.len()
    );

    Ok(parsed)
}

/// Parse array of trace events
///
/// **Private** - malformed entries are logged and skipped
fn parse_events_array(events_array: &[serde_json::Value]) -> Result<Vec<TraceEvent>, ParseError> {
    let mut events = Vec::with_capacity(events_array.len());

    for (index, event_value) in events_array.iter().enumerate() {
        match TraceEvent::deserialize(event_value) {
            Ok(event) => events.push(event),
            Err(e) => {
                warn!("Failed to parse trace event {}: {}", index, e);
            }
        }
    }

    if events.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All trace events failed to parse".to_string(),
        ));
    }

    Ok(events)
}

/// Keep complete events that carry a start time
fn to_event(raw: TraceEvent) -> Option<Event> {
    if !raw.is_complete() {
        return None;
    }

    let Some(start) = raw.ts else {
        warn!("Skipping complete event '{}' without timestamp", raw.name);
        return None;
    };

    let mut event = Event::new(start, raw.dur, raw.name.clone())
        .with_thread_group(ThreadGroup::from_thread_id(raw.tid));
    if let Some(detail) = raw.detail() {
        event = event.with_detail(detail);
    }
    Some(event)
}

/// Build the primary and worker hierarchies of a trace
///
/// **Public** - shared by the flame and callgraph commands
///
/// # Errors
/// * `TraceError::NonNesting` - an event partially overlaps another one
pub fn build_forests(trace: ParsedTrace) -> Result<TraceForests, TraceError> {
    let primary = build_forest(trace.primary, ThreadGroup::Primary)?;
    let worker = build_forest(trace.worker, ThreadGroup::Worker)?;

    debug!(
        "Built hierarchies for {}: {} primary nodes, {} worker nodes",
        trace.source,
        primary.len(),
        worker.len()
    );

    Ok(TraceForests {
        source: trace.source,
        primary,
        worker,
    })
}

fn build_forest(events: Vec<Event>, group: ThreadGroup) -> Result<IntervalForest<Event>, TraceError> {
    let mut forest = IntervalForest::new();

    for event in events {
        let (label, start, end) = (
            event.full_name().to_string(),
            event.start,
            event.start.saturating_add(event.duration),
        );
        forest
            .insert(event)
            .map_err(|source| TraceError::NonNesting {
                group: group.to_string(),
                label,
                start,
                end,
                source,
            })?;
    }

    Ok(forest)
}
