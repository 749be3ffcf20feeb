//! Accumulate per-source parse times across traces.
//!
//! Every `Source` event names an included file in its detail. Durations are
//! summed per normalized path so the same header reached through different
//! relative paths is counted once.

use crate::parser::schema::{SourceReport, SourceStat};
use crate::parser::{ExcludeFilter, ParsedTrace};
use crate::utils::config::{MICROS_PER_MILLI, SCHEMA_VERSION, SOURCE_EVENT_NAME};
use log::debug;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

const MAX_SOURCE_WIDTH: usize = 60;

/// Running totals for all traces seen so far
#[derive(Debug, Default)]
pub struct SourceAccumulator {
    totals: HashMap<String, SourceStat>,
    files_analyzed: usize,
}

impl SourceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the `Source` events of one trace
    pub fn add_trace(&mut self, trace: &ParsedTrace, filter: &ExcludeFilter) {
        let mut added = 0usize;

        for event in trace.events() {
            if event.label != SOURCE_EVENT_NAME {
                continue;
            }
            let Some(detail) = event.detail.as_deref() else {
                continue;
            };

            let file = normalize_path(detail);
            if filter.excluded(&file) {
                continue;
            }

            let stat = self
                .totals
                .entry(file.clone())
                .or_insert_with(|| SourceStat {
                    file,
                    total_duration_us: 0,
                    count: 0,
                });
            stat.total_duration_us += event.duration;
            stat.count += 1;
            added += 1;
        }

        debug!("{}: {} source events accumulated", trace.source, added);
        self.files_analyzed += 1;
    }

    pub fn files_analyzed(&self) -> usize {
        self.files_analyzed
    }

    /// Statistics sorted by average duration, cheapest first
    pub fn into_stats(self) -> Vec<SourceStat> {
        let mut stats: Vec<SourceStat> = self.totals.into_values().collect();
        stats.sort_by(|a, b| {
            a.average_us()
                .total_cmp(&b.average_us())
                .then_with(|| a.file.cmp(&b.file))
        });
        stats
    }

    /// Finish into a versioned report
    pub fn into_report(self) -> SourceReport {
        let files_analyzed = self.files_analyzed;
        SourceReport {
            version: SCHEMA_VERSION.to_string(),
            files_analyzed,
            sources: self.into_stats(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Source statistics over several traces
///
/// **Public** - convenience wrapper around `SourceAccumulator`
pub fn collect_source_stats<'a, I>(traces: I, filter: &ExcludeFilter) -> Vec<SourceStat>
where
    I: IntoIterator<Item = &'a ParsedTrace>,
{
    let mut accumulator = SourceAccumulator::new();
    for trace in traces {
        accumulator.add_trace(trace, filter);
    }
    accumulator.into_stats()
}

/// Lexical path normalization
///
/// Removes `.` components and folds `..` into the previous component. The
/// filesystem is never consulted.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = PathBuf::new();
    let mut depth = 0usize;

    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    normalized.pop();
                    depth -= 1;
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(part) => {
                normalized.push(part);
                depth += 1;
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        ".".to_string()
    } else {
        normalized.to_string_lossy().into_owned()
    }
}

/// Render statistics as a text table
///
/// **Public** - used by `analyze --summary`
pub fn generate_text_summary(stats: &[SourceStat], max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  SOURCE PARSE TIMES (cheapest average first)".to_string());
    lines.push(format!("  ┏{}┳{}┳{}┳{}┓", bar(62), bar(8), bar(14), bar(12)));
    lines.push(format!(
        "  ┃ {:<60} ┃ {:^6} ┃ {:^12} ┃ {:^10} ┃",
        "Source", "COUNT", "TOTAL (ms)", "AVG (ms)"
    ));
    lines.push(format!("  ┣{}╋{}╋{}╋{}┫", bar(62), bar(8), bar(14), bar(12)));

    for stat in stats.iter().take(max_lines) {
        lines.push(format!(
            "  ┃ {:<60} ┃ {:>6} ┃ {:>12.3} ┃ {:>10.3} ┃",
            truncate_left(&stat.file, MAX_SOURCE_WIDTH),
            stat.count,
            stat.total_duration_us as f64 / MICROS_PER_MILLI,
            stat.average_us() / MICROS_PER_MILLI
        ));
    }

    lines.push(format!("  ┗{}┻{}┻{}┻{}┛", bar(62), bar(8), bar(14), bar(12)));

    if stats.len() > max_lines {
        lines.push(format!("  ... and {} more", stats.len() - max_lines));
    }

    lines.join("\n")
}

fn bar(width: usize) -> String {
    "━".repeat(width)
}

/// Keep the tail of long paths, where the file name is
fn truncate_left(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}
