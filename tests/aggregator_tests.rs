use std::fs;
use time_trace_studio::aggregator::{collect_source_stats, normalize_path, SourceAccumulator};
use time_trace_studio::parser::{
    find_trace_files, parse_trace, read_trace_file, ExcludeFilter, ParsedTrace,
};
use time_trace_studio::utils::error::ParseError;

fn trace_with_sources(sources: &[(&str, u64)]) -> String {
    let events: Vec<serde_json::Value> = sources
        .iter()
        .enumerate()
        .map(|(idx, (path, dur))| {
            serde_json::json!({
                "pid": 1, "tid": 0, "ph": "X",
                "ts": idx as u64 * 1000, "dur": dur,
                "name": "Source", "args": {"detail": path}
            })
        })
        .collect();
    serde_json::json!({ "traceEvents": events }).to_string()
}

fn load_dir(dir: &std::path::Path) -> Vec<ParsedTrace> {
    find_trace_files(&[], &[dir.to_path_buf()])
        .iter()
        .filter_map(|path| {
            let raw = read_trace_file(path).ok()?;
            parse_trace(&path.display().to_string(), &raw).ok()
        })
        .collect()
}

#[test]
fn test_stats_across_trace_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("a/b")).unwrap();
    fs::write(
        temp_dir.path().join("a/one.json"),
        trace_with_sources(&[("/inc/big.h", 900), ("/inc/small.h", 10)]),
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("a/b/two.json"),
        trace_with_sources(&[("/inc/../inc/big.h", 300), ("/sys/x.h", 5)]),
    )
    .unwrap();

    let traces = load_dir(temp_dir.path());
    assert_eq!(traces.len(), 2);

    let filter = ExcludeFilter::new(["/sys/x.h"]).unwrap();
    let stats = collect_source_stats(&traces, &filter);

    let files: Vec<&str> = stats.iter().map(|stat| stat.file.as_str()).collect();
    assert_eq!(files, vec!["/inc/small.h", "/inc/big.h"]);
    assert_eq!(stats[1].count, 2);
    assert_eq!(stats[1].average_us(), 600.0);
}

#[test]
fn test_unreadable_trace_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("empty.json");
    fs::write(&path, r#"{"traceEvents": []}"#).unwrap();

    let raw = read_trace_file(&path).unwrap();
    assert!(matches!(
        parse_trace("empty.json", &raw),
        Err(ParseError::InvalidFormat(_))
    ));

    let missing = read_trace_file(temp_dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ParseError::IoError(_))));
}

#[test]
fn test_accumulator_without_sources() {
    let trace = ParsedTrace {
        source: "none.json".to_string(),
        ..Default::default()
    };
    let mut accumulator = SourceAccumulator::new();
    accumulator.add_trace(&trace, &ExcludeFilter::default());

    let report = accumulator.into_report();
    assert_eq!(report.files_analyzed, 1);
    assert!(report.sources.is_empty());
    assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
}

#[test]
fn test_normalize_relative_paths() {
    assert_eq!(normalize_path("build/../src/a.h"), "src/a.h");
    assert_eq!(normalize_path("../../a.h"), "../../a.h");
}
