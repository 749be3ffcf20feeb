use pretty_assertions::assert_eq;
use serde_json::json;
use time_trace_studio::callgraph::{project_profile, ProfileEntry};
use time_trace_studio::flamegraph::{generate_flamegraph, project_layout, FlamegraphConfig};
use time_trace_studio::parser::{build_forests, parse_trace, TraceForests};

fn compile_trace() -> TraceForests {
    let raw = json!({
        "traceEvents": [
            {"pid": 1, "tid": 0, "ph": "X", "ts": 0, "dur": 1000, "name": "ExecuteCompiler"},
            {"pid": 1, "tid": 0, "ph": "X", "ts": 600, "dur": 400, "name": "Backend"},
            {"pid": 1, "tid": 0, "ph": "X", "ts": 10, "dur": 100, "name": "Source",
             "args": {"detail": "/usr/include/vector"}},
            {"pid": 1, "tid": 0, "ph": "X", "ts": 0, "dur": 600, "name": "Frontend"},
            {"pid": 1, "tid": 0, "ph": "X", "ts": 200, "dur": 100, "name": "Source",
             "args": {"detail": "/src/a.h"}},
            {"pid": 1, "tid": 5, "ph": "X", "ts": 650, "dur": 250, "name": "OptModule",
             "args": {"detail": "main.cpp"}},
            {"pid": 1, "tid": 0, "ph": "M", "ts": 0, "name": "thread_name",
             "args": {"name": "clang"}}
        ],
        "beginningOfTime": 1_700_000_000_000_000u64
    });

    let parsed = parse_trace("main.json", &raw).unwrap();
    build_forests(parsed).unwrap()
}

fn names(entries: &[ProfileEntry]) -> Vec<&str> {
    entries
        .iter()
        .flat_map(|entry| entry.iter())
        .map(|entry| entry.name.as_str())
        .collect()
}

fn assert_self_time(entry: &ProfileEntry) {
    let children: f64 = entry.calls.iter().map(|call| call.total_time).sum();
    assert!(entry.self_time >= 0.0);
    assert!((entry.self_time + children - entry.total_time).abs() < 1e-9);
    entry.calls.iter().for_each(assert_self_time);
}

#[test]
fn test_profile_labels_and_order() {
    let forests = compile_trace();
    let roots = project_profile(forests.primary.flatten(), &forests.source);

    assert_eq!(roots.len(), 1);
    assert_eq!(
        names(&roots),
        vec![
            "main.json",
            "main.json:Frontend",
            "/usr/include/vector",
            "/src/a.h",
            "main.json:Backend",
        ]
    );
}

#[test]
fn test_profile_timing() {
    let forests = compile_trace();
    let roots = project_profile(forests.primary.flatten(), &forests.source);
    let root = &roots[0];

    assert_eq!(root.total_time, 0.001);
    assert_eq!(root.self_time, 0.0);
    assert_eq!(root.call_count, 1);
    assert_eq!(root.recursive_call_count, 1);

    let frontend = &root.calls[0];
    assert_eq!(frontend.calls.len(), 2);
    assert!((frontend.self_time - 0.000_4).abs() < 1e-12);

    roots.iter().for_each(assert_self_time);
}

#[test]
fn test_same_label_entries_stay_distinct() {
    let raw = json!({
        "traceEvents": [
            {"tid": 0, "ph": "X", "ts": 0, "dur": 10, "name": "ParseClass"},
            {"tid": 0, "ph": "X", "ts": 20, "dur": 10, "name": "ParseClass"}
        ]
    });
    let forests = build_forests(parse_trace("t.json", &raw).unwrap()).unwrap();
    let roots = project_profile(forests.primary.flatten(), &forests.source);

    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].name, roots[1].name);
}

#[test]
fn test_empty_forest_projects_nothing() {
    let forests = TraceForests::default();
    assert!(project_profile(forests.primary.flatten(), "x").is_empty());

    let (top, bottom) = project_layout(forests.primary.flatten(), forests.worker.flatten());
    assert!(top.is_empty() && bottom.is_empty());
}

#[test]
fn test_layout_blocks() {
    let forests = compile_trace();
    let (top, bottom) = project_layout(forests.primary.flatten(), forests.worker.flatten());

    let rows: Vec<(u64, u64, usize, &str)> = top
        .iter()
        .map(|block| (block.offset, block.width, block.depth, block.name.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (0, 1000, 0, "ExecuteCompiler"),
            (0, 600, 1, "Frontend"),
            (10, 100, 2, "vector"),
            (200, 100, 2, "a.h"),
            (600, 400, 1, "Backend"),
        ]
    );
    assert!(top.iter().all(|block| block.color_class == 0));

    assert_eq!(bottom.len(), 1);
    assert_eq!(bottom[0].color_class, 1);
    assert_eq!(bottom[0].full_name, "main.cpp");
}

#[test]
fn test_layout_renders() {
    let forests = compile_trace();
    let (top, bottom) = project_layout(forests.primary.flatten(), forests.worker.flatten());

    let svg = generate_flamegraph(&top, &bottom, &FlamegraphConfig::default()).unwrap();
    assert!(svg.contains("/usr/include/vector (0.100 ms)"));
    assert!(svg.contains("main.cpp (0.250 ms)"));
}
