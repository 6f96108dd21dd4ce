//! Shared fixtures for the baseline report integration tests

use baseline_report::{DiffKind, DiffNode, DocumentHeader, PackageEntry, ReportEvent};
use std::fs;
use std::path::{Path, PathBuf};

/// A comparison with one changed package, one unchanged package and a
/// three level member tree
pub const SAMPLE_BASELINE: &str = r#"{
    "bundle_name": "org.example.bundle",
    "current_version": "1.1.0",
    "comparison_version": "1.0.0",
    "generation_date": "2024-05-01 12:00",
    "packages": [
        {
            "name": "org.example.api",
            "mismatch": true,
            "delta": "MAJOR",
            "short_delta": "!",
            "newer_version": "1.1.0",
            "older_version": "1.0.0",
            "suggested_version": "2.0.0",
            "diagnostic": { "severity": "ERROR", "message": "Version increase required" },
            "children": [
                {
                    "kind": "interface",
                    "name": "org.example.api.Service",
                    "delta": "CHANGED",
                    "children": [
                        {
                            "kind": "method",
                            "name": "start()",
                            "delta": "ADDED",
                            "children": [
                                { "kind": "return", "name": "void", "delta": "ADDED" }
                            ]
                        },
                        { "kind": "method", "name": "stop()", "delta": "UNCHANGED" }
                    ]
                },
                { "kind": "class", "name": "org.example.api.Util", "delta": "REMOVED" }
            ]
        },
        { "name": "org.example.internal", "delta": "UNCHANGED" }
    ]
}"#;

/// Write [`SAMPLE_BASELINE`] into `dir` and return its path
pub fn write_sample_baseline(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join("baseline.json");
    fs::write(&path, SAMPLE_BASELINE)?;
    Ok(path)
}

/// Event stream of one package whose diffs sit at the given depths.
///
/// Each depth is entered then exited in depth-first order, so
/// `[1, 2, 2, 1]` yields two siblings below the first item and a second
/// top-level item.
pub fn package_stream(depths: &[usize]) -> Vec<ReportEvent> {
    let mut events = vec![
        ReportEvent::BeginDocument(DocumentHeader {
            title: "Baseline Report".to_string(),
            bundle_name: "org.example.bundle".to_string(),
            current_version: "1.1.0".to_string(),
            comparison_version: "1.0.0".to_string(),
            generation_date: "2024-05-01".to_string(),
        }),
        ReportEvent::BeginPackage(PackageEntry::new("org.example.api")),
    ];

    let mut open: Vec<usize> = Vec::new();
    for (index, &depth) in depths.iter().enumerate() {
        while let Some(&top) = open.last() {
            if top < depth {
                break;
            }
            events.push(ReportEvent::ExitDiff { depth: top });
            open.pop();
        }
        events.push(ReportEvent::EnterDiff(DiffNode::new(
            depth,
            DiffKind::Method,
            format!("m{index}()"),
            "ADDED".to_string(),
        )));
        open.push(depth);
    }
    while let Some(depth) = open.pop() {
        events.push(ReportEvent::ExitDiff { depth });
    }

    events.push(ReportEvent::EndPackage);
    events.push(ReportEvent::EndDocument);
    events
}
