//! Baseline Report - renders bundle API baseline comparisons as nested outlines
//!
//! A baseline comparison is a tree (package → class → member diffs) handed
//! over as a depth-first stream of events. The [`NestedOutlineRenderer`]
//! turns that stream into correctly nested lists on any [`DocumentSink`].

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Shared utility modules
pub mod utils;

// Main functionality modules
pub mod baseline;
pub mod events;
pub mod icons;
pub mod labels;
pub mod renderer;
pub mod report;
pub mod sinks;

// Re-export main types for convenience
pub use baseline::{Baseline, DiffTree, PackageDiff, TraversalOptions};
pub use config::{ConfigLoader, DefaultConfigLoader, OutputFormat, ReportConfig};
pub use error::{ReportError, Result};
pub use events::{drive, ReportEvent};
pub use icons::{stage_icons, Icon, StagingReport, ICON_DIR};
pub use labels::{LabelTable, Labels};
pub use renderer::{DepthPolicy, NestedOutlineRenderer};
pub use report::{BaselineReport, GenerationOutcome, WriteOutcome};
pub use sinks::{DocumentSink, HtmlSink, MarkdownSink, RecordingSink};
pub use types::{
    DiffKind, DiffMessage, DiffNode, DocumentHeader, PackageEntry, Severity, VersionTriple,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that the re-exported surface is enough to render a report
    #[test]
    fn test_module_imports() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(RecordingSink::new(), &labels);

        let events = vec![
            ReportEvent::BeginDocument(DocumentHeader::default()),
            ReportEvent::BeginPackage(PackageEntry::new("com.example")),
            ReportEvent::EnterDiff(DiffNode::new(1, DiffKind::Class, "com.example.Foo", "ADDED")),
            ReportEvent::ExitDiff { depth: 1 },
            ReportEvent::EndPackage,
            ReportEvent::EndDocument,
        ];
        drive(&mut renderer, &events).unwrap();

        assert!(renderer.sink().is_balanced());
    }

    /// Test that error types work correctly
    #[test]
    fn test_error_types() {
        let error = ReportError::invalid_config("test error");
        assert!(error.to_string().contains("Invalid configuration"));

        let error = ReportError::UnknownKind {
            kind: "lambda".to_string(),
        };
        assert!(error.to_string().contains("lambda"));
    }
}
