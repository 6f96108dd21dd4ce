//! Depth-first event protocol between a diff-tree producer and the renderer
//!
//! A well-formed stream reads
//! `BeginDocument (BeginPackage (EnterDiff | ExitDiff)* EndPackage)* EndDocument`,
//! where every `EnterDiff` at depth `d` is matched by an `ExitDiff` at `d`
//! and depth grows by at most one per `EnterDiff`.

use crate::error::Result;
use crate::renderer::NestedOutlineRenderer;
use crate::sinks::DocumentSink;
use crate::types::{DiffNode, DocumentHeader, PackageEntry};

#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    BeginDocument(DocumentHeader),
    BeginPackage(PackageEntry),
    EnterDiff(DiffNode),
    ExitDiff { depth: usize },
    EndPackage,
    EndDocument,
}

impl ReportEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ReportEvent::BeginDocument(_) => "begin_document",
            ReportEvent::BeginPackage(_) => "begin_package",
            ReportEvent::EnterDiff(_) => "enter_diff",
            ReportEvent::ExitDiff { .. } => "exit_diff",
            ReportEvent::EndPackage => "end_package",
            ReportEvent::EndDocument => "end_document",
        }
    }

    pub fn apply<S: DocumentSink>(&self, renderer: &mut NestedOutlineRenderer<'_, S>) -> Result<()> {
        match self {
            ReportEvent::BeginDocument(header) => renderer.begin_document(header),
            ReportEvent::BeginPackage(entry) => renderer.begin_package(entry),
            ReportEvent::EnterDiff(node) => renderer.enter_diff(node),
            ReportEvent::ExitDiff { depth } => renderer.exit_diff(*depth),
            ReportEvent::EndPackage => renderer.end_package(),
            ReportEvent::EndDocument => renderer.end_document(),
        }
    }
}

/// Replay `events` into `renderer`.
///
/// Stops at the first failing event. The sink is closed when this returns
/// in every case, and the first rejection is the error reported: a failure
/// while closing after it is only logged.
pub fn drive<'e, S, I>(renderer: &mut NestedOutlineRenderer<'_, S>, events: I) -> Result<()>
where
    S: DocumentSink,
    I: IntoIterator<Item = &'e ReportEvent>,
{
    let mut outcome = Ok(());
    for event in events {
        if let Err(err) = event.apply(renderer) {
            tracing::debug!(event = event.name(), error = %err, "Report event rejected");
            outcome = Err(err);
            break;
        }
    }

    if outcome.is_ok() && !renderer.is_finished() {
        outcome = renderer.end_document();
    }

    if !renderer.is_finished() {
        if let Err(close_err) = renderer.finish() {
            if outcome.is_ok() {
                outcome = Err(close_err);
            } else {
                tracing::warn!(
                    "Failed to close the report after a rejected event: {}",
                    close_err
                );
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::labels::LabelTable;
    use crate::renderer::DepthPolicy;
    use crate::sinks::{HtmlSink, RecordingSink};
    use crate::types::DiffKind;

    fn stream(member_depth: usize) -> Vec<ReportEvent> {
        vec![
            ReportEvent::BeginDocument(DocumentHeader::default()),
            ReportEvent::BeginPackage(PackageEntry::new("com.example")),
            ReportEvent::EnterDiff(DiffNode::new(1, DiffKind::Class, "Foo", "CHANGED")),
            ReportEvent::EnterDiff(DiffNode::new(
                member_depth,
                DiffKind::Method,
                "bar()",
                "ADDED",
            )),
            ReportEvent::ExitDiff {
                depth: member_depth,
            },
            ReportEvent::ExitDiff { depth: 1 },
            ReportEvent::EndPackage,
            ReportEvent::EndDocument,
        ]
    }

    #[test]
    fn test_drive_well_formed_stream() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(RecordingSink::new(), &labels);

        drive(&mut renderer, &stream(2)).unwrap();

        let sink = renderer.into_sink();
        assert!(sink.is_closed());
        assert!(sink.is_balanced());
        assert_eq!(sink.max_list_depth(), 3);
    }

    #[test]
    fn test_drive_closes_document_after_rejection() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(RecordingSink::new(), &labels)
            .with_policy(DepthPolicy::Strict);

        let result = drive(&mut renderer, &stream(4));

        assert!(matches!(result, Err(ReportError::DepthJump { from: 1, to: 4 })));
        assert!(renderer.is_finished());
        assert!(renderer.sink().is_closed());
    }

    #[test]
    fn test_drive_strict_closes_stream_missing_end_package() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(RecordingSink::new(), &labels)
            .with_policy(DepthPolicy::Strict);
        let events = vec![
            ReportEvent::BeginDocument(DocumentHeader::default()),
            ReportEvent::BeginPackage(PackageEntry::new("com.example")),
            ReportEvent::EnterDiff(DiffNode::new(1, DiffKind::Class, "Foo", "ADDED")),
            ReportEvent::EndDocument,
        ];

        let result = drive(&mut renderer, &events);

        assert!(matches!(
            result,
            Err(ReportError::OutOfOrder {
                event: "end_document",
                ..
            })
        ));
        assert!(renderer.is_finished());
        assert!(renderer.sink().is_closed());
    }

    struct BrokenWriter;

    impl std::io::Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_drive_keeps_rejection_over_close_failure() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(HtmlSink::new(BrokenWriter), &labels)
            .with_policy(DepthPolicy::Strict);

        let result = drive(&mut renderer, &stream(4));

        assert!(matches!(result, Err(ReportError::DepthJump { from: 1, to: 4 })));
        assert!(renderer.is_finished());
    }

    #[test]
    fn test_drive_reports_close_failure_of_valid_stream() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(HtmlSink::new(BrokenWriter), &labels);

        let result = drive(&mut renderer, &stream(2));

        assert!(matches!(result, Err(ReportError::Io(_))));
    }

    #[test]
    fn test_drive_ends_truncated_stream() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(RecordingSink::new(), &labels);
        let events = stream(2);

        drive(&mut renderer, &events[..events.len() - 1]).unwrap();

        assert!(renderer.is_finished());
    }
}
