//! Nested outline renderer
//!
//! Turns the depth-first event stream of a baseline comparison into nested
//! lists. The comparison tree carries no parent links, so nesting is
//! reconstructed from node depths with a single cursor:
//!
//! * entering a node deeper than the cursor opens one list;
//! * exiting a node shallower than the cursor closes one list;
//! * ending a package closes the list still open below it, if any.
//!
//! Producers must grow depth by at most one level per entered node. With
//! [`DepthPolicy::Lenient`] violations are rendered as-is (unbalanced
//! output, never a panic); with [`DepthPolicy::Strict`] they are rejected
//! before anything reaches the sink.

use crate::error::{ReportError, Result};
use crate::icons::Icon;
use crate::labels::{keys, Labels};
use crate::sinks::DocumentSink;
use crate::types::{DiffNode, DocumentHeader, PackageEntry};
use serde::{Deserialize, Serialize};

/// Home page of the tool computing the baseline
pub const BND_URL: &str = "https://bnd.bndtools.org/";

/// How the renderer reacts to event streams that break depth-first order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthPolicy {
    /// Render whatever arrives
    #[default]
    Lenient,
    /// Reject depth jumps, unmatched exits and out-of-order events
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Document,
    Package,
    Finished,
}

/// Renderer state for one report. Not meant to be shared between reports.
pub struct NestedOutlineRenderer<'a, S: DocumentSink> {
    sink: S,
    labels: &'a dyn Labels,
    policy: DepthPolicy,
    /// Depth of the innermost list scope opened for diff nodes
    current_depth: usize,
    phase: Phase,
    /// Depths of the diff items not yet exited
    open_items: Vec<usize>,
    /// Depth of the first top-level item of the current package
    root_depth: Option<usize>,
}

impl<'a, S: DocumentSink> NestedOutlineRenderer<'a, S> {
    pub fn new(sink: S, labels: &'a dyn Labels) -> Self {
        Self {
            sink,
            labels,
            policy: DepthPolicy::Lenient,
            current_depth: 0,
            phase: Phase::Created,
            open_items: Vec::new(),
            root_depth: None,
        }
    }

    pub fn with_policy(mut self, policy: DepthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DepthPolicy {
        self.policy
    }

    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn is_strict(&self) -> bool {
        self.policy == DepthPolicy::Strict
    }

    /// Emit the document head and the metadata section.
    ///
    /// Must be called once, before any package.
    pub fn begin_document(&mut self, header: &DocumentHeader) -> Result<()> {
        if self.is_strict() && self.phase != Phase::Created {
            return Err(ReportError::out_of_order(
                "begin_document",
                "the document has already been started",
            ));
        }

        self.sink.open_head();
        self.sink.open_title();
        self.sink.text(&header.title);
        self.sink.close_title();
        self.sink.close_head();

        self.sink.open_body();

        self.sink.open_section();
        self.sink.open_section_title();
        self.sink.text(&header.title);
        self.sink.close_section_title();

        self.sink.open_paragraph();
        self.sink.text(&format!("{} ", self.labels.label(keys::BND_LINK)));
        self.sink.open_link(BND_URL);
        self.sink.text("Bnd");
        self.sink.close_link();
        self.sink.text(".");
        self.sink.close_paragraph();

        self.sink.open_paragraph();
        self.sink.text(&format!("{} ", self.labels.label(keys::BUNDLE)));
        self.sink.figure(Icon::Bundle.path());
        self.sink.text(" ");
        self.sink.open_bold();
        self.sink.text(&header.bundle_name);
        self.sink.close_bold();
        self.sink.close_paragraph();

        self.caption_paragraph(keys::VERSION_CURRENT, &header.current_version);
        self.caption_paragraph(keys::VERSION_COMPARISON, &header.comparison_version);
        self.caption_paragraph(keys::GENERATION_DATE, &header.generation_date);

        self.sink.close_section();

        self.phase = Phase::Document;
        tracing::debug!(bundle = %header.bundle_name, "Baseline report started");
        Ok(())
    }

    /// Open the list holding one package and write its header line
    pub fn begin_package(&mut self, entry: &PackageEntry) -> Result<()> {
        if self.is_strict() {
            match self.phase {
                Phase::Document => {}
                Phase::Package => {
                    return Err(ReportError::out_of_order(
                        "begin_package",
                        "the previous package has not been ended",
                    ))
                }
                Phase::Created | Phase::Finished => {
                    return Err(ReportError::out_of_order(
                        "begin_package",
                        "no document is open",
                    ))
                }
            }
        }

        self.sink.open_list();
        self.sink.open_list_item();

        self.sink.figure(Icon::Package.path());
        self.sink.text(" ");
        self.sink.open_monospaced();
        self.sink.text(&entry.name);
        self.sink.close_monospaced();

        if let Some(diagnostic) = &entry.diagnostic {
            self.sink.text(" ");
            self.sink.figure(diagnostic.severity.icon().path());
            self.sink.text(" ");
            self.sink.open_italic();
            self.sink.text(&diagnostic.message);
            self.sink.close_italic();

            self.sink
                .text(&format!(" ({}: ", self.labels.label(keys::VERSION_NEWER)));
            self.monospaced(&entry.versions.newer);
            self.sink
                .text(&format!(", {}: ", self.labels.label(keys::VERSION_OLDER)));
            self.monospaced(&entry.versions.older);
            self.sink
                .text(&format!(", {}: ", self.labels.label(keys::VERSION_SUGGESTED)));
            self.monospaced(&entry.versions.suggested);
            self.sink.text(")");
        }

        self.current_depth = 0;
        self.open_items.clear();
        self.root_depth = None;
        self.phase = Phase::Package;
        tracing::trace!(package = %entry.name, mismatch = entry.mismatch, "Package started");
        Ok(())
    }

    /// Write one diff node as a list item, opening a nested list first if
    /// the node is deeper than the cursor.
    ///
    /// At most one list is opened per call, whatever the depth increase.
    pub fn enter_diff(&mut self, node: &DiffNode) -> Result<()> {
        if self.is_strict() {
            self.check_enter(node.depth)?;
        }

        if node.depth > self.current_depth {
            self.sink.open_list();
        }
        self.current_depth = node.depth;

        self.sink.open_list_item();
        self.sink.figure(node.kind.icon().path());
        self.sink.text(" ");
        self.monospaced(&node.name);
        self.sink.text(" ");
        self.sink.open_italic();
        self.sink.text(&node.delta);
        self.sink.close_italic();

        if self.open_items.is_empty() && self.root_depth.is_none() {
            self.root_depth = Some(node.depth);
        }
        self.open_items.push(node.depth);
        Ok(())
    }

    /// Close the list below the item entered at `depth` if it had children,
    /// then the item itself
    pub fn exit_diff(&mut self, depth: usize) -> Result<()> {
        if self.is_strict() {
            self.check_exit(depth)?;
        }

        if self.current_depth > depth {
            self.sink.close_list();
        }
        self.sink.close_list_item();
        self.current_depth = depth;
        self.open_items.pop();
        Ok(())
    }

    /// Close any nested list left open, then the package item and its list
    pub fn end_package(&mut self) -> Result<()> {
        if self.is_strict() {
            if self.phase != Phase::Package {
                return Err(ReportError::out_of_order("end_package", "no package is open"));
            }
            if let Some(&depth) = self.open_items.last() {
                return Err(ReportError::unbalanced_exit(
                    depth,
                    "item still open at the end of the package",
                ));
            }
        }

        if self.current_depth > 0 {
            self.sink.close_list();
        }
        self.current_depth = 0;

        self.sink.close_list_item();
        self.sink.close_list();

        self.open_items.clear();
        self.root_depth = None;
        self.phase = Phase::Document;
        Ok(())
    }

    /// Close the body and finish the sink
    pub fn end_document(&mut self) -> Result<()> {
        if self.is_strict() {
            match self.phase {
                Phase::Finished => {
                    return Err(ReportError::out_of_order(
                        "end_document",
                        "the document has already been ended",
                    ))
                }
                Phase::Package => {
                    return Err(ReportError::out_of_order(
                        "end_document",
                        "a package is still open",
                    ))
                }
                Phase::Created | Phase::Document => {}
            }
        }

        self.finish()
    }

    /// Close the body and the sink without validating the stream
    pub(crate) fn finish(&mut self) -> Result<()> {
        self.sink.close_body();
        self.phase = Phase::Finished;
        self.sink.flush()?;
        self.sink.close()?;
        tracing::debug!("Baseline report finished");
        Ok(())
    }

    fn check_enter(&self, depth: usize) -> Result<()> {
        if self.phase != Phase::Package {
            return Err(ReportError::out_of_order("enter_diff", "no package is open"));
        }

        match (self.open_items.last(), self.root_depth) {
            (Some(&parent), _) if depth > parent + 1 => Err(ReportError::DepthJump {
                from: parent,
                to: depth,
            }),
            (Some(&parent), _) if depth <= parent => Err(ReportError::out_of_order(
                "enter_diff",
                format!("item at depth {parent} has not been exited"),
            )),
            (Some(_), _) => Ok(()),
            (None, None) if depth > 1 => Err(ReportError::DepthJump {
                from: self.current_depth,
                to: depth,
            }),
            (None, Some(root)) if depth > root => Err(ReportError::DepthJump {
                from: root,
                to: depth,
            }),
            (None, Some(root)) if depth < root => Err(ReportError::out_of_order(
                "enter_diff",
                format!("top-level items of this package are at depth {root}"),
            )),
            (None, _) => Ok(()),
        }
    }

    fn check_exit(&self, depth: usize) -> Result<()> {
        if self.phase != Phase::Package {
            return Err(ReportError::out_of_order("exit_diff", "no package is open"));
        }

        match self.open_items.last() {
            Some(&open) if open == depth => Ok(()),
            Some(&open) => Err(ReportError::unbalanced_exit(
                depth,
                format!("innermost open item is at depth {open}"),
            )),
            None => Err(ReportError::unbalanced_exit(depth, "no item is open")),
        }
    }

    fn caption_paragraph(&mut self, key: &str, value: &str) {
        self.sink.open_paragraph();
        self.sink.text(&format!("{} ", self.labels.label(key)));
        self.sink.open_bold();
        self.sink.text(value);
        self.sink.close_bold();
        self.sink.close_paragraph();
    }

    fn monospaced(&mut self, text: &str) {
        self.sink.open_monospaced();
        self.sink.text(text);
        self.sink.close_monospaced();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelTable;
    use crate::sinks::{HtmlSink, RecordingSink, Scope, SinkEvent};
    use crate::types::{DiffKind, DiffMessage, Severity, VersionTriple};

    fn header() -> DocumentHeader {
        DocumentHeader {
            title: "Baseline Report".to_string(),
            bundle_name: "org.example.bundle".to_string(),
            current_version: "1.1.0".to_string(),
            comparison_version: "1.0.0".to_string(),
            generation_date: "2024-05-01".to_string(),
        }
    }

    fn node(depth: usize, kind: DiffKind, name: &str) -> DiffNode {
        DiffNode::new(depth, kind, name, "ADDED")
    }

    fn started(labels: &LabelTable) -> NestedOutlineRenderer<'_, RecordingSink> {
        let mut renderer = NestedOutlineRenderer::new(RecordingSink::new(), labels);
        renderer.begin_document(&header()).unwrap();
        renderer
    }

    /// Replays `(depth, entering)` steps inside a single package
    fn render_package(
        renderer: &mut NestedOutlineRenderer<'_, RecordingSink>,
        steps: &[(usize, bool)],
    ) {
        renderer.begin_package(&PackageEntry::new("com.example")).unwrap();
        for &(depth, entering) in steps {
            if entering {
                renderer.enter_diff(&node(depth, DiffKind::Method, "m")).unwrap();
            } else {
                renderer.exit_diff(depth).unwrap();
            }
        }
        renderer.end_package().unwrap();
    }

    #[test]
    fn test_single_nested_scope() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels);
        let lists_before = renderer.sink().count_opened(Scope::List);

        render_package(
            &mut renderer,
            &[(0, true), (1, true), (1, false), (0, false)],
        );

        // one list for the package, one for the nested member
        assert_eq!(renderer.sink().count_opened(Scope::List) - lists_before, 2);
        assert_eq!(renderer.sink().list_depth(), 0);
        assert_eq!(renderer.current_depth(), 0);
    }

    #[test]
    fn test_scope_balance_for_depth_first_sequences() {
        let sequences: Vec<Vec<(usize, bool)>> = vec![
            vec![],
            vec![(1, true), (1, false)],
            vec![(1, true), (2, true), (2, false), (2, true), (2, false), (1, false)],
            vec![
                (1, true),
                (2, true),
                (3, true),
                (3, false),
                (2, false),
                (1, false),
                (1, true),
                (1, false),
            ],
            vec![(0, true), (1, true), (2, true), (2, false), (1, false), (0, false)],
        ];

        for steps in sequences {
            let labels = LabelTable::english();
            let mut renderer = started(&labels);
            let depth_before = renderer.sink().list_depth();

            render_package(&mut renderer, &steps);

            assert_eq!(renderer.sink().list_depth(), depth_before, "steps: {steps:?}");
            assert_eq!(renderer.current_depth(), 0);
            renderer.end_document().unwrap();
            assert!(renderer.sink().is_balanced(), "steps: {steps:?}");
        }
    }

    #[test]
    fn test_enter_then_exit_keeps_depth() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels);
        renderer.begin_package(&PackageEntry::new("p")).unwrap();
        renderer.enter_diff(&node(1, DiffKind::Class, "A")).unwrap();
        renderer.enter_diff(&node(2, DiffKind::Field, "f")).unwrap();
        renderer.exit_diff(2).unwrap();
        assert_eq!(renderer.current_depth(), 2);
        renderer.enter_diff(&node(2, DiffKind::Field, "g")).unwrap();
        renderer.exit_diff(2).unwrap();
        assert_eq!(renderer.current_depth(), 2);
    }

    #[test]
    fn test_packages_are_independent() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels);

        render_package(
            &mut renderer,
            &[(1, true), (2, true), (3, true), (3, false), (2, false), (1, false)],
        );
        assert_eq!(renderer.current_depth(), 0);

        render_package(&mut renderer, &[(1, true), (1, false)]);
        assert_eq!(renderer.current_depth(), 0);
        assert_eq!(renderer.sink().list_depth(), 0);
    }

    #[test]
    fn test_class_with_member_outline() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels);
        renderer.begin_package(&PackageEntry::new("com.example")).unwrap();
        renderer
            .enter_diff(&node(0, DiffKind::Class, "com.example.Foo"))
            .unwrap();
        renderer.enter_diff(&node(1, DiffKind::Method, "bar()")).unwrap();
        renderer.exit_diff(1).unwrap();
        renderer.exit_diff(0).unwrap();
        renderer.end_package().unwrap();
        renderer.end_document().unwrap();

        let sink = renderer.into_sink();
        let items = sink.items();
        assert_eq!(items.len(), 3);
        assert!(items[1].text.contains("com.example.Foo"));
        assert!(items[2].text.contains("bar()"));
        assert_eq!(items[2].parent, Some(1));
        assert_eq!(items[2].depth, items[1].depth + 1);
        assert_eq!(
            items.iter().filter(|item| item.parent == Some(1)).count(),
            1
        );
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let labels = LabelTable::english();
        let steps = [(1, true), (2, true), (2, false), (1, false)];

        let render = || {
            let mut renderer = started(&labels);
            render_package(&mut renderer, &steps);
            renderer.end_document().unwrap();
            renderer.into_sink()
        };

        assert_eq!(render().events(), render().events());
    }

    #[test]
    fn test_depth_jump_opens_single_scope_when_lenient() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels);
        renderer.begin_package(&PackageEntry::new("p")).unwrap();
        renderer.enter_diff(&node(3, DiffKind::Method, "m")).unwrap();
        renderer.exit_diff(3).unwrap();
        renderer.end_package().unwrap();

        // package list plus one nested list, both closed
        assert_eq!(renderer.sink().count_opened(Scope::List), 2);
        assert_eq!(renderer.sink().list_depth(), 0);
    }

    #[test]
    fn test_diagnostic_is_rendered_inline() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels);
        let entry = PackageEntry::new("com.example.api")
            .with_versions(VersionTriple::new("1.1.0", "1.0.0", "2.0.0"))
            .with_diagnostic(DiffMessage::new(Severity::Error, "Version increase required"));
        renderer.begin_package(&entry).unwrap();
        renderer.end_package().unwrap();

        let sink = renderer.into_sink();
        assert!(sink
            .events()
            .contains(&SinkEvent::Figure("images/baseline/error.gif".to_string())));
        let package = sink.items().last().unwrap();
        assert_eq!(
            package.text,
            " com.example.api  Version increase required (newer version: 1.1.0, older version: 1.0.0, suggested version: 2.0.0)"
        );
    }

    #[test]
    fn test_strict_rejects_depth_jump() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels).with_policy(DepthPolicy::Strict);
        renderer.begin_package(&PackageEntry::new("p")).unwrap();
        renderer.enter_diff(&node(1, DiffKind::Class, "A")).unwrap();

        let result = renderer.enter_diff(&node(3, DiffKind::Method, "m"));
        assert!(matches!(result, Err(ReportError::DepthJump { from: 1, to: 3 })));
        assert_eq!(renderer.current_depth(), 1);
    }

    #[test]
    fn test_strict_rejects_unmatched_exit() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels).with_policy(DepthPolicy::Strict);
        renderer.begin_package(&PackageEntry::new("p")).unwrap();
        renderer.enter_diff(&node(1, DiffKind::Class, "A")).unwrap();
        renderer.enter_diff(&node(2, DiffKind::Method, "m")).unwrap();

        assert!(matches!(
            renderer.exit_diff(1),
            Err(ReportError::UnbalancedExit { depth: 1, .. })
        ));
        assert!(matches!(
            renderer.end_package(),
            Err(ReportError::UnbalancedExit { depth: 2, .. })
        ));
    }

    #[test]
    fn test_strict_rejects_out_of_order_events() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(RecordingSink::new(), &labels)
            .with_policy(DepthPolicy::Strict);

        assert!(matches!(
            renderer.begin_package(&PackageEntry::new("p")),
            Err(ReportError::OutOfOrder { event: "begin_package", .. })
        ));
        renderer.begin_document(&header()).unwrap();
        assert!(renderer.begin_document(&header()).is_err());
        assert!(matches!(
            renderer.enter_diff(&node(1, DiffKind::Class, "A")),
            Err(ReportError::OutOfOrder { event: "enter_diff", .. })
        ));
        renderer.end_document().unwrap();
        assert!(renderer.end_document().is_err());
    }

    #[test]
    fn test_nested_lists_close_before_their_parent_item() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels);

        render_package(
            &mut renderer,
            &[(1, true), (2, true), (3, true), (3, false), (2, false), (1, false)],
        );
        renderer.end_document().unwrap();

        let sink = renderer.into_sink();
        assert_eq!(sink.mismatches(), 0);
        assert!(sink.is_balanced());
        assert_eq!(sink.max_list_depth(), 4);
    }

    #[test]
    fn test_html_parent_item_wraps_child_list() {
        let labels = LabelTable::english();
        let mut renderer = NestedOutlineRenderer::new(HtmlSink::new(Vec::new()), &labels);
        renderer.begin_document(&header()).unwrap();
        renderer.begin_package(&PackageEntry::new("com.example")).unwrap();
        renderer
            .enter_diff(&node(1, DiffKind::Class, "com.example.Foo"))
            .unwrap();
        renderer.enter_diff(&node(2, DiffKind::Method, "bar()")).unwrap();
        renderer.exit_diff(2).unwrap();
        renderer.exit_diff(1).unwrap();
        renderer.end_package().unwrap();
        renderer.end_document().unwrap();

        let html = String::from_utf8(renderer.into_sink().into_inner()).unwrap();
        let body = &html[html.find("<ul>").unwrap()..];
        assert!(body.contains("<code>bar()</code> <i>ADDED</i></li>\n</ul>\n</li>\n</ul>\n</li>\n</ul>\n"));
        assert!(!body.contains("</li>\n</li>"));
    }

    #[test]
    fn test_strict_rejects_end_document_inside_package() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels).with_policy(DepthPolicy::Strict);
        renderer.begin_package(&PackageEntry::new("p")).unwrap();
        renderer.enter_diff(&node(1, DiffKind::Class, "A")).unwrap();

        assert!(matches!(
            renderer.end_document(),
            Err(ReportError::OutOfOrder { event: "end_document", .. })
        ));
        assert!(!renderer.is_finished());
        assert!(!renderer.sink().is_closed());
    }

    #[test]
    fn test_strict_accepts_well_formed_stream() {
        let labels = LabelTable::english();
        let mut renderer = started(&labels).with_policy(DepthPolicy::Strict);
        render_package(
            &mut renderer,
            &[(1, true), (2, true), (2, false), (1, false), (1, true), (1, false)],
        );
        renderer.end_document().unwrap();
        assert!(renderer.sink().is_balanced());
    }
}
