//! Baseline comparison input and its depth-first traversal
//!
//! The comparison itself is computed elsewhere; this module reads its JSON
//! form and flattens the tree into [`ReportEvent`]s.

use crate::error::{ReportError, Result};
use crate::events::ReportEvent;
use crate::types::{
    is_unchanged_delta, DiffKind, DiffMessage, DiffNode, DocumentHeader, PackageEntry,
    VersionTriple,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Result of comparing a bundle against its baseline
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Baseline {
    pub bundle_name: String,
    pub current_version: String,
    pub comparison_version: String,
    /// Overrides the generation date printed in the report
    #[serde(default)]
    pub generation_date: Option<String>,
    #[serde(default)]
    pub packages: Vec<PackageDiff>,
}

/// Comparison of one exported package
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageDiff {
    pub name: String,
    #[serde(default)]
    pub mismatch: bool,
    pub delta: String,
    #[serde(default)]
    pub short_delta: String,
    #[serde(default)]
    pub newer_version: String,
    #[serde(default)]
    pub older_version: String,
    #[serde(default)]
    pub suggested_version: String,
    #[serde(default)]
    pub diagnostic: Option<DiffMessage>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub children: Vec<DiffTree>,
}

/// Nested member diff below a package
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiffTree {
    pub kind: DiffKind,
    pub name: String,
    pub delta: String,
    #[serde(default)]
    pub short_delta: String,
    #[serde(default)]
    pub children: Vec<DiffTree>,
}

/// Controls how a [`Baseline`] is turned into events
#[derive(Debug, Clone)]
pub struct TraversalOptions {
    pub title: String,
    /// Used when the baseline does not carry its own date
    pub generation_date: String,
    /// Keep packages and members whose delta is unchanged or ignored
    pub include_unchanged: bool,
}

impl PackageDiff {
    pub fn entry(&self) -> PackageEntry {
        PackageEntry {
            mismatch: self.mismatch,
            name: self.name.clone(),
            short_delta: self.short_delta.clone(),
            delta: self.delta.clone(),
            versions: VersionTriple::new(
                self.newer_version.clone(),
                self.older_version.clone(),
                self.suggested_version.clone(),
            ),
            diagnostic: self.diagnostic.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

impl Baseline {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReportError::BaselineNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn header(&self, options: &TraversalOptions) -> DocumentHeader {
        DocumentHeader {
            title: options.title.clone(),
            bundle_name: self.bundle_name.clone(),
            current_version: self.current_version.clone(),
            comparison_version: self.comparison_version.clone(),
            generation_date: self
                .generation_date
                .clone()
                .unwrap_or_else(|| options.generation_date.clone()),
        }
    }

    /// Packages that will appear in the report
    pub fn reported_packages<'a>(
        &'a self,
        options: &'a TraversalOptions,
    ) -> impl Iterator<Item = &'a PackageDiff> + 'a {
        self.packages
            .iter()
            .filter(move |package| options.include_unchanged || !is_unchanged_delta(&package.delta))
    }

    /// Flatten the comparison into a complete depth-first event stream.
    ///
    /// Top-level members of a package are emitted at depth 1, the package
    /// line itself standing at depth 0.
    pub fn events(&self, options: &TraversalOptions) -> Vec<ReportEvent> {
        let mut events = vec![ReportEvent::BeginDocument(self.header(options))];

        for package in self.reported_packages(options) {
            events.push(ReportEvent::BeginPackage(package.entry()));
            for child in &package.children {
                push_tree(&mut events, child, 1, options.include_unchanged);
            }
            events.push(ReportEvent::EndPackage);
        }

        events.push(ReportEvent::EndDocument);
        events
    }
}

fn push_tree(events: &mut Vec<ReportEvent>, tree: &DiffTree, depth: usize, include_unchanged: bool) {
    if !include_unchanged && is_unchanged_delta(&tree.delta) {
        return;
    }

    events.push(ReportEvent::EnterDiff(
        DiffNode::new(depth, tree.kind, tree.name.as_str(), tree.delta.as_str())
            .with_short_delta(tree.short_delta.as_str()),
    ));
    for child in &tree.children {
        push_tree(events, child, depth + 1, include_unchanged);
    }
    events.push(ReportEvent::ExitDiff { depth });
}
