use crate::error::ReportError;
use crate::icons::Icon;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Category of a single entry in a baseline comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DiffKind {
    Access,
    Annotated,
    Annotation,
    Bundle,
    Class,
    Constant,
    Enum,
    Extends,
    Field,
    Implements,
    Interface,
    Method,
    Package,
    Resource,
    Return,
    Version,
}

impl DiffKind {
    pub const ALL: [DiffKind; 16] = [
        DiffKind::Access,
        DiffKind::Annotated,
        DiffKind::Annotation,
        DiffKind::Bundle,
        DiffKind::Class,
        DiffKind::Constant,
        DiffKind::Enum,
        DiffKind::Extends,
        DiffKind::Field,
        DiffKind::Implements,
        DiffKind::Interface,
        DiffKind::Method,
        DiffKind::Package,
        DiffKind::Resource,
        DiffKind::Return,
        DiffKind::Version,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DiffKind::Access => "access",
            DiffKind::Annotated => "annotated",
            DiffKind::Annotation => "annotation",
            DiffKind::Bundle => "bundle",
            DiffKind::Class => "class",
            DiffKind::Constant => "constant",
            DiffKind::Enum => "enum",
            DiffKind::Extends => "extends",
            DiffKind::Field => "field",
            DiffKind::Implements => "implements",
            DiffKind::Interface => "interface",
            DiffKind::Method => "method",
            DiffKind::Package => "package",
            DiffKind::Resource => "resource",
            DiffKind::Return => "return",
            DiffKind::Version => "version",
        }
    }

    pub const fn icon(self) -> Icon {
        match self {
            DiffKind::Access => Icon::Access,
            DiffKind::Annotated => Icon::Annotated,
            DiffKind::Annotation => Icon::Annotation,
            DiffKind::Bundle => Icon::Bundle,
            DiffKind::Class => Icon::Class,
            DiffKind::Constant => Icon::Constant,
            DiffKind::Enum => Icon::Enum,
            DiffKind::Extends => Icon::Extends,
            DiffKind::Field => Icon::Field,
            DiffKind::Implements => Icon::Implements,
            DiffKind::Interface => Icon::Interface,
            DiffKind::Method => Icon::Method,
            DiffKind::Package => Icon::Package,
            DiffKind::Resource => Icon::Resource,
            DiffKind::Return => Icon::Return,
            DiffKind::Version => Icon::Version,
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffKind {
    type Err = ReportError;

    /// Tags are matched case-insensitively, so `CLASS` and `class` are the same kind
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DiffKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| ReportError::UnknownKind {
                kind: s.to_string(),
            })
    }
}

impl TryFrom<String> for DiffKind {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiffKind> for String {
    fn from(kind: DiffKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Severity of a package diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "ERROR")]
    Error,
    #[serde(alias = "WARNING")]
    Warning,
    #[serde(alias = "INFO")]
    Info,
}

impl Severity {
    pub const fn icon(self) -> Icon {
        match self {
            Severity::Error => Icon::Error,
            Severity::Warning => Icon::Warning,
            Severity::Info => Icon::Info,
        }
    }
}

/// Diagnostic attached to a package, e.g. a version that should have been bumped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffMessage {
    pub severity: Severity,
    pub message: String,
}

impl DiffMessage {
    pub fn new<S: Into<String>>(severity: Severity, message: S) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Versions reported for one package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionTriple {
    pub newer: String,
    pub older: String,
    pub suggested: String,
}

impl VersionTriple {
    pub fn new<S: Into<String>>(newer: S, older: S, suggested: S) -> Self {
        Self {
            newer: newer.into(),
            older: older.into(),
            suggested: suggested.into(),
        }
    }
}

/// Top-level grouping of a baseline report: one exported package
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageEntry {
    pub mismatch: bool,
    pub name: String,
    pub short_delta: String,
    pub delta: String,
    pub versions: VersionTriple,
    pub diagnostic: Option<DiffMessage>,
    /// Manifest attributes of the package; order carries no meaning
    pub attributes: HashMap<String, String>,
}

impl PackageEntry {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_versions(mut self, versions: VersionTriple) -> Self {
        self.versions = versions;
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: DiffMessage) -> Self {
        self.diagnostic = Some(diagnostic);
        self
    }
}

/// One depth-tagged entry of the comparison tree.
///
/// A node at depth `d + 1` belongs to the most recently emitted node at
/// depth `d`; there is no parent pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffNode {
    pub depth: usize,
    pub kind: DiffKind,
    pub name: String,
    pub delta: String,
    pub short_delta: String,
}

impl DiffNode {
    pub fn new<S: Into<String>>(depth: usize, kind: DiffKind, name: S, delta: S) -> Self {
        Self {
            depth,
            kind,
            name: name.into(),
            delta: delta.into(),
            short_delta: String::new(),
        }
    }

    pub fn with_short_delta<S: Into<String>>(mut self, short_delta: S) -> Self {
        self.short_delta = short_delta.into();
        self
    }
}

/// Identity block printed at the top of a report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentHeader {
    pub title: String,
    pub bundle_name: String,
    pub current_version: String,
    pub comparison_version: String,
    pub generation_date: String,
}

/// Whether a delta string means "nothing to report"
pub fn is_unchanged_delta(delta: &str) -> bool {
    let delta = delta.trim();
    delta.eq_ignore_ascii_case("unchanged") || delta.eq_ignore_ascii_case("ignored")
}
