//! Icon table and asset staging
//!
//! Every diff kind and every report marker maps to one image under
//! [`ICON_DIR`]. The images are copied next to the report before rendering;
//! the renderer itself only emits their relative paths.

use std::fs;
use std::path::Path;

/// Directory, relative to the report output directory, holding the icons
pub const ICON_DIR: &str = "images/baseline";

/// Closed set of images referenced by a baseline report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Access,
    Annotated,
    Annotation,
    Bundle,
    Class,
    Constant,
    Enum,
    Error,
    Extends,
    Field,
    Implements,
    Info,
    Interface,
    Method,
    Package,
    Resource,
    Return,
    Version,
    Warning,
}

impl Icon {
    pub const ALL: [Icon; 19] = [
        Icon::Access,
        Icon::Annotated,
        Icon::Annotation,
        Icon::Bundle,
        Icon::Class,
        Icon::Constant,
        Icon::Enum,
        Icon::Error,
        Icon::Extends,
        Icon::Field,
        Icon::Implements,
        Icon::Info,
        Icon::Interface,
        Icon::Method,
        Icon::Package,
        Icon::Resource,
        Icon::Return,
        Icon::Version,
        Icon::Warning,
    ];

    pub const fn file_name(self) -> &'static str {
        match self {
            Icon::Access => "access.gif",
            Icon::Annotated => "annotated.gif",
            Icon::Annotation => "annotation.gif",
            Icon::Bundle => "bundle.gif",
            Icon::Class => "class.gif",
            Icon::Constant => "constant.gif",
            Icon::Enum => "enum.gif",
            Icon::Error => "error.gif",
            Icon::Extends => "extends.gif",
            Icon::Field => "field.gif",
            Icon::Implements => "implements.gif",
            Icon::Info => "info.gif",
            Icon::Interface => "interface.gif",
            Icon::Method => "method.gif",
            Icon::Package => "package.gif",
            Icon::Resource => "resource.gif",
            Icon::Return => "return.gif",
            Icon::Version => "version.gif",
            Icon::Warning => "warning.gif",
        }
    }

    /// Path of the image relative to the report, as emitted into documents
    pub const fn path(self) -> &'static str {
        match self {
            Icon::Access => "images/baseline/access.gif",
            Icon::Annotated => "images/baseline/annotated.gif",
            Icon::Annotation => "images/baseline/annotation.gif",
            Icon::Bundle => "images/baseline/bundle.gif",
            Icon::Class => "images/baseline/class.gif",
            Icon::Constant => "images/baseline/constant.gif",
            Icon::Enum => "images/baseline/enum.gif",
            Icon::Error => "images/baseline/error.gif",
            Icon::Extends => "images/baseline/extends.gif",
            Icon::Field => "images/baseline/field.gif",
            Icon::Implements => "images/baseline/implements.gif",
            Icon::Info => "images/baseline/info.gif",
            Icon::Interface => "images/baseline/interface.gif",
            Icon::Method => "images/baseline/method.gif",
            Icon::Package => "images/baseline/package.gif",
            Icon::Resource => "images/baseline/resource.gif",
            Icon::Return => "images/baseline/return.gif",
            Icon::Version => "images/baseline/version.gif",
            Icon::Warning => "images/baseline/warning.gif",
        }
    }
}

/// Outcome of copying the icon set next to a report
#[derive(Debug, Default)]
pub struct StagingReport {
    pub staged: Vec<Icon>,
    /// Icons that could not be copied, with the reason
    pub failed: Vec<(Icon, String)>,
}

impl StagingReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Copy every icon from `source_dir` into `<output_dir>/images/baseline`.
///
/// Failures never abort staging: each one is logged as a warning and
/// recorded in the returned report, since a report with broken images is
/// still a usable report.
pub fn stage_icons(source_dir: &Path, output_dir: &Path) -> StagingReport {
    let mut report = StagingReport::default();
    let target_dir = output_dir.join(ICON_DIR);

    if let Err(e) = fs::create_dir_all(&target_dir) {
        tracing::warn!(
            "Impossible to create {}: {}, the site won't be properly rendered",
            target_dir.display(),
            e
        );
        report.failed = Icon::ALL.iter().map(|icon| (*icon, e.to_string())).collect();
        return report;
    }

    for icon in Icon::ALL {
        let source = source_dir.join(icon.file_name());
        let target = target_dir.join(icon.file_name());

        match fs::copy(&source, &target) {
            Ok(_) => report.staged.push(icon),
            Err(e) => {
                tracing::warn!(
                    "Impossible to copy {} image, maybe the site won't be properly rendered: {}",
                    icon.file_name(),
                    e
                );
                report.failed.push((icon, e.to_string()));
            }
        }
    }

    tracing::debug!(
        staged = report.staged.len(),
        failed = report.failed.len(),
        "Icon staging finished"
    );
    report
}
