//! Baseline report generation
//!
//! Ties configuration, captions, icon staging and the outline renderer
//! together. Rendering failures never escape [`BaselineReport::generate`]:
//! they are logged and handed back in the outcome so the surrounding build
//! keeps going without a report.

use crate::baseline::{Baseline, TraversalOptions};
use crate::config::{OutputFormat, ReportConfig};
use crate::error::{ReportError, Result};
use crate::events::drive;
use crate::icons::{stage_icons, StagingReport};
use crate::labels::{keys, LabelTable, Labels};
use crate::renderer::NestedOutlineRenderer;
use crate::sinks::{DocumentSink, HtmlSink, MarkdownSink};
use chrono::Local;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// File name of the report, without extension
pub const OUTPUT_NAME: &str = "baseline-report";

/// Category the report is listed under in a project site
pub const CATEGORY_PROJECT_REPORTS: &str = "Project Reports";

/// Sink and error state after a generation attempt
pub struct GenerationOutcome<S> {
    pub sink: S,
    pub error: Option<ReportError>,
}

impl<S> GenerationOutcome<S> {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of writing a report to the output directory
#[derive(Debug, Default)]
pub struct WriteOutcome {
    /// Path of the written report; `None` when skipped or failed
    pub path: Option<PathBuf>,
    pub staging: Option<StagingReport>,
    pub error: Option<ReportError>,
}

pub struct BaselineReport {
    config: ReportConfig,
    labels: LabelTable,
}

impl BaselineReport {
    /// Create a report, loading captions for the configured locale
    pub fn new(config: ReportConfig) -> Result<Self> {
        let labels = LabelTable::load(config.labels_directory.as_deref(), &config.locale)?;
        Ok(Self::with_labels(config, labels))
    }

    pub fn with_labels(config: ReportConfig, labels: LabelTable) -> Self {
        Self { config, labels }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn output_name(&self) -> &'static str {
        OUTPUT_NAME
    }

    pub fn category_name(&self) -> &'static str {
        CATEGORY_PROJECT_REPORTS
    }

    pub fn name(&self) -> String {
        self.labels.label(keys::NAME)
    }

    pub fn description(&self) -> String {
        self.labels.label(keys::DESCRIPTION)
    }

    pub fn is_external_report(&self) -> bool {
        false
    }

    pub fn output_directory(&self) -> Option<&Path> {
        self.config.output_directory.as_deref()
    }

    pub fn set_output_directory<P: Into<PathBuf>>(&mut self, directory: P) {
        self.config.output_directory = Some(directory.into());
    }

    pub fn can_generate_report(&self) -> bool {
        !self.config.skip && self.config.output_directory.is_some()
    }

    /// Stage the icon images next to the report.
    ///
    /// Returns `None` when there is nothing to stage from or to.
    pub fn init(&self) -> Option<StagingReport> {
        let output_directory = self.config.output_directory.as_deref()?;
        match self.config.icons_directory.as_deref() {
            Some(icons_directory) => Some(stage_icons(icons_directory, output_directory)),
            None => {
                tracing::warn!(
                    "No icons directory configured, maybe the site won't be properly rendered"
                );
                None
            }
        }
    }

    pub fn traversal_options(&self) -> TraversalOptions {
        TraversalOptions {
            title: self
                .config
                .title
                .clone()
                .unwrap_or_else(|| self.labels.label(keys::TITLE)),
            generation_date: Local::now().format("%Y-%m-%d %H:%M").to_string(),
            include_unchanged: self.config.include_unchanged,
        }
    }

    /// Render `baseline` into `sink`.
    ///
    /// The sink is always closed. An error is logged as a warning and
    /// returned in the outcome, never propagated.
    pub fn generate<S: DocumentSink>(&self, baseline: &Baseline, sink: S) -> GenerationOutcome<S> {
        let events = baseline.events(&self.traversal_options());
        tracing::debug!(
            bundle = %baseline.bundle_name,
            events = events.len(),
            "Rendering baseline report"
        );

        let mut renderer =
            NestedOutlineRenderer::new(sink, &self.labels).with_policy(self.config.depth_policy);
        let error = match drive(&mut renderer, &events) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(
                    "An error occurred while producing the report page: {}",
                    err
                );
                Some(err)
            }
        };

        GenerationOutcome {
            sink: renderer.into_sink(),
            error,
        }
    }

    /// Stage icons and write `<output>/baseline-report.<ext>`.
    ///
    /// Only I/O failures while preparing the output are returned as errors.
    /// A failed rendering leaves no report file behind.
    pub fn write_to_dir(&self, baseline: &Baseline) -> Result<WriteOutcome> {
        let Some(output_directory) = self.config.output_directory.as_deref() else {
            tracing::info!("No output directory configured, skipping baseline report");
            return Ok(WriteOutcome::default());
        };
        if self.config.skip {
            tracing::info!("Skipping baseline report");
            return Ok(WriteOutcome::default());
        }

        fs::create_dir_all(output_directory)?;
        let staging = self.init();

        let path = output_directory.join(format!(
            "{}.{}",
            OUTPUT_NAME,
            self.config.format.extension()
        ));
        let writer = BufWriter::new(File::create(&path)?);

        let error = match self.config.format {
            OutputFormat::Html => self.generate(baseline, HtmlSink::new(writer)).error,
            OutputFormat::Markdown => self.generate(baseline, MarkdownSink::new(writer)).error,
        };

        if error.is_some() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("Failed to remove partial report {}: {}", path.display(), e);
            }
            return Ok(WriteOutcome {
                path: None,
                staging,
                error,
            });
        }

        tracing::info!("Baseline report written to {}", path.display());
        Ok(WriteOutcome {
            path: Some(path),
            staging,
            error: None,
        })
    }
}
