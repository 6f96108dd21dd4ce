use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use baseline_report::{
    Baseline, BaselineReport, DefaultConfigLoader, DepthPolicy, OutputFormat, ReportConfig,
};
use std::path::{Path, PathBuf};

/// Command-line values layered over the configuration file
#[derive(Debug, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub strict: bool,
    pub include_unchanged: bool,
}

impl Overrides {
    pub fn apply(self, mut config: ReportConfig) -> ReportConfig {
        if let Some(output) = self.output {
            config.output_directory = Some(output);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.strict {
            config.depth_policy = DepthPolicy::Strict;
        }
        if self.include_unchanged {
            config.include_unchanged = true;
        }
        config
    }
}

/// Load the configuration, falling back to defaults when the file is absent
pub fn load_config(config_path: &Path, overrides: Overrides) -> Result<ReportConfig> {
    let config = DefaultConfigLoader::load_or_default(config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            config_path.display()
        )
    })?;
    Ok(overrides.apply(config))
}

pub fn read_baseline(input: &Path) -> Result<Baseline> {
    ui::status_message(&format!("Reading baseline from {}", input.display()));
    let baseline = Baseline::from_path(input)?;
    tracing::info!(
        bundle = %baseline.bundle_name,
        packages = baseline.packages.len(),
        "Loaded baseline comparison"
    );
    Ok(baseline)
}

pub fn execute(config_path: &Path, input: PathBuf, overrides: Overrides) -> Result<()> {
    ui::section_header("Baseline Report");

    let config = load_config(config_path, overrides)?;
    if config.output_directory.is_none() {
        return Err(CliError::Other(
            "No output directory given; pass --output or set output_directory in the configuration"
                .to_string(),
        ));
    }

    let baseline = read_baseline(&input)?;
    let report = BaselineReport::new(config)?;
    let outcome = report.write_to_dir(&baseline)?;

    if let Some(staging) = &outcome.staging {
        if !staging.is_complete() {
            ui::warning_message(&format!(
                "{} icon(s) could not be staged, images may be missing from the report",
                staging.failed.len()
            ));
        }
    }

    match (outcome.path, outcome.error) {
        (Some(path), _) => {
            ui::success_message(&format!("Report written to {}", path.display()));
            Ok(())
        }
        (None, Some(err)) => Err(CliError::Report(err).with_context("No report was written")),
        (None, None) => {
            ui::info_message("Report generation skipped by configuration");
            Ok(())
        }
    }
}
