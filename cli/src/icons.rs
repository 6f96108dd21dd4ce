use crate::error::{CliError, Result};
use crate::render::{self, Overrides};
use crate::ui;
use baseline_report::{stage_icons, Icon};
use std::path::{Path, PathBuf};

pub fn execute(
    config_path: &Path,
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    list: bool,
) -> Result<()> {
    if list {
        for icon in Icon::ALL {
            println!("{:<12} {}", format!("{icon:?}"), icon.path());
        }
        return Ok(());
    }

    let config = render::load_config(config_path, Overrides::default())?;
    let source = source.or(config.icons_directory).ok_or_else(|| {
        CliError::Other(
            "No icons directory given; pass --source or set icons_directory in the configuration"
                .to_string(),
        )
    })?;
    let output = output.or(config.output_directory).ok_or_else(|| {
        CliError::Other(
            "No output directory given; pass --output or set output_directory in the configuration"
                .to_string(),
        )
    })?;

    ui::status_message(&format!(
        "Staging icons from {} into {}",
        source.display(),
        output.display()
    ));
    let report = stage_icons(&source, &output);

    for (icon, reason) in &report.failed {
        ui::warning_message(&format!("{}: {}", icon.file_name(), reason));
    }
    if !report.is_complete() {
        return Err(CliError::Other(format!(
            "{} of {} icons could not be staged",
            report.failed.len(),
            Icon::ALL.len()
        )));
    }

    ui::success_message(&format!("Staged {} icons", report.staged.len()));
    Ok(())
}
