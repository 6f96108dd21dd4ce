use crate::error::Result;
use crate::ui;
use baseline_report::config::ensure_config_file_exists;
use std::path::Path;

pub fn execute(config_path: &Path, force: bool) -> Result<()> {
    if ensure_config_file_exists(config_path, force)? {
        ui::success_message(&format!(
            "Created configuration at {}",
            config_path.display()
        ));
    } else {
        ui::warning_message(&format!(
            "{} already exists, use --force to overwrite it",
            config_path.display()
        ));
    }
    Ok(())
}
