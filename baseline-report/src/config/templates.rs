use crate::error::{ReportError, Result};
use std::fs;
use std::path::Path;

/// Generate a default baseline-report.toml with every setting documented
pub fn generate_default_config_template() -> String {
    r#"# Baseline Report Configuration

# Directory the report and its images are written to
output_directory = "target/site"

# Set to true to skip report generation
skip = false

# Locale of the report captions (e.g. "en", "de", "de_CH")
locale = "en"

# Directory with baseline-report_<locale>.toml caption overrides (optional)
# labels_directory = "src/site/labels"

# Directory with the icon images copied next to the report (optional)
# icons_directory = "src/site/images/baseline"

# Output format: "html" or "markdown"
format = "html"

# "lenient" renders any event stream as-is,
# "strict" rejects diff streams that skip nesting levels
depth_policy = "lenient"

# Also list packages and members whose delta is unchanged
include_unchanged = false

# Overrides the localized report title (optional)
# title = "API Baseline"
"#
    .to_string()
}

/// Write the default configuration to `path` unless a file is already there.
///
/// Returns whether a file was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(path: P, force: bool) -> Result<bool> {
    let path = path.as_ref();

    if path.exists() && !force {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, generate_default_config_template()).map_err(|e| {
        ReportError::invalid_config(format!(
            "Failed to write configuration template {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(true)
}
