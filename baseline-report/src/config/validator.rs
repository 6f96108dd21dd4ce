use crate::config::types::ReportConfig;
use crate::error::{ReportError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static LOCALE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,3}([_-][A-Za-z0-9]{2,8})*$").expect("Failed to compile locale regex")
});

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &ReportConfig) -> Result<()> {
        self.validate_with_context(config, "configuration")
    }

    /// Validation with the config location included in error messages
    pub fn validate_with_context<P: AsRef<Path>>(
        &self,
        config: &ReportConfig,
        config_path: P,
    ) -> Result<()> {
        let config_path_str = config_path.as_ref().to_string_lossy();

        if !LOCALE_PATTERN.is_match(&config.locale) {
            return Err(ReportError::invalid_config(format!(
                "Invalid locale '{}' in {}. Use a language code such as 'en' or 'de_CH'.",
                config.locale, config_path_str
            )));
        }

        if let Some(title) = &config.title {
            if title.trim().is_empty() {
                return Err(ReportError::invalid_config(format!(
                    "Empty report title in {}. Remove the 'title' key to use the localized title.",
                    config_path_str
                )));
            }
        }

        if let Some(directory) = &config.labels_directory {
            if !directory.is_dir() {
                return Err(ReportError::invalid_config(format!(
                    "Labels directory {} referenced in {} does not exist",
                    directory.display(),
                    config_path_str
                )));
            }
        }

        if let Some(directory) = &config.output_directory {
            if directory.is_file() {
                return Err(ReportError::invalid_config(format!(
                    "Output directory {} referenced in {} is a file",
                    directory.display(),
                    config_path_str
                )));
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
