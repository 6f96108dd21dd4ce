use crate::config::types::ReportConfig;
use crate::config::validator::ConfigValidator;
use crate::error::{ReportError, Result};
use std::path::Path;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ReportConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<ReportConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a baseline-report.toml file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| ReportError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let config: ReportConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load and validate, with the file name in every error
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ReportError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(ReportError::Io)?;

        let config: ReportConfig = toml::from_str(&content).map_err(|e| {
            ReportError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        ConfigValidator::new().validate_with_context(&config, path_ref)?;
        tracing::debug!("Loaded configuration from {}", path_ref.display());
        Ok(config)
    }
}

impl DefaultConfigLoader {
    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
        if path.as_ref().exists() {
            Self::load_with_validation(path)
        } else {
            tracing::debug!(
                "No configuration at {}, using defaults",
                path.as_ref().display()
            );
            Ok(ReportConfig::default())
        }
    }
}
