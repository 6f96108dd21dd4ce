use crate::renderer::DepthPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "baseline-report.toml";

/// Document format written by the report generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
        }
    }
}

/// Report generation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the report and its images are written to
    pub output_directory: Option<PathBuf>,
    /// Skip report generation entirely
    pub skip: bool,
    /// Locale of the captions, e.g. `en` or `de_CH`
    pub locale: String,
    /// Directory holding `baseline-report_<locale>.toml` label overrides
    pub labels_directory: Option<PathBuf>,
    /// Directory holding the icon images to stage next to the report
    pub icons_directory: Option<PathBuf>,
    pub format: OutputFormat,
    /// How the renderer treats streams that break depth-first order
    pub depth_policy: DepthPolicy,
    /// Report packages and members whose delta is unchanged
    pub include_unchanged: bool,
    /// Overrides the localized report title
    pub title: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_directory: None,
            skip: false,
            locale: "en".to_string(),
            labels_directory: None,
            icons_directory: None,
            format: OutputFormat::Html,
            depth_policy: DepthPolicy::Lenient,
            include_unchanged: false,
            title: None,
        }
    }
}

impl ReportConfig {
    pub fn with_output_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.output_directory = Some(directory.into());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_depth_policy(mut self, policy: DepthPolicy) -> Self {
        self.depth_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ReportConfig = toml::from_str("format = \"markdown\"\nskip = true\n").unwrap();

        assert_eq!(config.format, OutputFormat::Markdown);
        assert!(config.skip);
        assert_eq!(config.locale, "en");
        assert_eq!(config.depth_policy, DepthPolicy::Lenient);
        assert!(config.output_directory.is_none());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Html.extension(), "html");
        assert_eq!(OutputFormat::Markdown.extension(), "md");
    }
}
