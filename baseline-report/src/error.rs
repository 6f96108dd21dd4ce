use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for baseline report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error types for baseline report rendering
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Baseline parse error: {0}")]
    BaselineParse(#[from] serde_json::Error),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Baseline file not found: {path}")]
    BaselineNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid label table {path}: {message}")]
    InvalidLabels { path: PathBuf, message: String },

    #[error("Unknown diff kind: {kind}")]
    UnknownKind { kind: String },

    #[error("Depth jumped from {from} to {to}")]
    DepthJump { from: usize, to: usize },

    #[error("Unbalanced exit at depth {depth}: {message}")]
    UnbalancedExit { depth: usize, message: String },

    #[error("Out-of-order event '{event}': {message}")]
    OutOfOrder { event: &'static str, message: String },
}

impl ReportError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new out-of-order event error
    pub fn out_of_order<S: Into<String>>(event: &'static str, message: S) -> Self {
        Self::OutOfOrder {
            event,
            message: message.into(),
        }
    }

    /// Create a new unbalanced exit error
    pub fn unbalanced_exit<S: Into<String>>(depth: usize, message: S) -> Self {
        Self::UnbalancedExit {
            depth,
            message: message.into(),
        }
    }

    /// Whether this error comes from strict depth validation
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DepthJump { .. } | Self::UnbalancedExit { .. } | Self::OutOfOrder { .. }
        )
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File operation failed: {e}"),
            Self::ConfigParse(e) => format!("Failed to parse configuration: {e}"),
            Self::BaselineParse(e) => format!("Failed to parse baseline document: {e}"),
            Self::ConfigNotFound { path } => {
                format!("Configuration file not found: {}", path.display())
            }
            Self::BaselineNotFound { path } => {
                format!("Baseline file not found: {}", path.display())
            }
            Self::InvalidConfig { message } => format!("Invalid configuration: {message}"),
            Self::InvalidLabels { path, message } => {
                format!("Invalid label table {}: {message}", path.display())
            }
            Self::UnknownKind { kind } => format!("Unknown diff kind '{kind}'"),
            Self::DepthJump { from, to } => format!(
                "Diff depth jumped from {from} to {to}; nesting may only grow one level at a time"
            ),
            Self::UnbalancedExit { depth, message } => {
                format!("Unbalanced diff exit at depth {depth}: {message}")
            }
            Self::OutOfOrder { event, message } => {
                format!("Report event '{event}' arrived out of order: {message}")
            }
        }
    }
}
