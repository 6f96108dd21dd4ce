//! Localized report captions
//!
//! Captions are looked up by key. English defaults are built in; a locale
//! can override any of them with a `baseline-report_<locale>.toml` file.

use crate::error::{ReportError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Label keys used by the report
pub mod keys {
    pub const NAME: &str = "report.baseline.name";
    pub const DESCRIPTION: &str = "report.baseline.description";
    pub const TITLE: &str = "report.baseline.title";
    pub const BND_LINK: &str = "report.baseline.bndlink";
    pub const BUNDLE: &str = "report.baseline.bundle";
    pub const VERSION_CURRENT: &str = "report.baseline.version.current";
    pub const VERSION_COMPARISON: &str = "report.baseline.version.comparison";
    pub const GENERATION_DATE: &str = "report.baseline.generationdate";
    pub const VERSION_NEWER: &str = "report.baseline.version.newer";
    pub const VERSION_OLDER: &str = "report.baseline.version.older";
    pub const VERSION_SUGGESTED: &str = "report.baseline.version.suggested";
}

const ENGLISH: [(&str, &str); 11] = [
    (keys::NAME, "Baseline"),
    (keys::DESCRIPTION, "Bundle API baseline report"),
    (keys::TITLE, "Baseline Report"),
    (keys::BND_LINK, "Baseline computed with"),
    (keys::BUNDLE, "Bundle:"),
    (keys::VERSION_CURRENT, "Current version:"),
    (keys::VERSION_COMPARISON, "Comparison version:"),
    (keys::GENERATION_DATE, "Generated on:"),
    (keys::VERSION_NEWER, "newer version"),
    (keys::VERSION_OLDER, "older version"),
    (keys::VERSION_SUGGESTED, "suggested version"),
];

/// Key to caption lookup
pub trait Labels {
    /// Caption for `key`; unknown keys resolve to the key itself
    fn label(&self, key: &str) -> String;
}

/// In-memory label table for one locale
#[derive(Debug, Clone)]
pub struct LabelTable {
    locale: String,
    entries: HashMap<String, String>,
}

impl LabelTable {
    /// Built-in English captions
    pub fn english() -> Self {
        Self {
            locale: "en".to_string(),
            entries: ENGLISH
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Load captions for `locale`, layering overrides from `directory`.
    ///
    /// For `de_CH` the lookup order is `baseline-report_de_CH.toml`, then
    /// `baseline-report_de.toml`, then the built-in defaults. Missing files
    /// are skipped; unreadable or malformed ones are errors.
    pub fn load(directory: Option<&Path>, locale: &str) -> Result<Self> {
        let mut table = Self::english();
        table.locale = locale.to_string();

        let Some(directory) = directory else {
            return Ok(table);
        };

        for candidate in locale_chain(locale).into_iter().rev() {
            let path = directory.join(format!("baseline-report_{candidate}.toml"));
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            let overrides = parse_label_toml(&content).map_err(|message| {
                ReportError::InvalidLabels {
                    path: path.clone(),
                    message,
                }
            })?;
            tracing::debug!(
                "Loaded {} labels from {}",
                overrides.len(),
                path.display()
            );
            table.entries.extend(overrides);
        }

        Ok(table)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.entries.insert(key.into(), value.into());
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::english()
    }
}

impl Labels for LabelTable {
    fn label(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Locales to try, most specific first: `de_CH_x` yields `de_CH_x`, `de_CH`, `de`
fn locale_chain(locale: &str) -> Vec<String> {
    let parts: Vec<&str> = locale.split(['_', '-']).filter(|p| !p.is_empty()).collect();
    (1..=parts.len())
        .rev()
        .map(|n| parts[..n].join("_"))
        .collect()
}

/// Parse a label file. Dotted keys may be written flat and quoted
/// (`"report.baseline.title" = "..."`) or as nested tables.
fn parse_label_toml(content: &str) -> std::result::Result<HashMap<String, String>, String> {
    let value: toml::Value = toml::from_str(content).map_err(|e| e.to_string())?;
    let mut entries = HashMap::new();
    flatten_into(&value, String::new(), &mut entries)?;
    Ok(entries)
}

fn flatten_into(
    value: &toml::Value,
    prefix: String,
    entries: &mut HashMap<String, String>,
) -> std::result::Result<(), String> {
    match value {
        toml::Value::Table(table) => {
            for (key, nested) in table {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(nested, full_key, entries)?;
            }
            Ok(())
        }
        toml::Value::String(text) => {
            entries.insert(prefix, text.clone());
            Ok(())
        }
        other => Err(format!(
            "label '{}' must be a string, found {}",
            prefix,
            other.type_str()
        )),
    }
}
