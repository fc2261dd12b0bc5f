//! Pattern configuration documents.
//!
//! The current document is `{"version": "2.0", "ied_patterns": [...]}`. Older
//! stores hold a bare array of expression strings such as
//! `"*BCU*, !*CBO*BCU*"`; those are migrated on load.

use crate::error::Result;
use crate::model::EquipmentPattern;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

pub const DOCUMENT_VERSION: &str = "2.0";

const UNKNOWN_PATTERN_ID: &str = "UNKNOWN";

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

/// The pattern collection as persisted by the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub ied_patterns: Vec<EquipmentPattern>,
}

impl Default for PatternDocument {
    fn default() -> Self {
        Self {
            version: default_version(),
            ied_patterns: Vec::new(),
        }
    }
}

impl PatternDocument {
    pub fn new(ied_patterns: Vec<EquipmentPattern>) -> Self {
        Self {
            version: default_version(),
            ied_patterns,
        }
    }

    /// Parse a document, migrating the legacy array format.
    ///
    /// ```rust
    /// use icd_catalog::catalog::PatternDocument;
    ///
    /// let doc = PatternDocument::from_json_str(r#"["*BCU*, !*CBO*BCU*", "*PIU-2*"]"#).unwrap();
    /// assert_eq!(doc.version, "2.0");
    /// assert_eq!(doc.ied_patterns[0].id, "BCU");
    /// assert_eq!(doc.ied_patterns[0].exclusions, ["*CBO*BCU*"]);
    /// assert_eq!(doc.ied_patterns[1].id, "PIU_2");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => Ok(Self::migrate_legacy(&items)),
            other => Ok(serde_json::from_value(other)?),
        }
    }

    /// Load a document from disk. A missing file is an empty document.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json_str(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no pattern document, starting empty");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_patterns(self) -> Vec<EquipmentPattern> {
        self.ied_patterns
    }

    fn migrate_legacy(items: &[Value]) -> Self {
        let ied_patterns: Vec<EquipmentPattern> = items
            .iter()
            .filter_map(Value::as_str)
            .map(migrate_entry)
            .collect();

        tracing::debug!(
            entries = items.len(),
            patterns = ied_patterns.len(),
            "migrated legacy pattern list"
        );
        Self::new(ied_patterns)
    }
}

fn migrate_entry(entry: &str) -> EquipmentPattern {
    let mut parts = entry.split(',').map(str::trim);
    let main = parts.next().unwrap_or_default();
    let exclusions: Vec<&str> = parts.filter_map(|p| p.strip_prefix('!')).collect();

    EquipmentPattern::new(legacy_id(main), main)
        .with_description("")
        .with_exclusions(exclusions)
}

/// Id for a legacy expression: wildcards and markers removed, `-` as `_`.
fn legacy_id(pattern: &str) -> String {
    let clean: String = pattern.chars().filter(|c| *c != '*' && *c != '!').collect();
    let clean = clean.trim().replace('-', "_");
    if clean.is_empty() {
        UNKNOWN_PATTERN_ID.to_string()
    } else {
        clean
    }
}
