//! Unified configuration for the ICD catalog.
//!
//! Configuration controls how filter expressions are compiled and how the
//! reconciler derives artifact identifiers. Every field has a default, so a
//! YAML document only needs to name the values it overrides:
//!
//! ```yaml
//! matcher:
//!   max_range_expansion: 500
//! catalog:
//!   artifact_id_prefix: ISA
//! ```

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Filter expression compilation settings.
///
/// # Examples
///
/// ```rust
/// use icd_catalog::MatcherConfig;
///
/// let config = MatcherConfig::default();
/// assert!(config.case_insensitive);
/// assert_eq!(config.max_range_expansion, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Compare candidates and terms without regard to case.
    ///
    /// Equipment names coming out of SCD files are inconsistently cased, so
    /// this stays on outside of diagnostics.
    ///
    /// **Default**: true
    pub case_insensitive: bool,

    /// Largest number of literals a single range term may expand into.
    ///
    /// A range spanning more integers than this is kept as one literal term
    /// instead, the same way a malformed range is.
    ///
    /// **Default**: 10000
    pub max_range_expansion: usize,

    /// Number of compiled expressions kept by an [`ExpressionCache`](crate::matcher::ExpressionCache).
    ///
    /// `0` disables caching: every lookup compiles a fresh expression.
    ///
    /// **Default**: 1024
    pub cache_capacity: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            max_range_expansion: 10_000,
            cache_capacity: 1_024,
        }
    }
}

/// Identity derivation settings for the catalog reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Prefix of derived artifact ids (`ICD_BCU_EFACEC`).
    pub artifact_id_prefix: String,
    /// Stand-in for an identity component that sanitizes to nothing.
    pub unknown_placeholder: String,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            artifact_id_prefix: "ICD".to_string(),
            unknown_placeholder: "UNKNOWN".to_string(),
        }
    }
}

/// Complete catalog configuration.
///
/// # Example
/// ```rust
/// use icd_catalog::CatalogConfig;
///
/// let config = CatalogConfig::new()
///     .with_case_insensitive(true)
///     .with_max_range_expansion(256)
///     .with_artifact_id_prefix("ISA");
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.catalog.artifact_id_prefix, "ISA");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Filter expression settings
    pub matcher: MatcherConfig,
    /// Reconciler identity settings
    pub catalog: ReconcilerConfig,
}

impl CatalogConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for ISA data files, whose ids carry the `ISA` prefix.
    pub fn isa() -> Self {
        Self::new().with_artifact_id_prefix("ISA")
    }

    /// Configuration for troubleshooting filters: exact case, no caching.
    pub fn diagnostics() -> Self {
        Self {
            matcher: MatcherConfig {
                case_insensitive: false,
                cache_capacity: 0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_case_insensitive(mut self, enabled: bool) -> Self {
        self.matcher.case_insensitive = enabled;
        self
    }

    pub fn with_max_range_expansion(mut self, limit: usize) -> Self {
        self.matcher.max_range_expansion = limit;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.matcher.cache_capacity = capacity;
        self
    }

    pub fn with_artifact_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.catalog.artifact_id_prefix = prefix.into();
        self
    }

    pub fn with_unknown_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.catalog.unknown_placeholder = placeholder.into();
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.matcher.max_range_expansion == 0 {
            return Err(CatalogError::InvalidConfig(
                "max_range_expansion must be at least 1".to_string(),
            ));
        }
        if self.catalog.artifact_id_prefix.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "artifact_id_prefix must not be empty".to_string(),
            ));
        }
        if self.catalog.unknown_placeholder.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "unknown_placeholder must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading catalog configuration");
        Self::from_yaml_str(&contents)
    }
}
