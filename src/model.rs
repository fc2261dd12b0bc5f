//! Catalog data model.
//!
//! These are the record shapes exchanged with the import/persistence service
//! and the pattern configuration store. They deserialize from the JSON those
//! collaborators produce, including the older `icd_id`/`ied_type` field names.

use crate::config::ReconcilerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Family of imported file an [`ArtifactRecord`] describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// IEC 61850 IED Capability Description
    #[default]
    Icd,
    /// Miscellaneous ISA data file
    Isa,
}

/// Structural counters extracted by the file parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralCounters {
    pub ld_count: Option<u32>,
    pub ln_count: Option<u32>,
}

impl StructuralCounters {
    pub fn new(ld_count: u32, ln_count: u32) -> Self {
        Self {
            ld_count: Some(ld_count),
            ln_count: Some(ln_count),
        }
    }
}

/// Grouping identity of an artifact: equipment type and manufacturer.
///
/// Every grouping and id derivation in the crate goes through this type, so
/// two records land in the same card exactly when their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey {
    pub equipment_type: String,
    pub manufacturer: String,
}

impl IdentityKey {
    pub fn new(equipment_type: impl Into<String>, manufacturer: impl Into<String>) -> Self {
        Self {
            equipment_type: equipment_type.into(),
            manufacturer: manufacturer.into(),
        }
    }

    /// Derive the stable artifact id for this identity.
    ///
    /// ```rust
    /// use icd_catalog::{IdentityKey, ReconcilerConfig};
    ///
    /// let key = IdentityKey::new("BCU", "Efacec");
    /// assert_eq!(key.artifact_id(&ReconcilerConfig::default()), "ICD_BCU_EFACEC");
    ///
    /// let key = IdentityKey::new("SCU 2/TG", "ABB-Ltd.");
    /// assert_eq!(key.artifact_id(&ReconcilerConfig::default()), "ICD_SCU_2_TG_ABB_LTD");
    /// ```
    pub fn artifact_id(&self, config: &ReconcilerConfig) -> String {
        format!(
            "{}_{}_{}",
            config.artifact_id_prefix,
            sanitize_component(&self.equipment_type, &config.unknown_placeholder),
            sanitize_component(&self.manufacturer, &config.unknown_placeholder)
        )
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.equipment_type, self.manufacturer)
    }
}

/// Upper-case `value` and collapse every run of characters outside `[A-Z0-9]` into `_`.
fn sanitize_component(value: &str, placeholder: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.trim().to_uppercase().chars() {
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }

    if out.is_empty() {
        placeholder.to_string()
    } else {
        out
    }
}

/// One imported file version for an equipment type and manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    #[serde(alias = "icd_id")]
    pub artifact_id: String,
    #[serde(default)]
    pub kind: ArtifactKind,
    #[serde(alias = "ied_type")]
    pub equipment_type: String,
    pub manufacturer: String,
    /// Free-form version tag, not ordered
    pub version: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub imported_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ld_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ln_count: Option<u32>,
}

impl ArtifactRecord {
    /// Create a record whose id is derived from its identity with the default prefix.
    pub fn new(
        equipment_type: impl Into<String>,
        manufacturer: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::with_config(
            equipment_type,
            manufacturer,
            version,
            &ReconcilerConfig::default(),
        )
    }

    /// Create a record whose id is derived with the given reconciler settings.
    pub fn with_config(
        equipment_type: impl Into<String>,
        manufacturer: impl Into<String>,
        version: impl Into<String>,
        config: &ReconcilerConfig,
    ) -> Self {
        let key = IdentityKey::new(equipment_type, manufacturer);
        Self {
            artifact_id: key.artifact_id(config),
            kind: ArtifactKind::default(),
            equipment_type: key.equipment_type,
            manufacturer: key.manufacturer,
            version: version.into(),
            filename: String::new(),
            imported_at: String::new(),
            ld_count: None,
            ln_count: None,
        }
    }

    pub fn with_artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = artifact_id.into();
        self
    }

    pub fn with_kind(mut self, kind: ArtifactKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_imported_at(mut self, imported_at: impl Into<String>) -> Self {
        self.imported_at = imported_at.into();
        self
    }

    pub fn with_counters(mut self, counters: StructuralCounters) -> Self {
        self.reanalyze(counters);
        self
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(self.equipment_type.clone(), self.manufacturer.clone())
    }

    pub(crate) fn has_identity(&self, equipment_type: &str, manufacturer: &str) -> bool {
        self.equipment_type == equipment_type && self.manufacturer == manufacturer
    }

    pub fn counters(&self) -> StructuralCounters {
        StructuralCounters {
            ld_count: self.ld_count,
            ln_count: self.ln_count,
        }
    }

    /// Replace the structural counters after the source file was parsed again.
    ///
    /// This is the only in-place change a record ever receives.
    pub fn reanalyze(&mut self, counters: StructuralCounters) {
        self.ld_count = counters.ld_count;
        self.ln_count = counters.ln_count;
    }
}

/// One equipment-type identity, or a variant of one.
///
/// `icd_refs` and the default referents are private: the functions in
/// [`crate::catalog`] are the only code allowed to change them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentPattern {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    /// Filter expression matched against IED names
    #[serde(default)]
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Extra excluded sub-patterns carried over from the legacy list format
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<String>,
    #[serde(default)]
    icd_refs: Vec<String>,
    /// manufacturer -> artifact id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    default_icds: BTreeMap<String, String>,
}

impl EquipmentPattern {
    pub fn new(id: impl Into<String>, pattern: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            pattern: pattern.into(),
            description: None,
            parent: None,
            exclusions: Vec::new(),
            icd_refs: Vec::new(),
            default_icds: BTreeMap::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Initial linked artifacts, as loaded from the configuration store.
    pub fn with_icd_refs<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.icd_refs.clear();
        for artifact_id in refs {
            self.insert_ref(artifact_id.into());
        }
        self
    }

    pub fn icd_refs(&self) -> &[String] {
        &self.icd_refs
    }

    pub fn references(&self, artifact_id: &str) -> bool {
        self.icd_refs.iter().any(|r| r == artifact_id)
    }

    /// Parent id, ignoring an empty parent field.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_deref().filter(|p| !p.is_empty())
    }

    pub fn is_variant(&self) -> bool {
        self.parent_id().is_some()
    }

    pub fn is_variant_of(&self, parent_id: &str) -> bool {
        self.parent_id() == Some(parent_id)
    }

    /// Pattern string with the legacy exclusions folded in as `!` terms.
    pub fn effective_expression(&self) -> String {
        if self.exclusions.is_empty() {
            return self.pattern.clone();
        }

        let mut parts = Vec::with_capacity(self.exclusions.len() + 1);
        if !self.pattern.trim().is_empty() {
            parts.push(self.pattern.clone());
        }
        for exclusion in &self.exclusions {
            let exclusion = exclusion.trim().trim_start_matches('!');
            if !exclusion.is_empty() {
                parts.push(format!("!{exclusion}"));
            }
        }
        parts.join(", ")
    }

    pub fn default_artifacts(&self) -> &BTreeMap<String, String> {
        &self.default_icds
    }

    pub(crate) fn insert_ref(&mut self, artifact_id: String) -> bool {
        if self.references(&artifact_id) {
            return false;
        }
        self.icd_refs.push(artifact_id);
        true
    }

    pub(crate) fn remove_ref(&mut self, artifact_id: &str) -> bool {
        let before = self.icd_refs.len();
        self.icd_refs.retain(|r| r != artifact_id);
        self.icd_refs.len() != before
    }

    pub(crate) fn set_default(&mut self, manufacturer: String, artifact_id: String) -> Option<String> {
        self.default_icds.insert(manufacturer, artifact_id)
    }

    pub(crate) fn clear_default(&mut self, manufacturer: &str) -> bool {
        self.default_icds.remove(manufacturer).is_some()
    }
}
