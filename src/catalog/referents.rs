//! Default ("referent") artifacts per pattern and manufacturer.
//!
//! External tools ask for the artifact to use when a pattern matches a device
//! from a given manufacturer. Each pattern holds at most one referent per
//! manufacturer.

use crate::catalog::links::find_pattern;
use crate::error::{CatalogError, Result};
use crate::model::{ArtifactRecord, EquipmentPattern};

/// Make `artifact_id` the referent of `pattern_id` for `manufacturer`.
///
/// Returns the artifact id it replaced, if any.
pub fn set_default_artifact(
    patterns: &mut [EquipmentPattern],
    records: &[ArtifactRecord],
    pattern_id: &str,
    manufacturer: &str,
    artifact_id: &str,
) -> Result<Option<String>> {
    if !records.iter().any(|r| r.artifact_id == artifact_id) {
        return Err(CatalogError::UnknownArtifact(artifact_id.to_string()));
    }

    let pattern = patterns
        .iter_mut()
        .find(|p| p.id == pattern_id)
        .ok_or_else(|| CatalogError::UnknownPattern(pattern_id.to_string()))?;

    let previous = pattern.set_default(manufacturer.to_string(), artifact_id.to_string());
    tracing::debug!(pattern_id, manufacturer, artifact_id, ?previous, "set default artifact");
    Ok(previous)
}

/// Resolve the referent of `pattern` for `manufacturer`.
///
/// When several versions share the referent's artifact id, the last imported
/// one is returned. A referent pointing at a deleted artifact resolves to `None`.
pub fn default_artifact<'a>(
    pattern: &EquipmentPattern,
    manufacturer: &str,
    records: &'a [ArtifactRecord],
) -> Option<&'a ArtifactRecord> {
    let artifact_id = pattern.default_artifacts().get(manufacturer)?;
    let resolved = records.iter().rev().find(|r| &r.artifact_id == artifact_id);
    if resolved.is_none() {
        tracing::debug!(
            pattern_id = %pattern.id,
            manufacturer,
            artifact_id = %artifact_id,
            "default artifact no longer in catalog"
        );
    }
    resolved
}

/// [`default_artifact`] looked up by pattern id.
pub fn default_artifact_for<'a>(
    patterns: &[EquipmentPattern],
    pattern_id: &str,
    manufacturer: &str,
    records: &'a [ArtifactRecord],
) -> Option<&'a ArtifactRecord> {
    default_artifact(find_pattern(patterns, pattern_id)?, manufacturer, records)
}

/// Drop the referent of `pattern_id` for `manufacturer`.
///
/// Returns `Ok(false)` when none was set.
pub fn clear_default_artifact(
    patterns: &mut [EquipmentPattern],
    pattern_id: &str,
    manufacturer: &str,
) -> Result<bool> {
    let pattern = patterns
        .iter_mut()
        .find(|p| p.id == pattern_id)
        .ok_or_else(|| CatalogError::UnknownPattern(pattern_id.to_string()))?;
    Ok(pattern.clear_default(manufacturer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ArtifactRecord> {
        vec![
            ArtifactRecord::new("BCU", "Efacec", "V1"),
            ArtifactRecord::new("BCU", "Efacec", "V2"),
            ArtifactRecord::new("BCU", "ABB", "A1"),
        ]
    }

    fn patterns() -> Vec<EquipmentPattern> {
        vec![EquipmentPattern::new("BCU", "*BCU*")]
    }

    #[test]
    fn test_set_and_resolve_default() {
        let records = records();
        let mut patterns = patterns();

        let previous =
            set_default_artifact(&mut patterns, &records, "BCU", "Efacec", "ICD_BCU_EFACEC")
                .unwrap();
        assert_eq!(previous, None);

        let resolved = default_artifact(&patterns[0], "Efacec", &records).unwrap();
        assert_eq!(resolved.version, "V2");
        assert!(default_artifact(&patterns[0], "ABB", &records).is_none());
    }

    #[test]
    fn test_set_replaces_previous_referent() {
        let records = records();
        let mut patterns = patterns();
        set_default_artifact(&mut patterns, &records, "BCU", "Efacec", "ICD_BCU_EFACEC").unwrap();

        let previous =
            set_default_artifact(&mut patterns, &records, "BCU", "Efacec", "ICD_BCU_ABB").unwrap();
        assert_eq!(previous.as_deref(), Some("ICD_BCU_EFACEC"));
        assert_eq!(patterns[0].default_artifacts().len(), 1);
    }

    #[test]
    fn test_set_rejects_unknown_targets() {
        let records = records();
        let mut patterns = patterns();

        assert_eq!(
            set_default_artifact(&mut patterns, &records, "NOPE", "Efacec", "ICD_BCU_EFACEC"),
            Err(CatalogError::UnknownPattern("NOPE".to_string()))
        );
        assert_eq!(
            set_default_artifact(&mut patterns, &records, "BCU", "Efacec", "ICD_GONE"),
            Err(CatalogError::UnknownArtifact("ICD_GONE".to_string()))
        );
    }

    #[test]
    fn test_dangling_referent_resolves_to_none() {
        let mut records = records();
        let mut patterns = patterns();
        set_default_artifact(&mut patterns, &records, "BCU", "ABB", "ICD_BCU_ABB").unwrap();

        records.retain(|r| r.manufacturer != "ABB");
        assert!(default_artifact_for(&patterns, "BCU", "ABB", &records).is_none());
    }

    #[test]
    fn test_clear_default() {
        let records = records();
        let mut patterns = patterns();
        set_default_artifact(&mut patterns, &records, "BCU", "ABB", "ICD_BCU_ABB").unwrap();

        assert_eq!(clear_default_artifact(&mut patterns, "BCU", "ABB"), Ok(true));
        assert_eq!(clear_default_artifact(&mut patterns, "BCU", "ABB"), Ok(false));
        assert!(clear_default_artifact(&mut patterns, "NOPE", "ABB").is_err());
    }
}
