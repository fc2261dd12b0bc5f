//! Pattern ↔ artifact links, variant aggregation and orphan detection.
//!
//! Links are exact artifact-id references held in each pattern's `icd_refs`.
//! They are unrelated to the pattern's filter expression, which identifies
//! device names and is handled by [`crate::matcher`].

use crate::error::{CatalogError, Result};
use crate::model::{ArtifactRecord, EquipmentPattern};
use std::collections::HashSet;

pub fn find_pattern<'a>(
    patterns: &'a [EquipmentPattern],
    pattern_id: &str,
) -> Option<&'a EquipmentPattern> {
    patterns.iter().find(|p| p.id == pattern_id)
}

/// Patterns declaring `parent_id` as their parent.
pub fn variants_of<'a>(
    patterns: &'a [EquipmentPattern],
    parent_id: &str,
) -> Vec<&'a EquipmentPattern> {
    patterns.iter().filter(|p| p.is_variant_of(parent_id)).collect()
}

/// Patterns without a parent.
pub fn top_level_patterns(patterns: &[EquipmentPattern]) -> Vec<&EquipmentPattern> {
    patterns.iter().filter(|p| !p.is_variant()).collect()
}

/// Patterns whose own `icd_refs` name `artifact_id`.
pub fn patterns_for_artifact<'a>(
    patterns: &'a [EquipmentPattern],
    artifact_id: &str,
) -> Vec<&'a EquipmentPattern> {
    patterns.iter().filter(|p| p.references(artifact_id)).collect()
}

/// Records referenced by the pattern's own `icd_refs`.
///
/// References to artifacts that no longer exist are skipped.
pub fn get_linked_artifacts<'a>(
    pattern: &EquipmentPattern,
    records: &'a [ArtifactRecord],
) -> Vec<&'a ArtifactRecord> {
    records
        .iter()
        .filter(|r| pattern.references(&r.artifact_id))
        .collect()
}

/// Artifacts linked to the pattern or to any of its variants, one record per
/// artifact id.
///
/// An id linked by both the parent and a variant counts once. When several
/// versions share an id, the last imported one stands for it. Results keep
/// the relative order of those representative records.
pub fn get_linked_artifacts_with_variants<'a>(
    pattern: &EquipmentPattern,
    patterns: &[EquipmentPattern],
    records: &'a [ArtifactRecord],
) -> Vec<&'a ArtifactRecord> {
    let refs: HashSet<&str> = pattern
        .icd_refs()
        .iter()
        .chain(
            variants_of(patterns, &pattern.id)
                .into_iter()
                .flat_map(|variant| variant.icd_refs()),
        )
        .map(String::as_str)
        .collect();

    let mut seen: HashSet<&str> = HashSet::with_capacity(refs.len());
    let mut linked: Vec<&'a ArtifactRecord> = records
        .iter()
        .rev()
        .filter(|r| {
            let id = r.artifact_id.as_str();
            refs.contains(id) && seen.insert(id)
        })
        .collect();
    linked.reverse();
    linked
}

/// Number of distinct artifacts counted for the pattern's aggregate view.
pub fn linked_count(
    pattern: &EquipmentPattern,
    patterns: &[EquipmentPattern],
    records: &[ArtifactRecord],
) -> usize {
    get_linked_artifacts_with_variants(pattern, patterns, records).len()
}

/// Whether the pattern shows as "has equipment".
pub fn has_equipment(
    pattern: &EquipmentPattern,
    patterns: &[EquipmentPattern],
    records: &[ArtifactRecord],
) -> bool {
    linked_count(pattern, patterns, records) > 0
}

/// Records linked to no pattern at all, parents and variants alike.
///
/// ```rust
/// use icd_catalog::catalog::get_orphans;
/// use icd_catalog::{ArtifactRecord, EquipmentPattern};
///
/// let records = vec![
///     ArtifactRecord::new("BCU", "Efacec", "1").with_artifact_id("A1"),
///     ArtifactRecord::new("BCU", "Efacec", "2").with_artifact_id("A2"),
/// ];
/// let patterns = vec![EquipmentPattern::new("p1", "*BCU*").with_icd_refs(["A1"])];
///
/// let orphans = get_orphans(&patterns, &records);
/// assert_eq!(orphans.len(), 1);
/// assert_eq!(orphans[0].artifact_id, "A2");
/// ```
pub fn get_orphans<'a>(
    patterns: &[EquipmentPattern],
    records: &'a [ArtifactRecord],
) -> Vec<&'a ArtifactRecord> {
    let referenced: HashSet<&str> = patterns
        .iter()
        .flat_map(|p| p.icd_refs())
        .map(String::as_str)
        .collect();

    records
        .iter()
        .filter(|r| !referenced.contains(r.artifact_id.as_str()))
        .collect()
}

fn pattern_mut<'a>(
    patterns: &'a mut [EquipmentPattern],
    pattern_id: &str,
) -> Result<&'a mut EquipmentPattern> {
    patterns
        .iter_mut()
        .find(|p| p.id == pattern_id)
        .ok_or_else(|| CatalogError::UnknownPattern(pattern_id.to_string()))
}

/// Add `artifact_id` to the pattern's links.
///
/// Only the named pattern changes; its parent and variants keep their own
/// links. Returns `Ok(false)` when the link already existed.
pub fn link(patterns: &mut [EquipmentPattern], pattern_id: &str, artifact_id: &str) -> Result<bool> {
    let pattern = pattern_mut(patterns, pattern_id)?;
    let changed = pattern.insert_ref(artifact_id.to_string());
    tracing::debug!(pattern_id, artifact_id, changed, "link artifact");
    Ok(changed)
}

/// Remove `artifact_id` from the pattern's links.
///
/// Returns `Ok(false)` when there was no such link.
pub fn unlink(
    patterns: &mut [EquipmentPattern],
    pattern_id: &str,
    artifact_id: &str,
) -> Result<bool> {
    let pattern = pattern_mut(patterns, pattern_id)?;
    let changed = pattern.remove_ref(artifact_id);
    tracing::debug!(pattern_id, artifact_id, changed, "unlink artifact");
    Ok(changed)
}
