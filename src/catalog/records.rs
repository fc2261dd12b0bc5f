//! Facets over the artifact list and the upsert/remove rules the persistence
//! service applies to its own copy of it.

use crate::model::ArtifactRecord;
use std::collections::BTreeSet;

/// Result of [`upsert_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The record was appended as a new version
    Inserted,
    /// An entry with the same type, manufacturer and version was overwritten in place
    Replaced,
}

/// Sorted, distinct equipment types.
pub fn equipment_types(records: &[ArtifactRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.equipment_type.as_str()))
}

/// Sorted, distinct manufacturers.
pub fn manufacturers(records: &[ArtifactRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.manufacturer.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Every version recorded for one identity, in import order.
pub fn versions_for<'a>(
    records: &'a [ArtifactRecord],
    equipment_type: &str,
    manufacturer: &str,
) -> Vec<&'a ArtifactRecord> {
    records
        .iter()
        .filter(|r| r.has_identity(equipment_type, manufacturer))
        .collect()
}

/// Insert `record`, replacing an existing entry for the same type,
/// manufacturer and version so re-importing a file never duplicates it.
pub fn upsert_record(records: &mut Vec<ArtifactRecord>, record: ArtifactRecord) -> UpsertOutcome {
    let existing = records.iter_mut().find(|r| {
        r.has_identity(&record.equipment_type, &record.manufacturer) && r.version == record.version
    });

    match existing {
        Some(slot) => {
            tracing::debug!(
                artifact_id = %record.artifact_id,
                version = %record.version,
                "replacing existing catalog entry"
            );
            *slot = record;
            UpsertOutcome::Replaced
        }
        None => {
            tracing::debug!(
                artifact_id = %record.artifact_id,
                version = %record.version,
                "adding catalog entry"
            );
            records.push(record);
            UpsertOutcome::Inserted
        }
    }
}

/// Remove one version. Returns whether anything was removed.
pub fn remove_record(
    records: &mut Vec<ArtifactRecord>,
    equipment_type: &str,
    manufacturer: &str,
    version: &str,
) -> bool {
    let before = records.len();
    records.retain(|r| !(r.has_identity(equipment_type, manufacturer) && r.version == version));
    records.len() != before
}
