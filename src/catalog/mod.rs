//! Catalog reconciliation between imported artifacts and equipment patterns.
//!
//! The catalog is two independently maintained lists: artifact records
//! (one per imported file version) and equipment patterns (each holding
//! `icd_refs`, the artifact ids it is linked to). This module derives views
//! over them and applies link edits. It never owns either list; callers pass
//! slices in and persist the result themselves.
//!
//! ## Core Components
//!
//! - [`group_by_identity`] - versions grouped into [`CatalogCard`]s
//! - [`get_linked_artifacts_with_variants`] - parent + variant aggregation
//! - [`get_orphans`] - records no pattern links
//! - [`link`] / [`unlink`] - link edits on a single pattern
//! - [`PatternRegistry`] - device name to pattern lookups
//! - [`PatternDocument`] - persisted pattern collection, legacy migration
//!
//! ## Example Usage
//!
//! ```rust
//! use icd_catalog::catalog::{get_orphans, group_by_identity, link};
//! use icd_catalog::{ArtifactRecord, EquipmentPattern};
//!
//! let records = vec![
//!     ArtifactRecord::new("BCU", "Efacec", "V11.6.8"),
//!     ArtifactRecord::new("BCU", "Efacec", "V11.7.9"),
//! ];
//! let mut patterns = vec![EquipmentPattern::new("BCU", "*BCU*")];
//!
//! let cards = group_by_identity(&records);
//! assert_eq!(cards[0].active_version(), "V11.7.9");
//! assert_eq!(get_orphans(&patterns, &records).len(), 2);
//!
//! link(&mut patterns, "BCU", &records[0].artifact_id)?;
//! assert!(get_orphans(&patterns, &records).is_empty());
//! # Ok::<(), icd_catalog::CatalogError>(())
//! ```

pub mod document;
pub mod grouping;
pub mod links;
pub mod records;
pub mod referents;
pub mod registry;

pub use document::{PatternDocument, DOCUMENT_VERSION};
pub use grouping::{group_by_identity, group_by_identity_pinned, CatalogCard, VersionPins};
pub use links::{
    find_pattern, get_linked_artifacts, get_linked_artifacts_with_variants, get_orphans,
    has_equipment, link, linked_count, patterns_for_artifact, top_level_patterns, unlink,
    variants_of,
};
pub use records::{
    equipment_types, manufacturers, remove_record, upsert_record, versions_for, UpsertOutcome,
};
pub use referents::{
    clear_default_artifact, default_artifact, default_artifact_for, set_default_artifact,
};
pub use registry::PatternRegistry;

/// `get_active_version` as a free function over a card.
pub fn get_active_version(card: &CatalogCard) -> Option<&crate::model::ArtifactRecord> {
    card.get_active_version()
}
