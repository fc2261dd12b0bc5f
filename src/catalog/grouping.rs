//! Grouping of artifact versions into catalog cards.

use crate::model::{ArtifactRecord, IdentityKey};
use std::collections::HashMap;

/// All imported versions of one logical artifact, with the version on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    identity_key: IdentityKey,
    active_version: String,
    versions: Vec<ArtifactRecord>,
}

impl CatalogCard {
    pub fn identity_key(&self) -> &IdentityKey {
        &self.identity_key
    }

    pub fn equipment_type(&self) -> &str {
        &self.identity_key.equipment_type
    }

    pub fn manufacturer(&self) -> &str {
        &self.identity_key.manufacturer
    }

    /// Version tag selected for display. It may name a version that no longer exists.
    pub fn active_version(&self) -> &str {
        &self.active_version
    }

    /// Versions in import order.
    pub fn versions(&self) -> &[ArtifactRecord] {
        &self.versions
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    pub fn find_version(&self, version: &str) -> Option<&ArtifactRecord> {
        self.versions.iter().find(|r| r.version == version)
    }

    /// The record for the active version, or the last imported one when the
    /// tag matches nothing.
    ///
    /// Cards built by [`group_by_identity`] always hold at least one version,
    /// so this only returns `None` for a card with an empty version list.
    pub fn get_active_version(&self) -> Option<&ArtifactRecord> {
        self.find_version(&self.active_version)
            .or_else(|| self.versions.last())
    }

    pub fn into_versions(self) -> Vec<ArtifactRecord> {
        self.versions
    }
}

/// Session-local active version selections, keyed by identity.
///
/// Pins are never persisted; the presentation layer keeps one set per session
/// and passes it to [`group_by_identity_pinned`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPins {
    pins: HashMap<IdentityKey, String>,
}

impl VersionPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `version` for `key`, returning the previous selection.
    pub fn pin(&mut self, key: IdentityKey, version: impl Into<String>) -> Option<String> {
        self.pins.insert(key, version.into())
    }

    pub fn unpin(&mut self, key: &IdentityKey) -> Option<String> {
        self.pins.remove(key)
    }

    pub fn pinned(&self, key: &IdentityKey) -> Option<&str> {
        self.pins.get(key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.pins.clear();
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

/// Group records into one card per `(equipment_type, manufacturer)`.
///
/// The active version of each card is the last record encountered. Cards come
/// out in order of first appearance.
///
/// ```rust
/// use icd_catalog::catalog::group_by_identity;
/// use icd_catalog::ArtifactRecord;
///
/// let records = vec![
///     ArtifactRecord::new("BCU", "Efacec", "V11.6.8").with_artifact_id("A1"),
///     ArtifactRecord::new("BCU", "Efacec", "V11.7.9").with_artifact_id("A2"),
/// ];
/// let cards = group_by_identity(&records);
/// assert_eq!(cards.len(), 1);
/// assert_eq!(cards[0].version_count(), 2);
/// assert_eq!(cards[0].active_version(), "V11.7.9");
/// ```
pub fn group_by_identity(records: &[ArtifactRecord]) -> Vec<CatalogCard> {
    group_by_identity_pinned(records, &VersionPins::default())
}

/// Group records, honoring the caller's pinned active versions.
pub fn group_by_identity_pinned(records: &[ArtifactRecord], pins: &VersionPins) -> Vec<CatalogCard> {
    let mut index: HashMap<IdentityKey, usize> = HashMap::new();
    let mut cards: Vec<CatalogCard> = Vec::new();

    for record in records {
        let key = record.identity_key();
        match index.get(&key) {
            Some(&position) => {
                let card = &mut cards[position];
                card.active_version = record.version.clone();
                card.versions.push(record.clone());
            }
            None => {
                index.insert(key.clone(), cards.len());
                cards.push(CatalogCard {
                    identity_key: key,
                    active_version: record.version.clone(),
                    versions: vec![record.clone()],
                });
            }
        }
    }

    for card in &mut cards {
        if let Some(pinned) = pins.pinned(&card.identity_key) {
            card.active_version = pinned.to_string();
        }
    }

    tracing::trace!(
        records = records.len(),
        cards = cards.len(),
        pins = pins.len(),
        "grouped catalog records"
    );
    cards
}
