//! # ICD Catalog
//!
//! Equipment-identifier filtering and catalog reconciliation for IEC 61850
//! IED capability files.
//!
//! The crate answers two questions for a substation engineering tool:
//!
//! - Does an IED / LD / LN / LN-instance name pass a user filter such as
//!   `*BCU*, !*CBO*BCU*` or `LN1-4`? See [`matcher`].
//! - Given the imported artifact versions and the equipment patterns they are
//!   linked to, what does the catalog look like? See [`catalog`].
//!
//! Everything is synchronous and operates on caller-owned slices. Parsing
//! ICD files and persisting the lists belong to the caller.
//!
//! ## Quick Start
//!
//! ### Filtering names
//!
//! ```rust
//! use icd_catalog::matcher::{filter_candidates, match_hierarchy, HierarchyFilter, HierarchyPath};
//!
//! let names = ["POSTE_BCU1", "POSTE_CBO_BCU1", "POSTE_PIU1"];
//! assert_eq!(filter_candidates(names, "*BCU*, !*CBO*"), ["POSTE_BCU1"]);
//!
//! let path = HierarchyPath::new("POSTE_BCU1", "LD0", "XCBR", "2");
//! let filter = HierarchyFilter::any().with_ied("*BCU*").with_lninst("1-3");
//! assert!(match_hierarchy(&path, &filter));
//! ```
//!
//! ### Reconciling the catalog
//!
//! ```rust
//! use icd_catalog::catalog::{get_linked_artifacts_with_variants, group_by_identity, link};
//! use icd_catalog::{ArtifactRecord, EquipmentPattern};
//!
//! let records = vec![
//!     ArtifactRecord::new("BCU", "Efacec", "V11.6.8"),
//!     ArtifactRecord::new("BCU", "Efacec", "V11.7.9"),
//!     ArtifactRecord::new("BCU2", "Efacec", "V1"),
//! ];
//! let mut patterns = vec![
//!     EquipmentPattern::new("BCU", "*BCU*"),
//!     EquipmentPattern::new("BCU_V2", "*BCU2*").with_parent("BCU"),
//! ];
//!
//! link(&mut patterns, "BCU", "ICD_BCU_EFACEC")?;
//! link(&mut patterns, "BCU_V2", "ICD_BCU2_EFACEC")?;
//!
//! let cards = group_by_identity(&records);
//! assert_eq!(cards.len(), 2);
//! assert_eq!(cards[0].get_active_version().map(|r| r.version.as_str()), Some("V11.7.9"));
//!
//! // Two BCU versions share one artifact id and count once.
//! let all = get_linked_artifacts_with_variants(&patterns[0], &patterns, &records);
//! assert_eq!(all.len(), 2);
//! assert_eq!(all[0].version, "V11.7.9");
//! # Ok::<(), icd_catalog::CatalogError>(())
//! ```
//!
//! ### Configuration
//!
//! ```rust
//! use icd_catalog::CatalogConfig;
//!
//! let config = CatalogConfig::from_yaml_str(
//!     "matcher:\n  max_range_expansion: 500\ncatalog:\n  artifact_id_prefix: ISA\n",
//! )?;
//! assert_eq!(config.matcher.max_range_expansion, 500);
//! assert!(config.matcher.case_insensitive);
//! # Ok::<(), icd_catalog::CatalogError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;

// Configuration
pub use config::{CatalogConfig, MatcherConfig, ReconcilerConfig};

// Core types and errors
pub use error::{CatalogError, Result};
pub use model::{ArtifactKind, ArtifactRecord, EquipmentPattern, IdentityKey, StructuralCounters};

// Matcher system
pub use matcher::{
    match_hierarchy, matches, CompiledExpression, ExpressionCache, HierarchyFilter,
    HierarchyPath, PatternExpression,
};

// Reconciler
pub use catalog::{
    get_linked_artifacts, get_linked_artifacts_with_variants, get_orphans, group_by_identity,
    link, unlink, CatalogCard, PatternDocument, PatternRegistry, VersionPins,
};
