//! Device-name lookups over a pattern collection.

use crate::matcher::{global_expression_cache, wildcard_count, ExpressionCache};
use crate::model::EquipmentPattern;

/// Read-only view answering "which equipment pattern is this IED?".
///
/// # Example
/// ```rust
/// use icd_catalog::catalog::PatternRegistry;
/// use icd_catalog::EquipmentPattern;
///
/// let patterns = vec![
///     EquipmentPattern::new("SCU", "*SCU*"),
///     EquipmentPattern::new("TGSCU", "*TGSCU1-2"),
///     EquipmentPattern::new("BCU", "*BCU*").with_exclusions(["*CBO*BCU*"]),
/// ];
/// let registry = PatternRegistry::new(&patterns);
///
/// assert_eq!(registry.best_match("POSTE_TGSCU1").unwrap().id, "TGSCU");
/// assert_eq!(registry.match_name("POSTE_TGSCU1").len(), 2);
/// assert!(registry.best_match("SITE_CBO_BCU1").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PatternRegistry<'a> {
    patterns: &'a [EquipmentPattern],
    cache: &'a ExpressionCache,
}

impl<'a> PatternRegistry<'a> {
    /// View over `patterns` using the process-wide expression cache.
    pub fn new(patterns: &'a [EquipmentPattern]) -> Self {
        Self::with_cache(patterns, global_expression_cache())
    }

    pub fn with_cache(patterns: &'a [EquipmentPattern], cache: &'a ExpressionCache) -> Self {
        Self { patterns, cache }
    }

    pub fn patterns(&self) -> &'a [EquipmentPattern] {
        self.patterns
    }

    /// Patterns accepting `name`, most specific (fewest `*`) first.
    ///
    /// Patterns with a blank expression identify no device and never match.
    pub fn match_name(&self, name: &str) -> Vec<&'a EquipmentPattern> {
        let mut matched: Vec<&'a EquipmentPattern> = self
            .patterns
            .iter()
            .filter(|p| !p.pattern.trim().is_empty())
            .filter(|p| {
                self.cache
                    .get_or_compile(&p.effective_expression())
                    .matches(name)
            })
            .collect();

        matched.sort_by_key(|p| wildcard_count(&p.pattern));
        tracing::trace!(name, matches = matched.len(), "matched device name");
        matched
    }

    pub fn best_match(&self, name: &str) -> Option<&'a EquipmentPattern> {
        self.match_name(name).into_iter().next()
    }

    /// Patterns whose id and `equipment_type` contain one another, ignoring case.
    pub fn suggest_for_type(&self, equipment_type: &str) -> Vec<&'a EquipmentPattern> {
        let wanted = equipment_type.trim().to_uppercase();
        if wanted.is_empty() {
            return Vec::new();
        }

        self.patterns
            .iter()
            .filter(|p| {
                let id = p.id.to_uppercase();
                !id.is_empty() && (id.contains(&wanted) || wanted.contains(&id))
            })
            .collect()
    }
}
