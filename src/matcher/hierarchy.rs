//! IED / LD / LN / LNinst hierarchy filtering.

use crate::matcher::cache::ExpressionCache;
use crate::matcher::filters::matches;
use serde::{Deserialize, Serialize};

/// Identifier tuple of one logical node instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HierarchyPath {
    pub ied: String,
    pub ld: String,
    pub ln: String,
    pub lninst: String,
}

impl HierarchyPath {
    pub fn new(
        ied: impl Into<String>,
        ld: impl Into<String>,
        ln: impl Into<String>,
        lninst: impl Into<String>,
    ) -> Self {
        Self {
            ied: ied.into(),
            ld: ld.into(),
            ln: ln.into(),
            lninst: lninst.into(),
        }
    }
}

/// One filter expression per hierarchy level. Empty or `*` levels accept anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyFilter {
    pub ied: String,
    pub ld: String,
    pub ln: String,
    pub lninst: String,
}

impl HierarchyFilter {
    /// A filter accepting every path.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_ied(mut self, expression: impl Into<String>) -> Self {
        self.ied = expression.into();
        self
    }

    pub fn with_ld(mut self, expression: impl Into<String>) -> Self {
        self.ld = expression.into();
        self
    }

    pub fn with_ln(mut self, expression: impl Into<String>) -> Self {
        self.ln = expression.into();
        self
    }

    pub fn with_lninst(mut self, expression: impl Into<String>) -> Self {
        self.lninst = expression.into();
        self
    }

    fn levels<'a>(&'a self, path: &'a HierarchyPath) -> [(&'a str, &'a str); 4] {
        [
            (path.ied.as_str(), self.ied.as_str()),
            (path.ld.as_str(), self.ld.as_str()),
            (path.ln.as_str(), self.ln.as_str()),
            (path.lninst.as_str(), self.lninst.as_str()),
        ]
    }
}

/// Accept `path` only when every level passes its filter expression.
///
/// ```rust
/// use icd_catalog::matcher::{match_hierarchy, HierarchyFilter, HierarchyPath};
///
/// let path = HierarchyPath::new("POSTE_TGSCU1", "LD0", "PDIS", "1");
/// let filter = HierarchyFilter::any().with_ied("*TGSCU1-2").with_ln("pdis*");
/// assert!(match_hierarchy(&path, &filter));
///
/// let filter = filter.with_lninst("2-4");
/// assert!(!match_hierarchy(&path, &filter));
/// ```
pub fn match_hierarchy(path: &HierarchyPath, filter: &HierarchyFilter) -> bool {
    filter
        .levels(path)
        .iter()
        .all(|(candidate, expression)| matches(candidate, expression))
}

/// [`match_hierarchy`] evaluated through a specific cache.
pub fn match_hierarchy_with(
    cache: &ExpressionCache,
    path: &HierarchyPath,
    filter: &HierarchyFilter,
) -> bool {
    filter
        .levels(path)
        .iter()
        .all(|(candidate, expression)| cache.get_or_compile(expression).matches(candidate))
}
