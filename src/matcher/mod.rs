//! Wildcard / range filter expressions for equipment identifiers.
//!
//! ## Expression syntax
//!
//! - Terms are separated by any run of `,`, `;` or whitespace
//! - `*` matches any run of characters (including none), `?` exactly one
//! - `!term` or `-term` excludes candidates matching `term`
//! - `<prefix>A-B<suffix>` expands into one term per integer between `A` and `B`
//! - An empty expression or a bare `*` accepts everything
//!
//! Matching is anchored and case-insensitive. Exclusions always win; an
//! expression made only of exclusions accepts everything else.
//!
//! ## Core Components
//!
//! - [`PatternExpression`] - parsed and range-expanded terms
//! - [`CompiledExpression`] - terms compiled to anchored regexes
//! - [`ExpressionCache`] - shared compiled expressions
//! - [`match_hierarchy`] - four-level IED/LD/LN/LNinst filtering
//!
//! ## Example Usage
//!
//! ```rust
//! use icd_catalog::matcher::{matches, CompiledExpression};
//!
//! assert!(matches("POSTE_TGSCU2", "*TGSCU1-2"));
//!
//! let filter = CompiledExpression::new("*BCU*, !*CBO*BCU*");
//! assert!(filter.matches("site_bcu1"));
//! ```

pub mod cache;
pub mod compiled;
pub mod expression;
pub mod filters;
pub mod hierarchy;

pub use cache::{global_expression_cache, init_global_cache, CacheStats, ExpressionCache};
pub use compiled::{CompiledExpression, CompiledTerm};
pub use expression::{expand_range, wildcard_count, PatternExpression, PatternTerm};
pub use filters::{filter_candidates, filter_candidates_with, matches};
pub use hierarchy::{match_hierarchy, match_hierarchy_with, HierarchyFilter, HierarchyPath};
