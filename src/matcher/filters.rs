//! Entry points used by list filtering in the presentation layer.

use crate::matcher::cache::{global_expression_cache, ExpressionCache};

/// Decide whether `candidate` is accepted by the filter `expression`.
///
/// Malformed expressions degrade to literal matching; this never fails.
///
/// ```rust
/// use icd_catalog::matcher::matches;
///
/// assert!(matches("PDIS1", "pdis*"));
/// assert!(matches("", ""));
/// assert!(!matches("X", "*,!X"));
/// assert!(matches("LD2", "LD1-3"));
/// ```
pub fn matches(candidate: &str, expression: &str) -> bool {
    global_expression_cache()
        .get_or_compile(expression)
        .matches(candidate)
}

/// Keep the candidates accepted by `expression`, in input order.
pub fn filter_candidates<'a, I>(candidates: I, expression: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    filter_candidates_with(global_expression_cache(), candidates, expression)
}

/// [`filter_candidates`] compiled through a specific cache.
pub fn filter_candidates_with<'a, I>(
    cache: &ExpressionCache,
    candidates: I,
    expression: &str,
) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let compiled = cache.get_or_compile(expression);
    candidates
        .into_iter()
        .filter(|candidate| compiled.matches(candidate))
        .collect()
}
