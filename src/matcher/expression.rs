//! Filter expression parsing and range expansion.
//!
//! An expression is a list of terms separated by any run of commas,
//! semicolons or whitespace. A leading `!` or `-` excludes a term. A term
//! shaped like `<prefix><digits>-<digits><suffix>` expands into one literal
//! per integer of the inclusive range:
//!
//! ```rust
//! use icd_catalog::matcher::PatternExpression;
//!
//! let expr = PatternExpression::parse("*TGSCU1-3, !*TGSCU2");
//! let texts: Vec<&str> = expr.terms().iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["*TGSCU1", "*TGSCU2", "*TGSCU3", "*TGSCU2"]);
//! assert!(expr.terms()[3].excluded);
//! ```

use crate::config::MatcherConfig;

/// One expanded literal of a filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternTerm {
    /// Literal text, possibly containing `*` and `?` wildcards
    pub text: String,
    /// Whether a candidate matching this term is rejected
    pub excluded: bool,
}

impl PatternTerm {
    pub fn include(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            excluded: false,
        }
    }

    pub fn exclude(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            excluded: true,
        }
    }
}

/// A parsed filter expression: the raw text plus its ordered, expanded terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternExpression {
    source: String,
    terms: Vec<PatternTerm>,
}

impl PatternExpression {
    /// Parse with the default range expansion limit.
    pub fn parse(expression: &str) -> Self {
        Self::parse_with_config(expression, &MatcherConfig::default())
    }

    pub fn parse_with_config(expression: &str, config: &MatcherConfig) -> Self {
        let mut terms = Vec::new();

        for token in tokenize(expression) {
            let (body, excluded) = match token.strip_prefix(|c: char| c == '!' || c == '-') {
                Some(stripped) => (stripped, true),
                None => (token, false),
            };

            for text in expand_range_limited(body, config.max_range_expansion) {
                terms.push(PatternTerm { text, excluded });
            }
        }

        Self {
            source: expression.to_string(),
            terms,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn terms(&self) -> &[PatternTerm] {
        &self.terms
    }

    /// Empty and bare `*` expressions accept every candidate, the empty one included.
    pub fn is_match_all(&self) -> bool {
        is_match_all(&self.source)
    }

    pub fn includes(&self) -> impl Iterator<Item = &PatternTerm> {
        self.terms.iter().filter(|t| !t.excluded)
    }

    pub fn excludes(&self) -> impl Iterator<Item = &PatternTerm> {
        self.terms.iter().filter(|t| t.excluded)
    }
}

pub(crate) fn is_match_all(expression: &str) -> bool {
    let trimmed = expression.trim();
    trimmed.is_empty() || trimmed == "*"
}

fn tokenize(expression: &str) -> impl Iterator<Item = &str> {
    expression
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Expand a range token into its literals, or return the token unchanged.
///
/// Bounds are inclusive and the step follows their order, so `X3-1` yields
/// `X3, X2, X1`. Bounds that do not fit an integer leave the token as a
/// single literal.
///
/// ```rust
/// use icd_catalog::matcher::expand_range;
///
/// assert_eq!(expand_range("BAY1-3_A"), ["BAY1_A", "BAY2_A", "BAY3_A"]);
/// assert_eq!(expand_range("LD3-1"), ["LD3", "LD2", "LD1"]);
/// assert_eq!(expand_range("PDIS*"), ["PDIS*"]);
/// ```
pub fn expand_range(token: &str) -> Vec<String> {
    expand_range_limited(token, MatcherConfig::default().max_range_expansion)
}

pub(crate) fn expand_range_limited(token: &str, max_expansion: usize) -> Vec<String> {
    let Some((prefix, start, end, suffix)) = split_range(token) else {
        return vec![token.to_string()];
    };

    let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>()) else {
        return vec![token.to_string()];
    };

    let span = start.abs_diff(end);
    if span >= max_expansion as u64 {
        tracing::warn!(
            token,
            span = span + 1,
            limit = max_expansion,
            "range too large to expand, keeping it as a literal"
        );
        return vec![token.to_string()];
    }

    let render = |i: u64| format!("{prefix}{i}{suffix}");
    if start <= end {
        (start..=end).map(render).collect()
    } else {
        (end..=start).rev().map(render).collect()
    }
}

/// Split `<prefix><digits>-<digits><suffix>` where prefix and suffix hold no digits.
fn split_range(token: &str) -> Option<(&str, &str, &str, &str)> {
    let digits_at = token.find(|c: char| c.is_ascii_digit())?;
    let (prefix, rest) = token.split_at(digits_at);

    let (start, rest) = split_digits(rest);
    let rest = rest.strip_prefix('-')?;
    let (end, suffix) = split_digits(rest);

    if end.is_empty() || suffix.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some((prefix, start, end, suffix))
}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(len)
}

/// Number of `*` wildcards in a pattern; fewer means more specific.
pub fn wildcard_count(pattern: &str) -> usize {
    pattern.matches('*').count()
}
