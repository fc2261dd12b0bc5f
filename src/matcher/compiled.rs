//! Compiled filter expressions.

use crate::config::MatcherConfig;
use crate::matcher::expression::{is_match_all, PatternExpression, PatternTerm};
use regex::{Regex, RegexBuilder};

/// One wildcard literal, ready for evaluation.
#[derive(Debug, Clone)]
pub enum CompiledTerm {
    /// Anchored regex translated from `*`/`?` wildcards
    Wildcard(Regex),
    /// Plain comparison. Escaped wildcard sources only fail to build when
    /// they exceed the regex size limit, so this guards oversized terms.
    Literal { text: String, case_insensitive: bool },
}

impl CompiledTerm {
    /// Compile a single wildcard literal.
    ///
    /// Every regex metacharacter except `*` and `?` is escaped, `*` becomes
    /// `.*`, `?` becomes `.`, and the result is anchored at both ends. `.`
    /// also matches line breaks.
    pub fn compile(text: &str, config: &MatcherConfig) -> Self {
        let source = wildcard_to_regex(text);
        match RegexBuilder::new(&source)
            .case_insensitive(config.case_insensitive)
            .dot_matches_new_line(true)
            .build()
        {
            Ok(regex) => CompiledTerm::Wildcard(regex),
            Err(err) => {
                tracing::warn!(term = text, error = %err, "wildcard term fell back to literal comparison");
                CompiledTerm::Literal {
                    text: text.to_string(),
                    case_insensitive: config.case_insensitive,
                }
            }
        }
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            CompiledTerm::Wildcard(regex) => regex.is_match(candidate),
            CompiledTerm::Literal {
                text,
                case_insensitive: true,
            } => candidate.to_lowercase() == text.to_lowercase(),
            CompiledTerm::Literal { text, .. } => candidate == text,
        }
    }
}

/// Translate a wildcard literal into an anchored regex source.
pub(crate) fn wildcard_to_regex(text: &str) -> String {
    let mut source = String::with_capacity(text.len() + 8);
    let mut literal = String::new();
    source.push('^');

    for c in text.chars() {
        match c {
            '*' | '?' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');
    source
}

/// A filter expression compiled for repeated evaluation.
///
/// # Example
/// ```rust
/// use icd_catalog::matcher::CompiledExpression;
///
/// let filter = CompiledExpression::new("*BCU*, !*CBO*BCU*");
/// assert!(filter.matches("SITE_BCU1"));
/// assert!(!filter.matches("SITE_CBO_BCU1"));
/// assert!(!filter.matches("SITE_PIU"));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    source: String,
    match_all: bool,
    includes: Vec<CompiledTerm>,
    excludes: Vec<CompiledTerm>,
}

impl CompiledExpression {
    /// Compile with default settings.
    pub fn new(expression: &str) -> Self {
        Self::with_config(expression, &MatcherConfig::default())
    }

    pub fn with_config(expression: &str, config: &MatcherConfig) -> Self {
        if is_match_all(expression) {
            return Self {
                source: expression.to_string(),
                match_all: true,
                includes: Vec::new(),
                excludes: Vec::new(),
            };
        }
        Self::from_parsed(&PatternExpression::parse_with_config(expression, config), config)
    }

    pub fn from_parsed(parsed: &PatternExpression, config: &MatcherConfig) -> Self {
        let compile = |term: &PatternTerm| CompiledTerm::compile(&term.text, config);
        let includes: Vec<CompiledTerm> = parsed.includes().map(compile).collect();
        let excludes: Vec<CompiledTerm> = parsed.excludes().map(compile).collect();

        tracing::trace!(
            expression = parsed.source(),
            includes = includes.len(),
            excludes = excludes.len(),
            "compiled filter expression"
        );

        Self {
            source: parsed.source().to_string(),
            match_all: parsed.is_match_all(),
            includes,
            excludes,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match_all(&self) -> bool {
        self.match_all
    }

    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Decide whether `candidate` passes this filter.
    ///
    /// Exclusions win over inclusions; an expression made only of exclusions
    /// accepts everything it does not exclude.
    pub fn matches(&self, candidate: &str) -> bool {
        if self.match_all {
            return true;
        }
        if self.excludes.iter().any(|term| term.is_match(candidate)) {
            return false;
        }
        if self.includes.is_empty() {
            return true;
        }
        self.includes.iter().any(|term| term.is_match(candidate))
    }
}
