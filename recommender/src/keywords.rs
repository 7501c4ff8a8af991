//! Keyword expansion: literal query + tokenizer sub-words

use crate::tokenizer::MorphemeTokenizer;
use serde::Serialize;

/// Tokens must be at least this many characters to become match terms.
/// Single characters match nearly every course.
pub const MIN_TERM_CHARS: usize = 2;

/// Distinct match terms for one query, literal keyword first.
///
/// Equality is exact per term; case folding happens at scoring time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpandedTermSet {
    terms: Vec<String>,
}

impl ExpandedTermSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term unless an identical one is present. Returns whether it was added.
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term.is_empty() || self.contains(&term) {
            return false;
        }
        self.terms.push(term);
        true
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpandedTermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for term in iter {
            set.insert(term);
        }
        set
    }
}

/// Expand a raw keyword into its match terms.
///
/// Blank keywords expand to the empty set, meaning no keyword filtering.
/// A failing tokenizer degrades to the literal keyword alone.
pub fn expand(raw_keyword: &str, tokenizer: &dyn MorphemeTokenizer) -> ExpandedTermSet {
    let keyword = raw_keyword.trim();
    let mut terms = ExpandedTermSet::new();
    if keyword.is_empty() {
        return terms;
    }
    terms.insert(keyword);

    match tokenizer.tokenize(keyword) {
        Ok(tokens) => {
            for token in tokens {
                if token.char_len() >= MIN_TERM_CHARS {
                    terms.insert(token.surface);
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                keyword,
                error = %e,
                "Tokenizer failed, matching on the literal keyword only",
            );
        }
    }

    terms
}
