//! Relevance scoring for a course against an expanded term set.
//!
//! Score = sum over terms of the case-insensitive substring occurrence count in
//! the course's `search_text`. No word boundaries: "AI" counts inside "OpenAI".
//! Overlapping hits count separately ("aa" occurs twice in "aaa").

use crate::keywords::ExpandedTermSet;

/// Lowercased terms, prepared once per query and reused for every course.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    terms_lower: Vec<String>,
}

impl TermMatcher {
    pub fn new(terms: &ExpandedTermSet) -> Self {
        Self {
            terms_lower: terms.iter().map(str::to_lowercase).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms_lower.is_empty()
    }

    /// Score a text. An empty term set scores 0.
    pub fn score(&self, text: &str) -> u32 {
        if self.terms_lower.is_empty() {
            return 0;
        }
        let text_lower = text.to_lowercase();
        self.terms_lower
            .iter()
            .fold(0u32, |acc, term| acc.saturating_add(count_occurrences(&text_lower, term)))
    }
}

/// Score `search_text` against `terms`.
pub fn score(search_text: &str, terms: &ExpandedTermSet) -> u32 {
    TermMatcher::new(terms).score(search_text)
}

/// Count occurrences of `needle` in `haystack`, overlaps included.
/// Both inputs must already be lowercased.
pub(crate) fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }
    let mut count = 0u32;
    let mut start = 0usize;
    while let Some(pos) = haystack[start..].find(needle) {
        let at = start + pos;
        count = count.saturating_add(1);
        // step one char so overlapping matches are found
        start = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
    }
    count
}
