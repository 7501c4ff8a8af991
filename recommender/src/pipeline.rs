//! Filter & rank pipeline
//!
//! Steps, in order: category filter, keyword scoring + threshold, ordering by
//! (category priority, score desc, catalog position), grouping into contiguous
//! category runs, counting.
//!
//! Category order: labels from the configured priority list first, in list
//! order; then labels the list does not know, in first-appearance order over
//! the whole catalog; then courses without a category.

use crate::config::{EmptyQueryPolicy, RecommenderConfig};
use crate::interface::{
    CategoryCount, CategoryGroup, Query, Recommendation, RecommendationOutcome, ScoredCourse,
};
use crate::keywords::ExpandedTermSet;
use crate::models::CourseRecord;
use crate::ranking::TermMatcher;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Sort key for a category: (tier, index within tier).
/// Tier 0 = priority list, 1 = unlisted label, 2 = no category.
type CategoryKey = (u8, usize);

/// Category ordering derived from the config and the catalog
pub(crate) struct CategoryOrder<'a> {
    keys: HashMap<&'a str, CategoryKey>,
}

impl<'a> CategoryOrder<'a> {
    pub(crate) fn new(config: &'a RecommenderConfig, catalog: &'a [Arc<CourseRecord>]) -> Self {
        let mut keys: HashMap<&'a str, CategoryKey> = HashMap::new();
        for (rank, category) in config.category_priority.iter().enumerate() {
            let label = category.trim();
            if !label.is_empty() {
                keys.entry(label).or_insert((0, rank));
            }
        }
        let mut unlisted = 0usize;
        for course in catalog {
            if let Some(label) = course.category_label() {
                keys.entry(label).or_insert_with(|| {
                    unlisted += 1;
                    (1, unlisted - 1)
                });
            }
        }
        Self { keys }
    }

    pub(crate) fn key(&self, category: Option<&str>) -> CategoryKey {
        match category {
            // labels missing from both sources only occur for courses outside
            // the catalog this order was built from
            Some(label) => self.keys.get(label).copied().unwrap_or((1, usize::MAX)),
            None => (2, 0),
        }
    }

    /// Labels known to the order that appear in the catalog, in display order
    pub(crate) fn present_labels(&self, catalog: &[Arc<CourseRecord>]) -> Vec<String> {
        let present: BTreeSet<&str> = catalog.iter().filter_map(|c| c.category_label()).collect();
        let mut labels: Vec<(&str, CategoryKey)> = self
            .keys
            .iter()
            .filter(|(label, _)| present.contains(*label))
            .map(|(label, key)| (*label, *key))
            .collect();
        labels.sort_by_key(|(_, key)| *key);
        labels.into_iter().map(|(label, _)| label.to_string()).collect()
    }
}

/// Run the pipeline over a normalized catalog.
///
/// `terms` is the expansion of `query.keyword`; an empty set disables keyword
/// filtering and leaves results unscored.
pub fn recommend(
    catalog: &[Arc<CourseRecord>],
    query: &Query,
    terms: &ExpandedTermSet,
    config: &RecommenderConfig,
) -> RecommendationOutcome {
    let scored = !terms.is_empty();
    let require_criteria = config.empty_query_policy == EmptyQueryPolicy::RequireCriteria;
    if !scored && !query.has_categories() && require_criteria {
        return RecommendationOutcome::NoCriteria;
    }

    let selected = query.selected_categories();

    let matcher = TermMatcher::new(terms);
    let mut results: Vec<ScoredCourse> = catalog
        .iter()
        .enumerate()
        .filter(|(_, course)| {
            selected.is_empty()
                || course
                    .category_label()
                    .map_or(false, |label| selected.contains(label))
        })
        .filter_map(|(position, course)| {
            let relevance_score = if scored {
                let score = matcher.score(&course.search_text);
                if score < config.min_score {
                    return None;
                }
                Some(score)
            } else {
                None
            };
            Some(ScoredCourse {
                course: Arc::clone(course),
                relevance_score,
                position,
            })
        })
        .collect();

    if results.is_empty() {
        return RecommendationOutcome::NoMatches {
            keyword: query.keyword.trim().to_string(),
            categories: selected.into_iter().map(str::to_string).collect(),
        };
    }

    let order = CategoryOrder::new(config, catalog);
    sort_results(&mut results, &order);
    let groups = group_by_category(results);

    let category_counts = groups
        .iter()
        .map(|g| CategoryCount {
            category: g.category.clone(),
            count: g.courses.len(),
        })
        .collect();
    let total_count = groups.iter().map(|g| g.courses.len()).sum();

    RecommendationOutcome::Matches(Recommendation {
        keyword: query.keyword.trim().to_string(),
        terms: terms.clone(),
        total_count,
        category_counts,
        groups,
    })
}

/// Category priority, then score descending, then catalog position.
fn sort_results(results: &mut [ScoredCourse], order: &CategoryOrder<'_>) {
    results.sort_by(|a, b| compare_results(a, b, order));
}

fn compare_results(a: &ScoredCourse, b: &ScoredCourse, order: &CategoryOrder<'_>) -> Ordering {
    order
        .key(a.category())
        .cmp(&order.key(b.category()))
        .then_with(|| b.relevance_score.cmp(&a.relevance_score))
        .then_with(|| a.position.cmp(&b.position))
}

/// Split an ordered sequence into contiguous runs sharing a category.
fn group_by_category(results: Vec<ScoredCourse>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for course in results {
        let category = course.category();
        match groups.last_mut() {
            Some(group) if group.category.as_deref() == category => group.courses.push(course),
            _ => groups.push(CategoryGroup {
                category: category.map(str::to_string),
                courses: vec![course],
            }),
        }
    }
    groups
}
