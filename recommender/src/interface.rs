//! Course Recommender Interface Definition
//!
//! Request and response types shared with the presentation layer, plus the
//! service trait it calls. All response types serialize with serde so a UI can
//! consume them as JSON.

use crate::keywords::ExpandedTermSet;
use crate::models::CourseRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Shown when filters leave nothing to recommend.
pub const NO_MATCHES_NOTICE: &str =
    "입력하신 키워드에 적합한 과정이 없습니다. 다른 키워드를 시도해보세요.";

/// Shown before the user has entered a keyword or picked a category.
pub const NO_CRITERIA_NOTICE: &str = "관심 키워드를 입력하거나 교육방식을 선택하세요.";

// ═══════════════════════════════════════════════════════════════════════════════
// REQUEST
// ═══════════════════════════════════════════════════════════════════════════════

/// One search request. An empty `categories` set means no category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub keyword: String,
    pub categories: BTreeSet<String>,
}

impl Query {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            categories: BTreeSet::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    /// Selected labels with surrounding whitespace removed; blank labels ignored
    pub fn selected_categories(&self) -> BTreeSet<&str> {
        self.categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect()
    }

    pub fn has_categories(&self) -> bool {
        self.categories.iter().any(|c| !c.trim().is_empty())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE
// ═══════════════════════════════════════════════════════════════════════════════

/// A course in a result set. `relevance_score` is `None` when the query had no
/// keyword and nothing was scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCourse {
    #[serde(flatten)]
    pub course: Arc<CourseRecord>,
    pub relevance_score: Option<u32>,
    /// Index in the catalog, used as the final tie-breaker
    #[serde(skip)]
    pub position: usize,
}

impl ScoredCourse {
    pub fn course_name(&self) -> &str {
        &self.course.course_name
    }

    pub fn category(&self) -> Option<&str> {
        self.course.category_label()
    }
}

/// Number of results in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: usize,
}

/// Contiguous run of results sharing a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Option<String>,
    pub courses: Vec<ScoredCourse>,
}

/// Non-empty result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub keyword: String,
    /// Terms the keyword expanded to (empty when no keyword was given)
    pub terms: ExpandedTermSet,
    pub total_count: usize,
    /// Per-category counts in group order, zero counts omitted
    pub category_counts: Vec<CategoryCount>,
    pub groups: Vec<CategoryGroup>,
}

impl Recommendation {
    /// All results in display order
    pub fn courses(&self) -> impl Iterator<Item = &ScoredCourse> {
        self.groups.iter().flat_map(|g| g.courses.iter())
    }

    pub fn group(&self, category: &str) -> Option<&CategoryGroup> {
        self.groups
            .iter()
            .find(|g| g.category.as_deref() == Some(category))
    }
}

/// Terminal outcome of a recommendation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Matches(Recommendation),
    /// Filters were applied and nothing passed
    NoMatches {
        keyword: String,
        categories: Vec<String>,
    },
    /// Neither keyword nor category was supplied
    NoCriteria,
}

impl RecommendationOutcome {
    pub fn total_count(&self) -> usize {
        match self {
            RecommendationOutcome::Matches(r) => r.total_count,
            _ => 0,
        }
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            RecommendationOutcome::Matches(r) => Some(r),
            _ => None,
        }
    }

    /// User-facing message for outcomes that carry no results
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            RecommendationOutcome::Matches(_) => None,
            RecommendationOutcome::NoMatches { .. } => Some(NO_MATCHES_NOTICE),
            RecommendationOutcome::NoCriteria => Some(NO_CRITERIA_NOTICE),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Error type for catalog and configuration loading.
/// Recommendation itself never fails.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported catalog format: {0}")]
    UnsupportedCatalogFormat(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// The interface a presentation layer uses to query the recommender.
/// Implementations are shared across concurrent requests.
pub trait CourseRecommenderApi: Send + Sync {
    /// Run one recommendation request
    fn recommend(&self, query: &Query) -> RecommendationOutcome;

    /// Category labels to offer as filters, in display order
    fn categories(&self) -> Vec<String>;

    /// Number of courses in the current catalog
    fn catalog_size(&self) -> usize;

    /// Swap in a new catalog. In-flight requests keep their snapshot.
    fn replace_catalog(&self, records: Vec<CourseRecord>);
}
