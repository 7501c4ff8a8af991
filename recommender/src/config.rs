//! Recommender tunables
//!
//! Loaded from a JSON file; keys that are absent take their defaults.

use crate::interface::RecommendError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Category order used when the catalog does not configure its own.
pub const DEFAULT_CATEGORY_PRIORITY: &[&str] =
    &["직무(무료)", "직무(유료)", "북러닝", "전화외국어", "외국어"];

/// Minimum score for a course to survive keyword filtering.
pub const DEFAULT_MIN_SCORE: u32 = 1;

/// What to return when a query has neither a keyword nor a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyQueryPolicy {
    /// Report `NoCriteria` and compute nothing
    #[default]
    RequireCriteria,
    /// Return the full catalog, grouped and unscored
    ShowAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub min_score: u32,
    pub category_priority: Vec<String>,
    pub empty_query_policy: EmptyQueryPolicy,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            category_priority: DEFAULT_CATEGORY_PRIORITY
                .iter()
                .map(|c| c.to_string())
                .collect(),
            empty_query_policy: EmptyQueryPolicy::default(),
        }
    }
}

impl RecommenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, RecommendError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RecommendError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_category_priority<I, S>(mut self, priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_priority = priority.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_empty_query_policy(mut self, policy: EmptyQueryPolicy) -> Self {
        self.empty_query_policy = policy;
        self
    }

    /// Position of a category in the priority list. Both sides are trimmed.
    pub fn category_rank(&self, category: &str) -> Option<usize> {
        let category = category.trim();
        self.category_priority
            .iter()
            .position(|c| !category.is_empty() && c.trim() == category)
    }
}
