//! Recommender service
//!
//! Owns the normalized catalog as an immutable `Arc` snapshot. Each request
//! clones the snapshot pointer and runs without holding the lock, so
//! `replace_catalog` never disturbs requests already in flight.

use crate::config::RecommenderConfig;
use crate::interface::{CourseRecommenderApi, Query, RecommendationOutcome};
use crate::keywords;
use crate::models::{normalize_catalog, CourseRecord};
use crate::pipeline::{self, CategoryOrder};
use crate::tokenizer::{AnalyzerTokenizer, MorphemeTokenizer};
use parking_lot::RwLock;
use std::sync::Arc;

type CatalogSnapshot = Arc<Vec<Arc<CourseRecord>>>;

fn snapshot_from(records: Vec<CourseRecord>) -> CatalogSnapshot {
    Arc::new(normalize_catalog(records).into_iter().map(Arc::new).collect())
}

pub struct CourseRecommender {
    catalog: RwLock<CatalogSnapshot>,
    tokenizer: Arc<dyn MorphemeTokenizer>,
    config: RecommenderConfig,
}

impl CourseRecommender {
    /// Build a recommender over `records`, normalizing them once.
    pub fn new(
        records: Vec<CourseRecord>,
        tokenizer: Arc<dyn MorphemeTokenizer>,
        config: RecommenderConfig,
    ) -> Self {
        Self {
            catalog: RwLock::new(snapshot_from(records)),
            tokenizer,
            config,
        }
    }

    /// Recommender with the tantivy word tokenizer and default config
    pub fn with_defaults(records: Vec<CourseRecord>) -> Self {
        Self::new(
            records,
            Arc::new(AnalyzerTokenizer::simple()),
            RecommenderConfig::default(),
        )
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    fn snapshot(&self) -> CatalogSnapshot {
        let guard = self.catalog.read();
        Arc::clone(&*guard)
    }

    /// Selected labels that neither the priority list nor the catalog knows.
    /// Such selections filter out everything they name.
    pub fn unknown_categories(&self, query: &Query) -> Vec<String> {
        self.unknown_in(&self.snapshot(), query)
    }

    fn unknown_in(&self, catalog: &[Arc<CourseRecord>], query: &Query) -> Vec<String> {
        query
            .selected_categories()
            .into_iter()
            .filter(|c| self.config.category_rank(c).is_none())
            .filter(|c| !catalog.iter().any(|course| course.category_label() == Some(*c)))
            .map(str::to_string)
            .collect()
    }
}

impl CourseRecommenderApi for CourseRecommender {
    fn recommend(&self, query: &Query) -> RecommendationOutcome {
        let catalog = self.snapshot();

        let unknown = self.unknown_in(&catalog, query);
        if !unknown.is_empty() {
            tracing::warn!(
                categories = ?unknown,
                "Selected categories are not in the catalog vocabulary",
            );
        }

        let terms = keywords::expand(&query.keyword, self.tokenizer.as_ref());
        let outcome = pipeline::recommend(&catalog, query, &terms, &self.config);

        tracing::debug!(
            keyword = query.keyword.as_str(),
            categories = ?query.categories,
            terms = ?terms,
            catalog_size = catalog.len(),
            total_count = outcome.total_count(),
            "Recommendation computed",
        );

        outcome
    }

    fn categories(&self) -> Vec<String> {
        let catalog = self.snapshot();
        CategoryOrder::new(&self.config, &catalog).present_labels(&catalog)
    }

    fn catalog_size(&self) -> usize {
        self.catalog.read().len()
    }

    fn replace_catalog(&self, records: Vec<CourseRecord>) {
        let snapshot = snapshot_from(records);
        let courses = snapshot.len();
        *self.catalog.write() = snapshot;
        tracing::info!(courses, "Replaced course catalog");
    }
}
