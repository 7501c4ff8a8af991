//! Core data models for the course catalog
//!
//! A `CourseRecord` is one catalog row as exported from the course spreadsheet.
//! Headers are accepted either by field name or by the spreadsheet's original
//! Korean column title. `search_text` is derived once per load by `normalize`.

use serde::{Deserialize, Serialize};
use url::Url;

// ─────────────────────────────────────────────────────────────────────────────
// CATALOG RECORD
// ─────────────────────────────────────────────────────────────────────────────

/// One course of the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(default, alias = "과정명")]
    pub course_name: String,
    #[serde(default, alias = "출처")]
    pub source: Option<String>,
    #[serde(default, alias = "학습목표")]
    pub objective: Option<String>,
    #[serde(default, alias = "학습내용")]
    pub content: Option<String>,
    #[serde(default, alias = "학습대상")]
    pub audience: Option<String>,
    /// Primary category label (대분류)
    #[serde(default, alias = "대분류")]
    pub category: Option<String>,
    #[serde(default, alias = "카테고리1")]
    pub category_detail_1: Option<String>,
    #[serde(default, alias = "KG카테고리2")]
    pub category_detail_2: Option<String>,
    /// Recognized learning hours; unparseable cells load as `None`
    #[serde(default, alias = "학습인정시간", deserialize_with = "csv::invalid_option")]
    pub learning_hours: Option<f64>,
    #[serde(default, alias = "수료기준")]
    pub completion_criterion: Option<String>,
    #[serde(default, alias = "미리보기")]
    pub preview_link: Option<String>,
    /// Normalized matching text, rebuilt by `normalize`
    #[serde(skip)]
    pub search_text: String,
}

impl CourseRecord {
    /// Create a record with just a name and category (remaining fields empty)
    pub fn new(course_name: impl Into<String>, category: Option<&str>) -> Self {
        let mut record = Self {
            course_name: course_name.into(),
            category: category.map(str::to_string),
            ..Self::default()
        };
        record.normalize();
        record
    }

    /// Recompute `search_text` from the text fields. Idempotent.
    pub fn normalize(&mut self) {
        self.search_text = build_search_text(self);
    }

    /// Text fields that make up `search_text`, in concatenation order
    fn searchable_fields(&self) -> [Option<&str>; 6] {
        [
            Some(self.course_name.as_str()),
            self.objective.as_deref(),
            self.content.as_deref(),
            self.audience.as_deref(),
            self.category_detail_1.as_deref(),
            self.category_detail_2.as_deref(),
        ]
    }

    /// Category label, with blank labels treated as absent
    pub fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Parsed preview link. Absent or malformed links yield `None`.
    pub fn preview_url(&self) -> Option<Url> {
        let link = self.preview_link.as_deref()?.trim();
        if link.is_empty() {
            return None;
        }
        Url::parse(link).ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// NORMALIZATION
// ─────────────────────────────────────────────────────────────────────────────

/// Build the matching text for a record.
///
/// Absent fields contribute nothing. Newlines and tabs become spaces, runs of
/// whitespace collapse to one space, and the result is trimmed.
pub fn build_search_text(record: &CourseRecord) -> String {
    let mut text = String::new();
    for field in record.searchable_fields().into_iter().flatten() {
        for word in field.split_whitespace() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(word);
        }
    }
    text
}

/// Normalize every record of a freshly loaded catalog, preserving order.
pub fn normalize_catalog(mut records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    for record in &mut records {
        record.normalize();
    }
    records
}
