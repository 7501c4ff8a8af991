//! Course Recommender - keyword and category based course recommendation
//!
//! Matches a free-text keyword (expanded into sub-word terms by a tokenizer)
//! against a normalized course catalog, filters by category and score, and
//! returns results ordered and grouped by category priority.

pub mod catalog;
pub mod config;
pub mod interface;
pub mod keywords;
pub mod models;
mod pipeline;
pub mod ranking;
mod store;
pub mod tokenizer;

pub use interface::*;
pub use pipeline::recommend;
pub use store::CourseRecommender;
