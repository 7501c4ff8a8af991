//! End-to-end recommendation scenarios through `CourseRecommender`.

use course_recommender::catalog::read_csv_catalog;
use course_recommender::config::{EmptyQueryPolicy, RecommenderConfig};
use course_recommender::models::CourseRecord;
use course_recommender::ranking::score;
use course_recommender::tokenizer::{AnalyzerTokenizer, MorphemeTokenizer, Token, TokenizerError};
use course_recommender::{
    CourseRecommender, CourseRecommenderApi, Query, Recommendation, RecommendationOutcome,
    NO_MATCHES_NOTICE,
};
use demo_data::{DEMO_CATALOG_CSV, DEMO_CATEGORIES};
use std::sync::Arc;

const FREE: &str = "free job training";
const PAID: &str = "paid job training";

fn english_config() -> RecommenderConfig {
    RecommenderConfig::default().with_category_priority([
        FREE,
        PAID,
        "book learning",
        "phone foreign-language",
        "foreign language",
    ])
}

fn two_course_catalog() -> Vec<CourseRecord> {
    vec![
        CourseRecord {
            course_name: "AI Basics".to_string(),
            category: Some(FREE.to_string()),
            objective: Some("Understand what AI is".to_string()),
            ..CourseRecord::default()
        },
        CourseRecord {
            course_name: "Excel 101".to_string(),
            category: Some(PAID.to_string()),
            content: Some("Formulas and pivot tables".to_string()),
            ..CourseRecord::default()
        },
    ]
}

fn demo_recommender(config: RecommenderConfig) -> CourseRecommender {
    let records = read_csv_catalog(DEMO_CATALOG_CSV.as_bytes()).unwrap();
    CourseRecommender::new(records, Arc::new(AnalyzerTokenizer::simple()), config)
}

fn expect_matches(outcome: RecommendationOutcome) -> Recommendation {
    match outcome {
        RecommendationOutcome::Matches(rec) => rec,
        other => panic!("expected matches, got {:?}", other),
    }
}

fn names(rec: &Recommendation) -> Vec<&str> {
    rec.courses().map(|c| c.course_name()).collect()
}

// ============================================================
// Two-course catalog scenarios
// ============================================================

#[test]
fn keyword_scores_and_excludes_non_matching() {
    let recommender = CourseRecommender::new(
        two_course_catalog(),
        Arc::new(AnalyzerTokenizer::simple()),
        english_config(),
    );
    let rec = expect_matches(recommender.recommend(&Query::new("AI")));

    assert_eq!(rec.total_count, 1);
    assert_eq!(rec.groups.len(), 1);
    assert_eq!(rec.groups[0].category.as_deref(), Some(FREE));
    assert_eq!(rec.groups[0].courses[0].course_name(), "AI Basics");
    assert_eq!(rec.groups[0].courses[0].relevance_score, Some(2));
}

#[test]
fn category_only_query_returns_unscored_courses() {
    let recommender = CourseRecommender::new(
        two_course_catalog(),
        Arc::new(AnalyzerTokenizer::simple()),
        english_config(),
    );
    let rec = expect_matches(recommender.recommend(&Query::new("").with_category(PAID)));

    assert_eq!(names(&rec), vec!["Excel 101"]);
    assert_eq!(rec.courses().next().unwrap().relevance_score, None);
}

#[test]
fn tokenized_terms_pass_loose_but_not_strict_threshold() {
    let catalog = vec![CourseRecord {
        course_name: "UX 입문".to_string(),
        category: Some(FREE.to_string()),
        content: Some("디자인".to_string()),
        ..CourseRecord::default()
    }];
    let query = Query::new("AI 디자인");

    let loose = CourseRecommender::new(
        catalog.clone(),
        Arc::new(AnalyzerTokenizer::simple()),
        english_config(),
    );
    let rec = expect_matches(loose.recommend(&query));
    let terms: Vec<&str> = rec.terms.iter().collect();
    assert_eq!(terms, vec!["AI 디자인", "AI", "디자인"]);
    assert_eq!(rec.courses().next().unwrap().relevance_score, Some(1));

    let strict = CourseRecommender::new(
        catalog,
        Arc::new(AnalyzerTokenizer::simple()),
        english_config().with_min_score(3),
    );
    assert!(matches!(
        strict.recommend(&query),
        RecommendationOutcome::NoMatches { .. }
    ));
}

#[test]
fn failing_tokenizer_still_recommends() {
    struct BrokenAnalyzer;

    impl MorphemeTokenizer for BrokenAnalyzer {
        fn tokenize(&self, _text: &str) -> Result<Vec<Token>, TokenizerError> {
            Err(TokenizerError::Failed("analyzer crashed".to_string()))
        }
    }

    let recommender =
        CourseRecommender::new(two_course_catalog(), Arc::new(BrokenAnalyzer), english_config());
    let rec = expect_matches(recommender.recommend(&Query::new("AI")));
    assert_eq!(names(&rec), vec!["AI Basics"]);
}

// ============================================================
// Demo catalog scenarios
// ============================================================

#[test]
fn demo_keyword_groups_in_priority_order() {
    let recommender = demo_recommender(RecommenderConfig::default());
    let rec = expect_matches(recommender.recommend(&Query::new("AI 디자인")));

    assert_eq!(rec.total_count, 3);
    let groups: Vec<&str> = rec.groups.iter().filter_map(|g| g.category.as_deref()).collect();
    assert_eq!(groups, vec!["직무(무료)", "직무(유료)", "북러닝"]);
    assert_eq!(names(&rec), vec!["생성형 AI 업무 활용", "AI 디자인 입문", "UX 디자인 씽킹"]);

    let scores: Vec<Option<u32>> = rec.courses().map(|c| c.relevance_score).collect();
    assert_eq!(scores, vec![Some(5), Some(8), Some(3)]);
}

#[test]
fn demo_strict_threshold() {
    let recommender = demo_recommender(RecommenderConfig::default().with_min_score(6));
    let rec = expect_matches(recommender.recommend(&Query::new("AI 디자인")));
    assert_eq!(names(&rec), vec!["AI 디자인 입문"]);
}

#[test]
fn demo_keyword_with_category_filter() {
    let recommender = demo_recommender(RecommenderConfig::default());
    let rec = expect_matches(recommender.recommend(&Query::new("영어").with_category("외국어")));
    assert_eq!(names(&rec), vec!["토익 실전"]);
    assert_eq!(rec.category_counts.len(), 1);
    assert_eq!(rec.category_counts[0].count, 1);
}

#[test]
fn demo_category_only_keeps_catalog_order() {
    let recommender = demo_recommender(RecommenderConfig::default());
    let rec = expect_matches(recommender.recommend(&Query::new("").with_category("북러닝")));
    assert_eq!(names(&rec), vec!["리더십 이야기", "UX 디자인 씽킹"]);
}

#[test]
fn demo_no_matches_is_reported_not_raised() {
    let recommender = demo_recommender(RecommenderConfig::default());
    let outcome = recommender.recommend(&Query::new("블록체인"));
    assert!(matches!(outcome, RecommendationOutcome::NoMatches { .. }));
    assert_eq!(outcome.notice(), Some(NO_MATCHES_NOTICE));
    assert_eq!(outcome.total_count(), 0);
}

#[test]
fn demo_empty_query_policies() {
    let recommender = demo_recommender(RecommenderConfig::default());
    assert_eq!(recommender.recommend(&Query::default()), RecommendationOutcome::NoCriteria);

    let show_all = demo_recommender(
        RecommenderConfig::default().with_empty_query_policy(EmptyQueryPolicy::ShowAll),
    );
    let rec = expect_matches(show_all.recommend(&Query::default()));
    assert_eq!(rec.total_count, recommender.catalog_size());
    assert_eq!(rec.groups.len(), DEMO_CATEGORIES.len());
}

#[test]
fn demo_categories_follow_priority() {
    let recommender = demo_recommender(RecommenderConfig::default());
    assert_eq!(recommender.categories(), DEMO_CATEGORIES);
}

// ============================================================
// Properties over the demo catalog
// ============================================================

const KEYWORDS: &[&str] = &[
    "AI",
    "엑셀",
    "디자인",
    "영어",
    "리더십",
    "데이터 분석",
    "ai 디자인",
    "a",
];

#[test]
fn threshold_enforced_for_included_and_excluded() {
    let min_score = 2;
    let recommender = demo_recommender(RecommenderConfig::default().with_min_score(min_score));
    let catalog = read_csv_catalog(DEMO_CATALOG_CSV.as_bytes()).unwrap();

    for keyword in KEYWORDS {
        let outcome = recommender.recommend(&Query::new(*keyword));
        let included: Vec<&str> = outcome
            .recommendation()
            .map(|r| r.courses().map(|c| c.course_name()).collect())
            .unwrap_or_default();

        if let Some(rec) = outcome.recommendation() {
            assert!(rec.courses().all(|c| c.relevance_score.unwrap() >= min_score));
            for course in &catalog {
                if !included.contains(&course.course_name.as_str()) {
                    assert!(
                        score(&course.search_text, &rec.terms) < min_score,
                        "{} excluded for {:?}",
                        course.course_name,
                        keyword
                    );
                }
            }
        }
    }
}

#[test]
fn category_filter_is_respected() {
    let recommender = demo_recommender(RecommenderConfig::default());
    let selection = ["직무(유료)", "외국어"];
    for keyword in KEYWORDS.iter().chain(std::iter::once(&"")) {
        let outcome = recommender.recommend(&Query::new(*keyword).with_categories(selection));
        if let Some(rec) = outcome.recommendation() {
            assert!(rec
                .courses()
                .all(|c| c.category().map_or(false, |cat| selection.contains(&cat))));
        }
    }
}

#[test]
fn groups_are_complete_and_unique() {
    let recommender = demo_recommender(
        RecommenderConfig::default().with_empty_query_policy(EmptyQueryPolicy::ShowAll),
    );
    for keyword in KEYWORDS.iter().chain(std::iter::once(&"")) {
        if let RecommendationOutcome::Matches(rec) = recommender.recommend(&Query::new(*keyword)) {
            let mut seen = Vec::new();
            for group in &rec.groups {
                assert!(!group.courses.is_empty());
                assert!(!seen.contains(&group.category), "{:?} repeated", group.category);
                assert!(group.courses.iter().all(|c| c.category() == group.category.as_deref()));
                seen.push(group.category.clone());
            }
            let counted: usize = rec.category_counts.iter().map(|c| c.count).sum();
            assert_eq!(counted, rec.total_count);
            assert_eq!(rec.courses().count(), rec.total_count);
        }
    }
}

#[test]
fn repeated_requests_are_identical() {
    let recommender = demo_recommender(RecommenderConfig::default());
    for keyword in KEYWORDS {
        let query = Query::new(*keyword);
        assert_eq!(recommender.recommend(&query), recommender.recommend(&query));
    }
}
