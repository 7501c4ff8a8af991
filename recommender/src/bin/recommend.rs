//! Run a single recommendation request against a catalog export
//!
//! Usage:
//!     cargo run --bin recommend -- --catalog courses.csv --keyword "AI 디자인" --category "직무(무료)"
//!     cargo run --bin recommend -- --demo --keyword 엑셀
//!
//! Prints the outcome as JSON on stdout. Logs go to stderr (`-v`, or `RUST_LOG`).

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use course_recommender::catalog::{load_catalog, read_csv_catalog};
use course_recommender::config::{EmptyQueryPolicy, RecommenderConfig};
use course_recommender::models::CourseRecord;
use course_recommender::tokenizer::{AnalyzerTokenizer, LiteralOnlyTokenizer, MorphemeTokenizer};
use course_recommender::{CourseRecommender, CourseRecommenderApi, Query};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_LOGGING_CONFIG: &str = "warn";
const VERBOSE_LOGGING_CONFIG: &str = "debug";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["catalog", "demo"])))]
struct Args {
    /// Catalog export (.csv or .json)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Use the bundled demo catalog
    #[arg(long)]
    demo: bool,

    /// Interest keyword
    #[arg(short, long, default_value = "")]
    keyword: String,

    /// Category filter, repeatable
    #[arg(short = 'g', long = "category")]
    categories: Vec<String>,

    /// Recommender config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum relevance score (overrides config)
    #[arg(long)]
    min_score: Option<u32>,

    /// Return the whole catalog when neither keyword nor category is given
    #[arg(long)]
    show_all_when_empty: bool,

    /// Match on the literal keyword only, without sub-word expansion
    #[arg(long)]
    no_tokenizer: bool,

    /// List the catalog's categories and exit
    #[arg(long)]
    list_categories: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn configure_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG takes precedence over -v
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match verbosity {
            0 => EnvFilter::new(DEFAULT_LOGGING_CONFIG),
            _ => EnvFilter::new(VERBOSE_LOGGING_CONFIG),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<RecommenderConfig> {
    let mut config = match &args.config {
        Some(path) => RecommenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => RecommenderConfig::default(),
    };
    if let Some(min_score) = args.min_score {
        config = config.with_min_score(min_score);
    }
    if args.show_all_when_empty {
        config = config.with_empty_query_policy(EmptyQueryPolicy::ShowAll);
    }
    Ok(config)
}

fn load_records(args: &Args) -> Result<Vec<CourseRecord>> {
    if args.demo {
        return read_csv_catalog(demo_data::DEMO_CATALOG_CSV.as_bytes())
            .context("Failed to parse demo catalog");
    }
    let path = args.catalog.as_deref().context("Either --catalog or --demo is required")?;
    load_catalog(path).with_context(|| format!("Failed to load catalog {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    configure_logging(args.verbose);

    let config = build_config(&args)?;
    let records = load_records(&args)?;

    let tokenizer: Arc<dyn MorphemeTokenizer> = if args.no_tokenizer {
        Arc::new(LiteralOnlyTokenizer)
    } else {
        Arc::new(AnalyzerTokenizer::simple())
    };
    let recommender = CourseRecommender::new(records, tokenizer, config);

    if args.list_categories {
        println!("{}", serde_json::to_string_pretty(&recommender.categories())?);
        return Ok(());
    }

    let query = Query::new(args.keyword.as_str()).with_categories(args.categories.iter().cloned());
    let outcome = recommender.recommend(&query);
    if let Some(notice) = outcome.notice() {
        eprintln!("{}", notice);
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
