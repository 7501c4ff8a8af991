//! Catalog loading from spreadsheet exports
//!
//! CSV (with either English or the original Korean headers) and JSON arrays of
//! records. Every loader returns normalized records in file order.

use crate::interface::RecommendError;
use crate::models::{normalize_catalog, CourseRecord};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub type CatalogResult<T> = Result<T, RecommendError>;

/// Load a catalog file, choosing the format from its extension.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> CatalogResult<Vec<CourseRecord>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let reader = BufReader::new(File::open(path)?);
    let records = match extension.as_str() {
        "csv" => read_csv_catalog(reader)?,
        "json" => read_json_catalog(reader)?,
        other => return Err(RecommendError::UnsupportedCatalogFormat(other.to_string())),
    };

    tracing::info!(
        path = %path.display(),
        courses = records.len(),
        categories = category_vocabulary(&records).len(),
        "Loaded course catalog",
    );
    Ok(records)
}

/// Parse CSV with a header row. Unknown columns are ignored, a leading BOM is
/// tolerated, and rows may be shorter than the header.
pub fn read_csv_catalog<R: Read>(reader: R) -> CatalogResult<Vec<CourseRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    // Excel's UTF-8 CSV export prefixes a BOM onto the first header
    let headers = csv_reader.headers()?.clone();
    let cleaned: csv::StringRecord = headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}'))
        .collect();
    csv_reader.set_headers(cleaned);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CourseRecord>() {
        records.push(row?);
    }
    Ok(normalize_catalog(records))
}

/// Parse a JSON array of records
pub fn read_json_catalog<R: Read>(reader: R) -> CatalogResult<Vec<CourseRecord>> {
    let records: Vec<CourseRecord> = serde_json::from_reader(reader)?;
    Ok(normalize_catalog(records))
}

/// Distinct category labels in first-appearance order
pub fn category_vocabulary(records: &[CourseRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(CourseRecord::category_label)
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}
