//! Shared demo catalog for tests, benches and local runs.
//!
//! The catalog is a CSV export with the course spreadsheet's Korean headers.

use once_cell::sync::Lazy;

/// Raw CSV text of the demo catalog
pub const DEMO_CATALOG_CSV: &str = include_str!("../data/courses.csv");

/// Category labels used by the demo catalog, in priority order
pub const DEMO_CATEGORIES: &[&str] =
    &["직무(무료)", "직무(유료)", "북러닝", "전화외국어", "외국어"];

/// Parsed demo rows (header excluded)
pub static DEMO_ROWS: Lazy<Vec<csv::StringRecord>> = Lazy::new(|| {
    csv::Reader::from_reader(DEMO_CATALOG_CSV.as_bytes())
        .records()
        .collect::<Result<_, _>>()
        .expect("demo catalog CSV is well-formed")
});

/// Demo CSV header row
pub fn demo_headers() -> csv::StringRecord {
    csv::Reader::from_reader(DEMO_CATALOG_CSV.as_bytes())
        .headers()
        .expect("demo catalog CSV has a header row")
        .clone()
}

/// Demo catalog repeated `times` over, for benchmarks. Course names get a
/// numeric suffix so copies stay distinguishable.
pub fn repeated_catalog_csv(times: usize) -> String {
    let headers = demo_headers();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers).expect("in-memory write");
    for copy in 0..times {
        for row in DEMO_ROWS.iter() {
            let mut fields: Vec<String> = row.iter().map(str::to_string).collect();
            fields[0] = format!("{} #{}", fields[0], copy);
            writer.write_record(&fields).expect("in-memory write");
        }
    }
    let bytes = writer.into_inner().expect("in-memory flush");
    String::from_utf8(bytes).expect("demo catalog is UTF-8")
}
