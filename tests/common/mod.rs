pub mod fixtures;

use chrono::NaiveDate;
use quizzer::{Document, FixedClock, NavigationEntry, QuizSession, SessionBuilder, SessionClock};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A clock starting at 2024-06-03 14:00:00 that advances one millisecond
/// per reading.
pub fn test_clock() -> Arc<dyn SessionClock> {
    let start = NaiveDate::from_ymd_opt(2024, 6, 3)
        .and_then(|d| d.and_hms_opt(14, 0, 0))
        .expect("valid test date");
    Arc::new(FixedClock::new(start, chrono::Duration::milliseconds(1)).with_username("radiologist"))
}

/// Builds an in-memory session over `xml`.
pub fn session_from(xml: &str) -> Result<QuizSession, quizzer::QuizError> {
    let _ = env_logger::builder().is_test(true).try_init();
    SessionBuilder::new()
        .with_document_source(xml)
        .with_clock(test_clock())
        .build()
}

/// IDs of the pages behind each navigation entry.
pub fn page_ids(doc: &Document, navigation: &[NavigationEntry]) -> Vec<String> {
    navigation
        .iter()
        .filter_map(|entry| quizzer::navigation::page_for_entry(doc, entry))
        .map(|page| doc.attribute_or_empty(page, "ID").to_string())
        .collect()
}
