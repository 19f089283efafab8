#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Record matching and date presentation for zyntiq
//!
//! The dataset is small enough to scan linearly on every query: no index,
//! no ranking, no fuzzy matching.

mod date;

pub use date::format_registration_date;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zyntiq_types::{Dataset, Record, SearchMode, SearchQuery};

/// Result of running a query against a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// At least one record matched, in dataset order
    Matches { records: Vec<Record> },
    /// A well-formed search that matched nothing
    NoMatch { query: String },
}

impl SearchOutcome {
    #[must_use]
    pub fn match_count(&self) -> usize {
        match self {
            Self::Matches { records } => records.len(),
            Self::NoMatch { .. } => 0,
        }
    }
}

/// Whether a single record satisfies the query
#[must_use]
pub fn matches(record: &Record, query: &SearchQuery) -> bool {
    is_match(record, query.mode(), &query.text().to_lowercase())
}

fn is_match(record: &Record, mode: SearchMode, needle: &str) -> bool {
    match mode {
        SearchMode::Uid => record.uid().is_some_and(|uid| uid.to_lowercase() == needle),
        SearchMode::Name => record
            .name()
            .is_some_and(|name| name.to_lowercase().contains(needle)),
    }
}

/// Filter the dataset, preserving its order
#[must_use]
pub fn search(dataset: &Dataset, query: &SearchQuery) -> Vec<Record> {
    let needle = query.text().to_lowercase();
    let hits: Vec<Record> = dataset
        .iter()
        .filter(|record| is_match(record, query.mode(), &needle))
        .cloned()
        .collect();

    debug!(
        mode = %query.mode(),
        scanned = dataset.len(),
        hits = hits.len(),
        "search finished"
    );
    hits
}

/// Run a query and classify the result
#[must_use]
pub fn run(dataset: &Dataset, query: &SearchQuery) -> SearchOutcome {
    let records = search(dataset, query);
    if records.is_empty() {
        SearchOutcome::NoMatch {
            query: query.text().to_string(),
        }
    } else {
        SearchOutcome::Matches { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Record::new("ZYNTIQ-75050", "Jane Doe").with_date("5/3/2024"),
            Record::new("ZYNTIQ-10001", "John Doeman"),
            Record {
                name: Some("Nameless Uid".into()),
                ..Record::default()
            },
            Record {
                uid: Some("ZYNTIQ-99999".into()),
                ..Record::default()
            },
        ])
    }

    fn query(mode: SearchMode, text: &str) -> SearchQuery {
        SearchQuery::new(mode, text).unwrap()
    }

    #[test]
    fn test_uid_exact_case_insensitive() {
        let hits = search(&dataset(), &query(SearchMode::Uid, "zyntiq-75050"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), Some("Jane Doe"));
    }

    #[test]
    fn test_uid_is_not_substring() {
        assert!(search(&dataset(), &query(SearchMode::Uid, "ZYNTIQ")).is_empty());
        assert!(search(&dataset(), &query(SearchMode::Uid, "75050")).is_empty());
    }

    #[test]
    fn test_name_substring_preserves_order() {
        let hits = search(&dataset(), &query(SearchMode::Name, "DOE"));
        let names: Vec<_> = hits.iter().filter_map(Record::name).collect();
        assert_eq!(names, vec!["Jane Doe", "John Doeman"]);
    }

    #[test]
    fn test_missing_fields_never_match() {
        // record 3 has no uid, record 4 has no name
        assert!(search(&dataset(), &query(SearchMode::Name, "ZYNTIQ-99999")).is_empty());
        let hits = search(&dataset(), &query(SearchMode::Name, "uid"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].uid(), None);
    }

    #[test]
    fn test_run_classifies_no_match() {
        let outcome = run(&dataset(), &query(SearchMode::Uid, "nobody"));
        assert_eq!(
            outcome,
            SearchOutcome::NoMatch {
                query: "nobody".into()
            }
        );
        assert_eq!(outcome.match_count(), 0);
    }

    #[test]
    fn test_matches_single_record() {
        let record = Record::new("ZYNTIQ-75050", "Jane Doe");
        assert!(matches(&record, &query(SearchMode::Uid, "Zyntiq-75050")));
        assert!(matches(&record, &query(SearchMode::Name, "ne d")));
        assert!(!matches(&record, &query(SearchMode::Name, "john")));
    }
}
