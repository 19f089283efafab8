//! Session state owned by the controller

use serde::Serialize;
use tokio::time::Instant;
use zyntiq_errors::Error;
use zyntiq_events::FailureContext;
use zyntiq_search::SearchOutcome;
use zyntiq_types::{Dataset, Record, SearchMode, SearchQuery};

/// What the result panel currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PresentationState {
    /// No result panel
    #[default]
    Idle,
    Loading {
        mode: SearchMode,
        query: String,
    },
    Results {
        mode: SearchMode,
        query: String,
        records: Vec<Record>,
    },
    NotFound {
        mode: SearchMode,
        query: String,
    },
    Error {
        mode: SearchMode,
        query: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
}

impl PresentationState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Results { .. } => "results",
            Self::NotFound { .. } => "not_found",
            Self::Error { .. } => "error",
        }
    }

    /// Results, not-found or error
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Results { .. } | Self::NotFound { .. } | Self::Error { .. }
        )
    }

    pub(crate) fn from_resolution(query: &SearchQuery, resolution: SearchResolution) -> Self {
        let mode = query.mode();
        match resolution {
            SearchResolution::Searched(SearchOutcome::Matches { records }) => Self::Results {
                mode,
                query: query.text().to_string(),
                records,
            },
            SearchResolution::Searched(SearchOutcome::NoMatch { query }) => {
                Self::NotFound { mode, query }
            }
            SearchResolution::Failed(error) => {
                let failure = FailureContext::from_error(&error);
                Self::Error {
                    mode,
                    query: query.text().to_string(),
                    message: failure.message,
                    hint: failure.hint,
                }
            }
        }
    }
}

/// How a search ended before it is applied to the view
#[derive(Debug, Clone)]
pub enum SearchResolution {
    Searched(SearchOutcome),
    /// The dataset could not be fetched
    Failed(Error),
}

/// Handle for one in-flight search.
///
/// Only the ticket carrying the latest sequence number may change what the
/// view shows.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub(crate) seq: u64,
    pub(crate) query: SearchQuery,
    pub(crate) started: Instant,
}

impl SearchTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// Everything the page session remembers
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(crate) dataset: Option<Dataset>,
    pub(crate) mode: SearchMode,
    pub(crate) query_text: String,
    pub(crate) presentation: PresentationState,
    pub(crate) last_query: Option<SearchQuery>,
    pub(crate) seq: u64,
}

impl AppState {
    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    #[must_use]
    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    #[must_use]
    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }

    /// Latest issued search sequence number
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Cache a dataset unless one is already cached
    pub(crate) fn cache_if_empty(&mut self, dataset: &Dataset) -> bool {
        if self.dataset.is_some() {
            return false;
        }
        self.dataset = Some(dataset.clone());
        true
    }
}
