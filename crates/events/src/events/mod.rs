use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventSource};
use zyntiq_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

pub mod fetch;
pub mod operation;
pub mod portal;
pub mod search;

pub use fetch::*;
pub use operation::*;
pub use portal::*;
pub use search::*;

/// Top-level application event enum that aggregates all domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    Operation(OperationEvent),
    Fetch(FetchEvent),
    Search(SearchEvent),
    Portal(PortalEvent),
}

impl AppEvent {
    /// Identify the source domain for this event
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::Operation(_) => EventSource::OPERATION,
            Self::Fetch(_) => EventSource::FETCH,
            Self::Search(_) => EventSource::SEARCH,
            Self::Portal(_) => EventSource::PORTAL,
        }
    }

    /// Severity this event is logged at
    #[must_use]
    pub fn log_level(&self) -> EventLevel {
        match self {
            Self::Fetch(FetchEvent::Failed { .. }) => EventLevel::Error,

            Self::Operation(OperationEvent::Completed { success: false, .. })
            | Self::Portal(PortalEvent::PreloadFailed { .. }) => EventLevel::Warn,

            Self::Search(SearchEvent::Rejected { .. } | SearchEvent::Discarded { .. })
            | Self::Portal(PortalEvent::StateChanged { .. }) => EventLevel::Debug,

            _ => EventLevel::Info,
        }
    }
}
