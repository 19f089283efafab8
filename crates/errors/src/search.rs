//! Search input error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Blank or whitespace-only input. Handled at the input layer and never
    /// shown as a result card.
    #[error("search query is empty")]
    EmptyQuery,

    #[error("unknown search mode: {value}")]
    UnknownMode { value: String },
}

impl UserFacingError for SearchError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::EmptyQuery => Some("Enter a UID or a name before searching."),
            Self::UnknownMode { .. } => Some("Use `uid` or `name` as the search mode."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::EmptyQuery => "search.empty_query",
            Self::UnknownMode { .. } => "search.unknown_mode",
        })
    }
}
