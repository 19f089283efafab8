//! Search mode and validated search query

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zyntiq_errors::SearchError;

/// Selector between exact-identifier and substring-name matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Exact, case-insensitive match on the unique identifier
    #[default]
    Uid,
    /// Case-insensitive substring match on the full name
    Name,
}

impl SearchMode {
    /// Input placeholder shown while this mode is active
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Uid => "Enter your UID (e.g., ZYNTIQ-75050)",
            Self::Name => "Enter your full name",
        }
    }

    /// Noun used when asking the user to check their input
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Uid => "UID",
            Self::Name => "name",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uid => "uid",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uid" | "id" | "by-identifier" => Ok(Self::Uid),
            "name" | "by-name" => Ok(Self::Name),
            _ => Err(SearchError::UnknownMode {
                value: s.to_string(),
            }),
        }
    }
}

/// A user-entered query bound to the mode it was submitted in.
///
/// The text is trimmed and never blank, so holding a `SearchQuery` means the
/// input layer has already accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    mode: SearchMode,
    text: String,
}

impl SearchQuery {
    /// Validate raw input into a query
    ///
    /// # Errors
    ///
    /// Returns `SearchError::EmptyQuery` if the input is empty or whitespace.
    pub fn new(mode: SearchMode, raw: &str) -> Result<Self, SearchError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Self {
            mode,
            text: text.to_string(),
        })
    }

    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
