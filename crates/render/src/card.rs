//! Content model for the result panel

use serde::Serialize;
use zyntiq_portal::PresentationState;
use zyntiq_search::format_registration_date;
use zyntiq_types::{Record, SearchMode};

const MISSING: &str = "N/A";

/// One labelled value on a verified card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Button shown at the bottom of an informational card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardAction {
    /// Clear the query and go back to idle
    TryAgain,
    /// Run the same search again
    Retry,
}

impl CardAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TryAgain => "Try Again",
            Self::Retry => "Retry",
        }
    }
}

/// A block in the result panel. Text is unescaped here; output backends
/// escape as their format requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "card", rename_all = "snake_case")]
pub enum Card {
    Verified {
        title: String,
        fields: Vec<Field>,
    },
    NotFound {
        query: String,
        mode: SearchMode,
    },
    ConnectionError,
}

impl Card {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Verified { title, .. } => title,
            Self::NotFound { .. } => "No Record Found",
            Self::ConnectionError => "Connection Error",
        }
    }

    #[must_use]
    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Verified { .. } => "Verified Zyntiq Member",
            Self::NotFound { .. } => "We couldn't find any matching credentials",
            Self::ConnectionError => "Unable to verify at this moment",
        }
    }

    /// Badge text; the connection error card has none
    #[must_use]
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Self::Verified { .. } => Some("Verified"),
            Self::NotFound { .. } => Some("Not Found"),
            Self::ConnectionError => None,
        }
    }

    /// Body paragraph for informational cards
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Verified { .. } => None,
            Self::NotFound { query, mode } => Some(format!(
                "No record was found for \"{query}\". Please check your {} and try again.",
                mode.noun()
            )),
            Self::ConnectionError => Some(
                "We're having trouble connecting to our servers. Please check your internet connection and try again."
                    .to_string(),
            ),
        }
    }

    #[must_use]
    pub fn action(&self) -> Option<CardAction> {
        match self {
            Self::Verified { .. } => None,
            Self::NotFound { .. } => Some(CardAction::TryAgain),
            Self::ConnectionError => Some(CardAction::Retry),
        }
    }
}

/// Build the card for one matched record
#[must_use]
pub fn verified_card(record: &Record) -> Card {
    let name = record.name().unwrap_or(MISSING);

    let mut fields = vec![Field::new("Full Name", name)];
    if let Some(email) = record.email() {
        fields.push(Field::new("Email Address", email));
    }
    fields.push(Field::new("Unique ID", record.uid().unwrap_or(MISSING)));
    fields.push(Field::new(
        "Registration Date",
        record
            .date()
            .map_or_else(|| MISSING.to_string(), format_registration_date),
    ));

    Card::Verified {
        title: name.to_string(),
        fields,
    }
}

/// Project a presentation state into cards; idle and loading have none
#[must_use]
pub fn cards_for(state: &PresentationState) -> Vec<Card> {
    match state {
        PresentationState::Idle | PresentationState::Loading { .. } => Vec::new(),
        PresentationState::Results { records, .. } => records.iter().map(verified_card).collect(),
        PresentationState::NotFound { mode, query } => vec![Card::NotFound {
            query: query.clone(),
            mode: *mode,
        }],
        PresentationState::Error { .. } => vec![Card::ConnectionError],
    }
}
