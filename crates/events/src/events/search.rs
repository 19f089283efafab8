use serde::{Deserialize, Serialize};
use zyntiq_types::SearchMode;

/// Search submissions and their outcomes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SearchEvent {
    /// A non-blank query was accepted and the loading state entered
    Submitted {
        seq: u64,
        mode: SearchMode,
        query: String,
    },

    /// Blank input was rejected at the input layer
    Rejected { mode: SearchMode },

    /// The engine finished; `matches` may be zero
    Completed {
        seq: u64,
        mode: SearchMode,
        matches: usize,
    },

    /// A newer search superseded this one before it resolved
    Discarded { seq: u64, latest: u64 },
}
