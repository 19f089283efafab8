use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Dataset fetch lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FetchEvent {
    Started {
        url: String,
    },

    Completed {
        url: String,
        records: usize,
        elapsed_ms: u64,
    },

    Failed {
        url: String,
        failure: FailureContext,
    },
}
