use serde::{Deserialize, Serialize};
use zyntiq_types::SearchMode;

use super::FailureContext;

/// Presentation controller transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PortalEvent {
    StateChanged {
        from: String,
        to: String,
    },

    ModeSwitched {
        mode: SearchMode,
    },

    /// A fetched dataset became the session cache
    DatasetCached {
        records: usize,
    },

    /// Page-load preload failed; the cache stays empty until the first search
    PreloadFailed {
        failure: FailureContext,
    },
}
