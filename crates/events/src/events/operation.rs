use serde::{Deserialize, Serialize};

/// Start and end of a top-level command (`verify`, `interactive`, `count`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperationEvent {
    Started { operation: String },
    Completed { operation: String, success: bool },
}
