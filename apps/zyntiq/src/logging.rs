//! Structured logging integration for events
//!
//! Converts domain events into tracing records with structured fields so
//! that `--debug` log files carry the whole search lifecycle.

use tracing::{debug, error, info, warn};
use zyntiq_events::{AppEvent, EventMessage, FetchEvent, OperationEvent, PortalEvent, SearchEvent};

/// Log an `AppEvent` at its level with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;
    match event {
        AppEvent::Fetch(fetch_event) => match fetch_event {
            FetchEvent::Started { url } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    url = %url,
                    "Fetch started"
                );
            }
            FetchEvent::Completed {
                url,
                records,
                elapsed_ms,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    url = %url,
                    records = records,
                    elapsed_ms = elapsed_ms,
                    "Fetch completed"
                );
            }
            FetchEvent::Failed { url, failure } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    url = %url,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Fetch failed"
                );
            }
        },

        AppEvent::Search(search_event) => match search_event {
            SearchEvent::Submitted { seq, mode, query } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    seq = seq,
                    mode = %mode,
                    query = %query,
                    "Search submitted"
                );
            }
            SearchEvent::Rejected { mode } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    mode = %mode,
                    "Blank query rejected"
                );
            }
            SearchEvent::Completed { seq, mode, matches } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    seq = seq,
                    mode = %mode,
                    matches = matches,
                    "Search completed"
                );
            }
            SearchEvent::Discarded { seq, latest } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    seq = seq,
                    latest = latest,
                    "Stale search result discarded"
                );
            }
        },

        AppEvent::Portal(portal_event) => match portal_event {
            PortalEvent::StateChanged { from, to } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    from = %from,
                    to = %to,
                    "Presentation state changed"
                );
            }
            PortalEvent::ModeSwitched { mode } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    mode = %mode,
                    "Search mode switched"
                );
            }
            PortalEvent::DatasetCached { records } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    records = records,
                    "Member data cached"
                );
            }
            PortalEvent::PreloadFailed { failure } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    code = ?failure.code,
                    message = %failure.message,
                    "Member data preload failed"
                );
            }
        },

        AppEvent::Operation(operation_event) => match operation_event {
            OperationEvent::Started { operation } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation = %operation,
                    "Operation started"
                );
            }
            OperationEvent::Completed {
                operation,
                success: true,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation = %operation,
                    "Operation completed"
                );
            }
            OperationEvent::Completed {
                operation,
                success: false,
            } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation = %operation,
                    "Operation failed"
                );
            }
        },
    }
}
