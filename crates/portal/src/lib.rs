#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Presentation controller for the zyntiq verification client
//!
//! Owns the session state (cached dataset, search mode, query text) and
//! moves the result panel through `idle -> loading -> results | not_found |
//! error`. Fetching goes through an injected [`DatasetSource`], output
//! through an injected [`View`].

mod state;
mod view;

pub use state::{AppState, PresentationState, SearchResolution, SearchTicket};
pub use view::View;

use tokio::time::Instant;
use tracing::{debug, info, warn};
use zyntiq_config::PortalConfig;
use zyntiq_events::{
    AppEvent, EventEmitter, EventMessage, EventSender, FailureContext, PortalEvent, SearchEvent,
};
use zyntiq_net::DatasetSource;
use zyntiq_types::{SearchMode, SearchQuery};

/// The verification page controller
pub struct Portal<S, V> {
    source: S,
    view: V,
    state: AppState,
    config: PortalConfig,
    tx: Option<EventSender>,
}

impl<S: DatasetSource, V: View> Portal<S, V> {
    /// Wire a controller to its data source and view; starts in `idle`
    pub fn new(source: S, mut view: V, config: PortalConfig) -> Self {
        let state = AppState::default();
        view.set_placeholder(state.mode.placeholder());
        view.render(&state.presentation);
        Self {
            source,
            view,
            state,
            config,
            tx: None,
        }
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn presentation(&self) -> &PresentationState {
        &self.state.presentation
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Number of cached records, if a dataset is cached
    #[must_use]
    pub fn member_count(&self) -> Option<usize> {
        self.state.dataset.as_ref().map(zyntiq_types::Dataset::len)
    }

    /// Best-effort preload on page load.
    ///
    /// A failure is reported and swallowed; the cache stays empty and the
    /// first search fetches again.
    pub async fn initialize(&mut self) {
        match self.source.fetch().await {
            Ok(dataset) => {
                if self.state.cache_if_empty(&dataset) {
                    info!(records = dataset.len(), "dataset preloaded");
                    self.tx.emit(AppEvent::Portal(PortalEvent::DatasetCached {
                        records: dataset.len(),
                    }));
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch initial data");
                self.tx.emit(AppEvent::Portal(PortalEvent::PreloadFailed {
                    failure: FailureContext::from_error(&e),
                }));
            }
        }
    }

    /// Mirror of the query input field
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.state.query_text = text.into();
    }

    /// Search submission (button or Enter).
    ///
    /// Blank input nudges the view and changes nothing else.
    pub async fn submit(&mut self) -> &PresentationState {
        match SearchQuery::new(self.state.mode, &self.state.query_text) {
            Ok(query) => self.run(query).await,
            Err(_) => {
                debug!(mode = %self.state.mode, "blank query rejected");
                self.tx.emit(AppEvent::Search(SearchEvent::Rejected {
                    mode: self.state.mode,
                }));
                self.view.nudge_invalid_input();
            }
        }
        &self.state.presentation
    }

    /// Select a search mode; clears the query and any result
    pub fn switch_mode(&mut self, mode: SearchMode) {
        self.state.mode = mode;
        // anything still in flight belongs to the old mode
        self.state.seq += 1;
        self.state.query_text.clear();
        self.view.set_placeholder(mode.placeholder());
        self.view.set_query_text("");
        self.transition(PresentationState::Idle);
        self.tx
            .emit(AppEvent::Portal(PortalEvent::ModeSwitched { mode }));
    }

    /// The retry affordance on the current card.
    ///
    /// From `error` the last search runs again. From `not_found` the query is
    /// cleared and the panel returns to `idle`. Otherwise nothing happens.
    pub async fn retry(&mut self) -> &PresentationState {
        match self.state.presentation {
            PresentationState::Error { .. } => match self.state.last_query.clone() {
                Some(query) => self.run(query).await,
                None => self.clear(),
            },
            PresentationState::NotFound { .. } => self.clear(),
            _ => {}
        }
        &self.state.presentation
    }

    /// Clear the query, focus the input and hide the result panel
    pub fn clear(&mut self) {
        self.state.query_text.clear();
        self.view.set_query_text("");
        self.view.focus_input();
        self.transition(PresentationState::Idle);
    }

    async fn run(&mut self, query: SearchQuery) {
        let ticket = self.begin_search(query);
        let resolution = self.resolve(ticket.query()).await;
        self.hold_loading(&ticket).await;
        self.complete(&ticket, resolution);
    }

    /// Enter `loading` for a query and issue its ticket
    pub fn begin_search(&mut self, query: SearchQuery) -> SearchTicket {
        self.state.seq += 1;
        let seq = self.state.seq;
        info!(seq, mode = %query.mode(), query = query.text(), "search submitted");
        self.emit_correlated(
            seq,
            AppEvent::Search(SearchEvent::Submitted {
                seq,
                mode: query.mode(),
                query: query.text().to_string(),
            }),
        );

        self.state.last_query = Some(query.clone());
        self.transition(PresentationState::Loading {
            mode: query.mode(),
            query: query.text().to_string(),
        });

        SearchTicket {
            seq,
            query,
            started: Instant::now(),
        }
    }

    /// Use the cached dataset, or fetch one, then run the engine
    pub async fn resolve(&mut self, query: &SearchQuery) -> SearchResolution {
        let dataset = if let Some(dataset) = &self.state.dataset {
            dataset.clone()
        } else {
            match self.source.fetch().await {
                Ok(dataset) => {
                    if self.state.cache_if_empty(&dataset) {
                        self.tx.emit(AppEvent::Portal(PortalEvent::DatasetCached {
                            records: dataset.len(),
                        }));
                    }
                    dataset
                }
                Err(e) => {
                    warn!(error = %e, "search fetch failed");
                    return SearchResolution::Failed(e);
                }
            }
        };

        SearchResolution::Searched(zyntiq_search::run(&dataset, query))
    }

    async fn hold_loading(&self, ticket: &SearchTicket) {
        let floor = self.config.min_loading();
        let elapsed = ticket.started.elapsed();
        if elapsed < floor {
            tokio::time::sleep(floor - elapsed).await;
        }
    }

    /// Apply a finished search. Returns `false` if a newer search or a mode
    /// switch superseded the ticket, in which case nothing changes.
    pub fn complete(&mut self, ticket: &SearchTicket, resolution: SearchResolution) -> bool {
        let latest = self.state.seq;
        if ticket.seq != latest {
            debug!(seq = ticket.seq, latest, "discarding stale search result");
            self.emit_correlated(
                ticket.seq,
                AppEvent::Search(SearchEvent::Discarded {
                    seq: ticket.seq,
                    latest,
                }),
            );
            return false;
        }

        if let SearchResolution::Searched(outcome) = &resolution {
            self.emit_correlated(
                ticket.seq,
                AppEvent::Search(SearchEvent::Completed {
                    seq: ticket.seq,
                    mode: ticket.query.mode(),
                    matches: outcome.match_count(),
                }),
            );
        }

        self.transition(PresentationState::from_resolution(&ticket.query, resolution));
        true
    }

    fn transition(&mut self, next: PresentationState) {
        let from = self.state.presentation.name();
        let to = next.name();
        self.state.presentation = next;
        self.view.render(&self.state.presentation);
        if from != to {
            self.tx.emit(AppEvent::Portal(PortalEvent::StateChanged {
                from: from.to_string(),
                to: to.to_string(),
            }));
        }
    }

    fn emit_correlated(&self, seq: u64, event: AppEvent) {
        self.tx
            .emit_message(EventMessage::correlated(event, seq.to_string()));
    }
}
