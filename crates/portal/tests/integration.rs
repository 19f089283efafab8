//! Integration tests for the presentation controller

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::{Duration, Instant};
    use zyntiq_config::PortalConfig;
    use zyntiq_errors::{Error, NetworkError};
    use zyntiq_events::{channel, AppEvent, SearchEvent};
    use zyntiq_net::DatasetSource;
    use zyntiq_portal::*;
    use zyntiq_search::SearchOutcome;
    use zyntiq_types::{Dataset, Record, SearchMode, SearchQuery};

    /// Replays scripted fetch results, then keeps failing
    #[derive(Clone, Default)]
    struct ScriptedSource {
        responses: Arc<Mutex<VecDeque<Result<Dataset, Error>>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Dataset, Error>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses.into())),
                calls: Arc::default(),
            }
        }

        fn always(dataset: Dataset) -> Self {
            Self::new((0..8).map(|_| Ok(dataset.clone())).collect())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DatasetSource for ScriptedSource {
        async fn fetch(&self) -> Result<Dataset, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(offline()))
        }
    }

    fn offline() -> Error {
        NetworkError::ConnectionRefused("offline".into()).into()
    }

    #[derive(Default)]
    struct RecordingView {
        renders: Vec<PresentationState>,
        query_text: String,
        placeholder: String,
        nudges: usize,
        focused: usize,
    }

    impl RecordingView {
        fn names(&self) -> Vec<&'static str> {
            self.renders.iter().map(PresentationState::name).collect()
        }
    }

    impl View for RecordingView {
        fn render(&mut self, state: &PresentationState) {
            self.renders.push(state.clone());
        }

        fn set_query_text(&mut self, text: &str) {
            self.query_text = text.to_string();
        }

        fn set_placeholder(&mut self, placeholder: &str) {
            self.placeholder = placeholder.to_string();
        }

        fn nudge_invalid_input(&mut self) {
            self.nudges += 1;
        }

        fn focus_input(&mut self) {
            self.focused += 1;
        }
    }

    fn jane() -> Dataset {
        Dataset::new(vec![Record::new("ZYNTIQ-75050", "Jane Doe").with_date("5/3/2024")])
    }

    fn config() -> PortalConfig {
        PortalConfig { min_loading_ms: 800 }
    }

    fn portal(source: ScriptedSource) -> Portal<ScriptedSource, RecordingView> {
        Portal::new(source, RecordingView::default(), config())
    }

    #[tokio::test(start_paused = true)]
    async fn test_uid_search_end_to_end() {
        let mut portal = portal(ScriptedSource::always(jane()));
        portal.initialize().await;
        assert_eq!(portal.member_count(), Some(1));

        portal.set_query_text("zyntiq-75050");
        let state = portal.submit().await.clone();

        let PresentationState::Results { records, mode, .. } = state else {
            panic!("expected results");
        };
        assert_eq!(mode, SearchMode::Uid);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), Some("Jane Doe"));
        assert_eq!(portal.view().names(), vec!["idle", "loading", "results"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_name_search_end_to_end() {
        let mut portal = portal(ScriptedSource::always(jane()));
        portal.initialize().await;

        portal.switch_mode(SearchMode::Name);
        portal.set_query_text("doe");
        let state = portal.submit().await;

        assert!(matches!(state, PresentationState::Results { records, .. } if records.len() == 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_match_is_not_found_not_error() {
        let mut portal = portal(ScriptedSource::always(jane()));
        portal.initialize().await;

        portal.set_query_text("nobody");
        let state = portal.submit().await;

        assert_eq!(
            state,
            &PresentationState::NotFound {
                mode: SearchMode::Uid,
                query: "nobody".into()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_stays_idle_without_fetching() {
        let source = ScriptedSource::always(jane());
        let mut portal = portal(source.clone());

        portal.set_query_text("   ");
        let state = portal.submit().await;

        assert_eq!(state, &PresentationState::Idle);
        assert_eq!(portal.view().nudges, 1);
        assert_eq!(portal.view().names(), vec!["idle"]);
        assert_eq!(source.calls(), 0);
        assert_eq!(portal.state().seq(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_during_search_is_error() {
        let mut portal = portal(ScriptedSource::new(vec![]));
        portal.initialize().await;
        assert_eq!(portal.member_count(), None);

        portal.set_query_text("ZYNTIQ-75050");
        let state = portal.submit().await;

        assert!(matches!(state, PresentationState::Error { query, .. } if query == "ZYNTIQ-75050"));
        assert!(!portal.view().names().contains(&"results"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_preload_fetches_lazily() {
        let source = ScriptedSource::new(vec![Err(offline()), Ok(jane())]);
        let mut portal = portal(source.clone());
        portal.initialize().await;
        assert_eq!(portal.member_count(), None);

        portal.set_query_text("ZYNTIQ-75050");
        portal.submit().await;

        assert_eq!(portal.presentation().name(), "results");
        assert_eq!(portal.member_count(), Some(1));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_dataset_is_reused() {
        let source = ScriptedSource::always(jane());
        let mut portal = portal(source.clone());
        portal.initialize().await;

        portal.set_query_text("ZYNTIQ-75050");
        portal.submit().await;
        portal.set_query_text("nobody");
        portal.submit().await;

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_mode_clears_query_and_result() {
        let mut portal = portal(ScriptedSource::always(jane()));
        portal.initialize().await;
        portal.set_query_text("ZYNTIQ-75050");
        portal.submit().await;
        assert_eq!(portal.presentation().name(), "results");

        portal.switch_mode(SearchMode::Name);

        assert_eq!(portal.presentation(), &PresentationState::Idle);
        assert_eq!(portal.state().query_text(), "");
        assert_eq!(portal.state().mode(), SearchMode::Name);
        assert_eq!(portal.view().query_text, "");
        assert_eq!(portal.view().placeholder, "Enter your full name");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_error_reruns_last_search() {
        let source = ScriptedSource::new(vec![Err(offline()), Err(offline()), Ok(jane())]);
        let mut portal = portal(source.clone());
        portal.initialize().await;

        portal.set_query_text("ZYNTIQ-75050");
        portal.submit().await;
        assert_eq!(portal.presentation().name(), "error");

        let state = portal.retry().await;
        assert_eq!(state.name(), "results");
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_not_found_clears() {
        let mut portal = portal(ScriptedSource::always(jane()));
        portal.initialize().await;
        portal.set_query_text("nobody");
        portal.submit().await;

        let state = portal.retry().await;
        assert_eq!(state, &PresentationState::Idle);
        assert_eq!(portal.state().query_text(), "");
        assert_eq!(portal.view().focused, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_from_idle_is_noop() {
        let source = ScriptedSource::always(jane());
        let mut portal = portal(source.clone());
        let state = portal.retry().await;
        assert_eq!(state, &PresentationState::Idle);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticket_is_discarded() {
        let (tx, mut rx) = channel();
        let mut portal = portal(ScriptedSource::always(jane())).with_event_sender(tx);

        let first = portal.begin_search(SearchQuery::new(SearchMode::Uid, "old").unwrap());
        let second =
            portal.begin_search(SearchQuery::new(SearchMode::Uid, "ZYNTIQ-75050").unwrap());
        assert!(second.seq() > first.seq());

        let applied = portal.complete(
            &first,
            SearchResolution::Searched(SearchOutcome::NoMatch {
                query: "old".into(),
            }),
        );
        assert!(!applied);
        assert_eq!(portal.presentation().name(), "loading");

        let resolution = portal.resolve(second.query()).await;
        assert!(portal.complete(&second, resolution));
        assert_eq!(portal.presentation().name(), "results");

        let mut discarded = false;
        while let Ok(message) = rx.try_recv() {
            if let AppEvent::Search(SearchEvent::Discarded { seq, latest }) = message.event {
                assert_eq!(seq, first.seq());
                assert_eq!(latest, second.seq());
                assert_eq!(message.meta.correlation_id, Some(seq.to_string()));
                discarded = true;
            }
        }
        assert!(discarded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_switch_invalidates_in_flight_search() {
        let mut portal = portal(ScriptedSource::always(jane()));
        let ticket =
            portal.begin_search(SearchQuery::new(SearchMode::Uid, "ZYNTIQ-75050").unwrap());
        let resolution = portal.resolve(ticket.query()).await;

        portal.switch_mode(SearchMode::Name);

        assert!(!portal.complete(&ticket, resolution));
        assert_eq!(portal.presentation(), &PresentationState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_floor() {
        let mut portal = portal(ScriptedSource::always(jane()));
        portal.initialize().await;
        portal.set_query_text("ZYNTIQ-75050");

        let started = Instant::now();
        portal.submit().await;
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_floor_can_be_disabled() {
        let mut portal = Portal::new(
            ScriptedSource::always(jane()),
            RecordingView::default(),
            PortalConfig { min_loading_ms: 0 },
        );
        portal.initialize().await;
        portal.set_query_text("ZYNTIQ-75050");

        let started = Instant::now();
        portal.submit().await;
        assert!(started.elapsed() < Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_events_are_correlated() {
        let (tx, mut rx) = channel();
        let mut portal = portal(ScriptedSource::always(jane())).with_event_sender(tx);
        portal.initialize().await;
        portal.set_query_text("ZYNTIQ-75050");
        portal.submit().await;

        let mut submitted = None;
        let mut completed = None;
        while let Ok(message) = rx.try_recv() {
            match message.event {
                AppEvent::Search(SearchEvent::Submitted { seq, .. }) => {
                    submitted = message.meta.correlation_id.clone().map(|c| (c, seq));
                }
                AppEvent::Search(SearchEvent::Completed { seq, matches, .. }) => {
                    assert_eq!(matches, 1);
                    completed = message.meta.correlation_id.clone().map(|c| (c, seq));
                }
                _ => {}
            }
        }
        assert_eq!(submitted, completed);
        assert_eq!(submitted, Some(("1".to_string(), 1)));
    }

    #[test]
    fn test_presentation_state_json() {
        let state = PresentationState::NotFound {
            mode: SearchMode::Name,
            query: "nobody".into(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "not_found");
        assert_eq!(json["mode"], "name");
        assert_eq!(json["query"], "nobody");
    }
}
