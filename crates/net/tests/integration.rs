//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use zyntiq_errors::{Error, NetworkError};
    use zyntiq_events::{channel, AppEvent, FetchEvent};
    use zyntiq_net::*;

    const BODY: &str = r#"[
        {"uid": "ZYNTIQ-75050", "name": "Jane Doe", "email": "jane@example.com", "date": "5/3/2024"},
        {"uid": "ZYNTIQ-10001", "name": "John Roe", "date": "17/11/2023"}
    ]"#;

    #[tokio::test]
    async fn test_fetch_dataset() {
        let server = MockServer::start();
        let (tx, mut rx) = channel();

        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/sheet");
            then.status(200)
                .header("content-type", "application/json")
                .body(BODY);
        });

        let client = NetClient::with_defaults().unwrap();
        let dataset = fetch_dataset(&client, &server.url("/api/v1/sheet"), Some(&tx))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].name(), Some("Jane Doe"));

        let mut saw_start = false;
        let mut saw_complete = false;
        while let Ok(message) = rx.try_recv() {
            match message.event {
                AppEvent::Fetch(FetchEvent::Started { .. }) => saw_start = true,
                AppEvent::Fetch(FetchEvent::Completed { records, .. }) => {
                    assert_eq!(records, 2);
                    saw_complete = true;
                }
                _ => {}
            }
        }
        assert!(saw_start);
        assert!(saw_complete);
    }

    #[tokio::test]
    async fn test_http_error_handling() {
        let server = MockServer::start();
        let (tx, mut rx) = channel();

        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("Not Found");
        });

        let client = NetClient::with_defaults().unwrap();
        let error = fetch_dataset(&client, &server.url("/missing"), Some(&tx))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            Error::Network(NetworkError::HttpError { status: 404, .. })
        ));

        let mut saw_failed = false;
        while let Ok(message) = rx.try_recv() {
            if let AppEvent::Fetch(FetchEvent::Failed { failure, .. }) = message.event {
                assert_eq!(failure.code.as_deref(), Some("network.http_error"));
                saw_failed = true;
            }
        }
        assert!(saw_failed);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(200).body(r#"{"error": "sheet not found"}"#);
        });

        let client = NetClient::with_defaults().unwrap();
        let error = fetch_dataset(&client, &server.url("/broken"), None)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            Error::Network(NetworkError::InvalidBody { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Nothing listens on port 9 locally
        let client = NetClient::with_defaults().unwrap();
        let error = fetch_dataset(&client, "http://127.0.0.1:9/api", None)
            .await
            .unwrap_err();
        assert!(error.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_http_dataset_source() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET).path("/records");
            then.status(200).body("[]");
        });

        let client = NetClient::with_defaults().unwrap();
        let source = HttpDatasetSource::new(client, &server.url("/records")).unwrap();
        let dataset = source.fetch().await.unwrap();

        mock.assert();
        assert!(dataset.is_empty());
    }
}
