//! # Integration Tests
//!
//! End-to-end tests against an in-process mock hub.
//!
//! Covers:
//! - Wire shape of the four hub operations
//! - Status-to-outcome mapping, including the soft-fail paths
//! - Reconciliation diff and fire-and-forget deletes

#[cfg(test)]
mod mock_hub {
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::body::Body;
    use axum::extract::{Request, State};
    use axum::response::Response;
    use axum::Router;

    /// One request as the hub saw it
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: String,
        pub path: String,
        pub query: HashMap<String, String>,
        pub headers: HashMap<String, String>,
        pub body: Vec<u8>,
    }

    impl RecordedRequest {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers.get(name).map(String::as_str)
        }
    }

    /// Maps each incoming request to (status, body)
    pub type Responder = Arc<dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync>;

    type SharedRequests = Arc<Mutex<Vec<RecordedRequest>>>;

    /// In-process hub double recording everything it receives
    pub struct MockHub {
        requests: SharedRequests,
        addr: SocketAddr,
    }

    impl MockHub {
        /// Spawn a hub answering every request through `responder`
        pub async fn spawn(responder: Responder) -> Self {
            let requests: SharedRequests = Arc::new(Mutex::new(Vec::new()));
            let router = Router::new()
                .fallback(record)
                .with_state((Arc::clone(&requests), responder));

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });

            Self { requests, addr }
        }

        /// Spawn a hub answering every request with a fixed status and body
        pub async fn spawn_fixed(status: u16, body: &str) -> Self {
            let body = body.to_string();
            Self::spawn(Arc::new(move |_| (status, body.clone()))).await
        }

        pub fn address(&self) -> String {
            format!("http://{}", self.addr)
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Poll until a request matches, or panic after two seconds
        pub async fn wait_for<F>(&self, predicate: F) -> RecordedRequest
        where
            F: Fn(&RecordedRequest) -> bool,
        {
            for _ in 0..200 {
                if let Some(request) = self.requests().into_iter().find(|r| predicate(r)) {
                    return request;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            panic!("no matching request arrived; saw: {:?}", self.requests());
        }
    }

    async fn record(
        State((requests, responder)): State<(SharedRequests, Responder)>,
        request: Request,
    ) -> Response {
        let (parts, body) = request.into_parts();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .unwrap_or_default();

        let query = parts
            .uri
            .query()
            .map(|q| {
                q.split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        let headers = parts
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        let recorded = RecordedRequest {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            query,
            headers,
            body: body.to_vec(),
        };
        let (status, response_body) = responder(&recorded);
        requests.lock().unwrap().push(recorded);

        Response::builder()
            .status(status)
            .body(Body::from(response_body))
            .unwrap()
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bytes::Bytes;
    use tokio::sync::mpsc;

    use contracts::{DataInfo, ExportError, ExportOutcome, ExportResult, HubEndpoint, WorkUnit};
    use dispatcher::Dispatcher;
    use hub_client::HubClient;

    use crate::mock_hub::MockHub;

    fn endpoint(address: String) -> HubEndpoint {
        HubEndpoint {
            address,
            api_key: "not-necessary".into(),
            add_hash: false,
        }
    }

    /// Run one unit through a fresh dispatcher and return its reported result
    async fn run_unit(
        defaults: HubEndpoint,
        payload: &str,
        mime_type: &str,
        info: DataInfo,
    ) -> ExportResult {
        let (tx, rx) = mpsc::channel(4);
        let handle = Dispatcher::new(HubClient::new(), defaults, rx).spawn();

        let (unit, result_rx) =
            WorkUnit::new(Bytes::from(payload.to_string()), mime_type, info, None);
        tx.send(unit).await.unwrap();
        drop(tx);

        let result = tokio::time::timeout(Duration::from_secs(5), result_rx)
            .await
            .expect("work unit timed out")
            .expect("result sink dropped");
        handle.await.unwrap();
        result
    }

    fn metadata_info() -> DataInfo {
        DataInfo {
            catalogue: "any-kind".into(),
            identifier: Some("whatever".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_metadata_export_wire_shape() {
        let hub = MockHub::spawn_fixed(200, "").await;

        let result = run_unit(
            endpoint(hub.address()),
            "Test message",
            "text/plain",
            metadata_info(),
        )
        .await;
        assert_eq!(result.unwrap(), ExportOutcome::Updated);

        let requests = hub.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, "PUT");
        assert_eq!(request.path, "/datasets/whatever");
        assert_eq!(request.query.get("catalogue").unwrap(), "any-kind");
        assert!(!request.query.contains_key("hash"));
        assert_eq!(request.header("content-type"), Some("text/plain"));
        assert_eq!(request.header("authorization"), Some("not-necessary"));
        assert_eq!(request.body, b"Test message");
    }

    #[tokio::test]
    async fn test_metadata_created_on_201() {
        let hub = MockHub::spawn_fixed(201, "").await;
        let result = run_unit(
            endpoint(hub.address()),
            "Test message",
            "text/plain",
            metadata_info(),
        )
        .await;
        assert_eq!(result.unwrap(), ExportOutcome::Created);
    }

    #[tokio::test]
    async fn test_metadata_304_is_success() {
        let hub = MockHub::spawn_fixed(304, "").await;
        let result = run_unit(
            endpoint(hub.address()),
            "Test message",
            "text/plain",
            metadata_info(),
        )
        .await;
        assert_eq!(result.unwrap(), ExportOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_metadata_rejection_carries_detail() {
        let hub = MockHub::spawn_fixed(500, "boom").await;
        let result = run_unit(
            endpoint(hub.address()),
            "Test message",
            "text/plain",
            metadata_info(),
        )
        .await;

        match result.unwrap_err() {
            ExportError::HubRejected {
                identifier,
                status,
                status_text,
                body,
            } => {
                assert_eq!(identifier, "whatever");
                assert_eq!(status, 500);
                assert_eq!(status_text, "Internal Server Error");
                assert_eq!(body, "boom");
            }
            other => panic!("expected HubRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_metadata_transport_failure_is_hard() {
        // Nothing listens here
        let result = run_unit(
            endpoint("http://127.0.0.1:9".into()),
            "Test message",
            "text/plain",
            metadata_info(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            ExportError::Transport { .. }
        ));
    }

    #[tokio::test]
    async fn test_metadata_supplied_hash_is_forwarded() {
        let hub = MockHub::spawn_fixed(200, "").await;

        let info = DataInfo {
            hash: Some("abc123".into()),
            ..metadata_info()
        };
        run_unit(endpoint(hub.address()), "Test message", "text/plain", info)
            .await
            .unwrap();

        let request = &hub.requests()[0];
        assert_eq!(request.query.get("hash").unwrap(), "abc123");
    }

    #[tokio::test]
    async fn test_metadata_computed_hash_when_enabled() {
        let hub = MockHub::spawn_fixed(200, "").await;

        let mut defaults = endpoint(hub.address());
        defaults.add_hash = true;
        let turtle = r#"<http://example.org/d> <http://purl.org/dc/terms/title> "T" ."#;
        run_unit(defaults, turtle, "text/turtle", metadata_info())
            .await
            .unwrap();

        let request = &hub.requests()[0];
        let sent_hash = request.query.get("hash").expect("hash query missing");
        assert_eq!(
            sent_hash,
            &graph_hash::canonical_hash(turtle.as_bytes(), "text/turtle").unwrap()
        );
    }

    const TRIG: &str = r#"
@prefix dqv: <http://www.w3.org/ns/dqv#> .
<http://example.org/metrics/1> {
    <http://example.org/dataset/1> dqv:hasQualityMeasurement <http://example.org/m/1> .
}
"#;

    fn metrics_info() -> DataInfo {
        DataInfo {
            catalogue: "any-kind".into(),
            identifier: Some("sampleDataset".into()),
            content: Some("metrics".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_metrics_export_wire_shape() {
        let hub = MockHub::spawn_fixed(200, "").await;

        let result = run_unit(
            endpoint(hub.address()),
            TRIG,
            "application/trig",
            metrics_info(),
        )
        .await;
        assert_eq!(result.unwrap(), ExportOutcome::Updated);

        let requests = hub.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, "PUT");
        assert_eq!(request.path, "/metrics/sampleDataset");
        assert_eq!(request.query.get("catalogue").unwrap(), "any-kind");
        assert!(!request.query.contains_key("hash"));
        assert_eq!(request.header("content-type"), Some("application/trig"));
        assert_eq!(request.header("authorization"), Some("not-necessary"));
    }

    #[tokio::test]
    async fn test_metrics_malformed_graph_hard_fails_without_hub_call() {
        let hub = MockHub::spawn_fixed(200, "").await;

        let result = run_unit(
            endpoint(hub.address()),
            "not trig {{{",
            "application/trig",
            metrics_info(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            ExportError::InvalidPayload { .. }
        ));
        assert!(hub.requests().is_empty());
    }

    fn reconcile_info() -> DataInfo {
        DataInfo {
            catalogue: "any-kind".into(),
            content: Some("identifierList".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_reconcile_deletes_exactly_the_stale_identifier() {
        let hub = MockHub::spawn(Arc::new(|request| {
            if request.method == "GET" && request.path == "/datasets" {
                (
                    200,
                    r#"["first-identifier","second-identifier"]"#.to_string(),
                )
            } else {
                (200, String::new())
            }
        }))
        .await;

        let result = run_unit(
            endpoint(hub.address()),
            r#"["first-identifier"]"#,
            "application/json",
            reconcile_info(),
        )
        .await;
        assert_eq!(result.unwrap(), ExportOutcome::Reconciled { deleted: 1 });

        // The fetch carries the catalogue and the sourceIds marker
        let fetch = hub.wait_for(|r| r.method == "GET").await;
        assert_eq!(fetch.path, "/datasets");
        assert_eq!(fetch.query.get("catalogue").unwrap(), "any-kind");
        assert_eq!(fetch.query.get("sourceIds").unwrap(), "true");
        assert_eq!(fetch.header("authorization"), Some("not-necessary"));

        // Deletes are fire-and-forget; wait for the one we expect
        let delete = hub.wait_for(|r| r.method == "DELETE").await;
        assert_eq!(delete.path, "/datasets/second-identifier");
        assert_eq!(delete.query.get("catalogue").unwrap(), "any-kind");
        assert_eq!(delete.header("authorization"), Some("not-necessary"));

        // And make sure nothing else gets deleted
        tokio::time::sleep(Duration::from_millis(200)).await;
        let deletes: Vec<_> = hub
            .requests()
            .into_iter()
            .filter(|r| r.method == "DELETE")
            .collect();
        assert_eq!(deletes.len(), 1);
    }

    #[tokio::test]
    async fn test_reconcile_404_on_delete_is_not_a_failure() {
        let hub = MockHub::spawn(Arc::new(|request| {
            if request.method == "GET" {
                (200, r#"["gone-identifier"]"#.to_string())
            } else {
                (404, String::new())
            }
        }))
        .await;

        let result = run_unit(
            endpoint(hub.address()),
            r#"[]"#,
            "application/json",
            reconcile_info(),
        )
        .await;
        assert_eq!(result.unwrap(), ExportOutcome::Reconciled { deleted: 1 });

        hub.wait_for(|r| r.method == "DELETE").await;
    }

    #[tokio::test]
    async fn test_reconcile_fetch_rejection_soft_fails() {
        let hub = MockHub::spawn_fixed(503, "down for maintenance").await;

        let result = run_unit(
            endpoint(hub.address()),
            r#"["first-identifier"]"#,
            "application/json",
            reconcile_info(),
        )
        .await;
        assert_eq!(result.unwrap(), ExportOutcome::Reconciled { deleted: 0 });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(hub.requests().iter().all(|r| r.method == "GET"));
    }

    #[tokio::test]
    async fn test_reconcile_malformed_local_list_hard_fails() {
        let hub = MockHub::spawn_fixed(200, "[]").await;

        let result = run_unit(
            endpoint(hub.address()),
            "not a json array",
            "application/json",
            reconcile_info(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            ExportError::InvalidPayload { .. }
        ));
    }

    #[tokio::test]
    async fn test_reconcile_transport_failure_is_hard() {
        let result = run_unit(
            endpoint("http://127.0.0.1:9".into()),
            r#"["first-identifier"]"#,
            "application/json",
            reconcile_info(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            ExportError::Transport { .. }
        ));
    }
}
