use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use rstest::{fixture, rstest};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt;

use crate::core::client::{InMemoryLockClient, InMemoryRefreshBacklog, LockClient};
use crate::server::route::server_router;
use crate::server::types::{ApiResponse, HealthResponse, RefreshStatusResponse, SubmitRefreshResponse};
use crate::tests::common::fakes::RecordingQueue;
use crate::tests::common::{request, AZUKI, BAYC, METHOD};
use crate::tests::config::TestConfigBuilder;
use crate::types::constant::REFRESHER_VERSION;
use crate::types::queue::QueueType;

struct TestServer {
    router: Router,
    backlog: Arc<InMemoryRefreshBacklog>,
    lock: Arc<InMemoryLockClient>,
    queue: Arc<RecordingQueue>,
}

#[fixture]
fn server() -> TestServer {
    let backlog = Arc::new(InMemoryRefreshBacklog::new());
    let lock = Arc::new(InMemoryLockClient::new());
    let queue = Arc::new(RecordingQueue::new());
    let config = TestConfigBuilder::new()
        .configure_backlog(backlog.clone())
        .configure_lock_client(lock.clone())
        .configure_queue_client(queue.clone())
        .build();
    TestServer { router: server_router(config), backlog, lock, queue }
}

async fn call(router: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder.header("content-type", "application/json").body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> ApiResponse<T> {
    serde_json::from_slice(bytes).unwrap()
}

#[rstest]
#[tokio::test]
async fn health_reports_up(server: TestServer) {
    let (status, body) = call(&server.router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let response = parse::<HealthResponse>(&body);
    assert!(response.success);
    assert_eq!(
        response.data,
        Some(HealthResponse { status: "UP".to_string(), version: REFRESHER_VERSION.to_string() })
    );
}

#[rstest]
#[tokio::test]
async fn submission_queues_requests_and_starts_a_run(server: TestServer) {
    let body = json!({
        "requests": [request("bayc", BAYC), request("azuki", AZUKI)],
    });

    let (status, body) = call(&server.router, Method::POST, "/refresh/collections", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<SubmitRefreshResponse>(&body).data, Some(SubmitRefreshResponse { submitted: 2, started: true }));
    assert_eq!(server.backlog.pending().await, vec![request("bayc", BAYC), request("azuki", AZUKI)]);
    assert!(server.lock.is_locked(METHOD).await.unwrap());
    assert_eq!(server.queue.sent_to(QueueType::RefreshTrigger).len(), 1);
}

#[rstest]
#[tokio::test]
async fn prioritized_submission_jumps_the_queue(server: TestServer) {
    let first = json!({ "requests": [request("bayc", BAYC)] });
    let second = json!({ "requests": [request("azuki", AZUKI)], "prioritized": true });

    call(&server.router, Method::POST, "/refresh/collections", Some(first)).await;
    let (status, body) = call(&server.router, Method::POST, "/refresh/collections", Some(second)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<SubmitRefreshResponse>(&body).data, Some(SubmitRefreshResponse { submitted: 1, started: false }));
    assert_eq!(server.backlog.pending().await, vec![request("azuki", AZUKI), request("bayc", BAYC)]);
}

#[rstest]
#[case::no_requests(json!({ "requests": [] }))]
#[case::blank_slug(json!({ "requests": [request(" ", BAYC)] }))]
#[tokio::test]
async fn invalid_submission_is_rejected(server: TestServer, #[case] body: serde_json::Value) {
    let (status, body) = call(&server.router, Method::POST, "/refresh/collections", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response = parse::<()>(&body);
    assert!(!response.success);
    assert!(response.message.is_some());
    assert!(server.backlog.pending().await.is_empty());
    assert!(server.queue.sent().is_empty());
}

#[rstest]
#[tokio::test]
async fn status_reports_backlog_and_lock(server: TestServer) {
    let (_, body) = call(&server.router, Method::GET, "/refresh/status", None).await;
    assert_eq!(
        parse::<RefreshStatusResponse>(&body).data,
        Some(RefreshStatusResponse { method: METHOD.to_string(), pending: 0, running: false })
    );

    let submission = json!({ "requests": [request("bayc", BAYC)] });
    call(&server.router, Method::POST, "/refresh/collections", Some(submission)).await;

    let (status, body) = call(&server.router, Method::GET, "/refresh/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse::<RefreshStatusResponse>(&body).data,
        Some(RefreshStatusResponse { method: METHOD.to_string(), pending: 1, running: true })
    );
}

#[rstest]
#[tokio::test]
async fn unknown_route_is_not_found(server: TestServer) {
    let (status, _) = call(&server.router, Method::GET, "/refresh/unknown", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
