use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use reqwest::StatusCode;
use rstest::rstest;
use tracing_test::traced_test;

use crate::core::client::lock::MockLockClient;
use crate::core::client::marketplace::FetchError;
use crate::core::client::{InMemoryLockClient, InMemoryRefreshBacklog, LockClient, RefreshBacklog};
use crate::error::RefreshError;
use crate::tests::common::fakes::{DispatchCall, RecordingDispatcher, ScriptedFetcher, StaticTokenDirectory};
use crate::tests::common::{page, request, AZUKI, BAYC, DENYLISTED, DOODLES, METHOD};
use crate::tests::config::TestConfigBuilder;
use crate::types::constant::COLLECTION_METADATA_UPDATE_PRIORITY;
use crate::types::RefreshRequest;
use crate::worker::refresh::{InvocationOutcome, RefreshScheduler};

struct Harness {
    scheduler: RefreshScheduler,
    backlog: Arc<InMemoryRefreshBacklog>,
    lock: Arc<InMemoryLockClient>,
    fetcher: Arc<ScriptedFetcher>,
    dispatcher: Arc<RecordingDispatcher>,
}

/// Scheduler holding the method lock, with `pending` already in the backlog.
async fn harness(builder: TestConfigBuilder, fetcher: ScriptedFetcher, pending: Vec<RefreshRequest>) -> Harness {
    let backlog = Arc::new(InMemoryRefreshBacklog::new());
    let lock = Arc::new(InMemoryLockClient::new());
    let fetcher = Arc::new(fetcher);
    let dispatcher = Arc::new(RecordingDispatcher::new());

    for request in pending {
        backlog.add(request, false).await.unwrap();
    }
    assert!(lock.acquire_lock(METHOD, 300).await.unwrap());

    let config = builder
        .configure_backlog(backlog.clone())
        .configure_lock_client(lock.clone())
        .configure_fetcher(fetcher.clone())
        .configure_dispatcher(dispatcher.clone())
        .configure_tokens(Arc::new(StaticTokenDirectory::new().with_token("bayc-collection", "1")))
        .build();

    Harness { scheduler: RefreshScheduler::new(config), backlog, lock, fetcher, dispatcher }
}

#[tokio::test]
async fn empty_backlog_releases_lock_and_stops() {
    let h = harness(TestConfigBuilder::new(), ScriptedFetcher::new(), vec![]).await;

    let outcome = h.scheduler.run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::Drained);
    assert!(!h.lock.is_locked(METHOD).await.unwrap());
    assert!(h.fetcher.calls().is_empty());
    assert!(h.dispatcher.calls().is_empty());
}

#[tokio::test]
async fn partial_batch_of_successes_is_submitted_and_lock_released() {
    let fetcher = ScriptedFetcher::new()
        .respond("bayc", Ok(page(BAYC, &["1", "2"], None)))
        .respond("azuki", Ok(page(AZUKI, &["10"], None)))
        .respond("doodles", Ok(page(DOODLES, &["7", "8", "9"], None)));
    let h = harness(
        TestConfigBuilder::new().configure_fanout(5, 1),
        fetcher,
        vec![request("bayc", BAYC), request("azuki", AZUKI), request("doodles", DOODLES)],
    )
    .await;

    let outcome = h.scheduler.run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::Drained);
    let submissions = h.dispatcher.submissions();
    assert_eq!(submissions.len(), 1);
    let token_ids: Vec<_> = submissions[0].iter().map(|item| item.token_id.as_str()).collect();
    assert_eq!(token_ids, ["1", "2", "10", "7", "8", "9"]);
    assert!(h.dispatcher.fallbacks().is_empty());
    assert!(h.backlog.pending().await.is_empty());
    assert!(!h.lock.is_locked(METHOD).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn continuation_is_requeued_prioritized_and_rescheduled_immediately() {
    let fetcher = ScriptedFetcher::new().respond("bayc", Ok(page(BAYC, &[], Some("abc"))));
    let original = request("bayc", BAYC);
    let h = harness(TestConfigBuilder::new(), fetcher, vec![original.clone()]).await;

    let outcome = h.scheduler.run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::Rescheduled { delay: Duration::ZERO });
    assert_eq!(h.dispatcher.submissions(), vec![vec![]]);

    let pending = h.backlog.pending().await;
    assert_eq!(pending.len(), 1);
    let resumed = &pending[0];
    assert_eq!(resumed, &original.with_continuation("abc"));
    assert_eq!(resumed.slug, original.slug);
    assert_eq!(resumed.contract, original.contract);
    assert_eq!(resumed.collection, original.collection);
    assert_eq!(h.lock.ttl(METHOD).await, Some(Duration::from_secs(300)));
}

#[tokio::test(start_paused = true)]
async fn rate_limited_request_is_requeued_unchanged_with_cooldown() {
    let original = request("bayc", BAYC).with_continuation("page-4");
    let fetcher = ScriptedFetcher::new().respond("bayc", Err(FetchError::RateLimited { expires_in_seconds: 20 }));
    let h = harness(TestConfigBuilder::new(), fetcher, vec![original.clone()]).await;

    let outcome = h.scheduler.run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::Rescheduled { delay: Duration::from_secs(20) });
    assert_eq!(h.backlog.pending().await, vec![original]);
    assert_eq!(h.lock.ttl(METHOD).await, Some(Duration::from_secs(320)));
    assert!(h.dispatcher.fallbacks().is_empty());
}

#[rstest]
#[case::below_floor(2, 5)]
#[case::zero(0, 5)]
#[case::at_floor(5, 5)]
#[case::above_floor(30, 30)]
#[tokio::test(start_paused = true)]
async fn rate_limit_cooldown_has_a_floor(#[case] expires_in_seconds: u64, #[case] expected: u64) {
    let fetcher = ScriptedFetcher::new().respond("bayc", Err(FetchError::RateLimited { expires_in_seconds }));
    let h = harness(TestConfigBuilder::new(), fetcher, vec![request("bayc", BAYC)]).await;

    let outcome = h.scheduler.run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::Rescheduled { delay: Duration::from_secs(expected) });
    assert_eq!(h.lock.ttl(METHOD).await, Some(Duration::from_secs(300 + expected)));
}

#[tokio::test]
async fn unresolvable_slug_falls_back_to_collection_refreshes() {
    let fetcher = ScriptedFetcher::new().respond("bayc", Ok(page(BAYC, &[], None)));
    let h = harness(TestConfigBuilder::new(), fetcher, vec![request("bayc", BAYC)]).await;

    let outcome = h.scheduler.run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::Drained);
    assert_eq!(
        h.dispatcher.fallbacks(),
        vec![
            DispatchCall::FullCollectionRefresh { contract: BAYC, method: METHOD.to_string() },
            DispatchCall::CollectionMetadataUpdate {
                contract: BAYC,
                token_id: "1".to_string(),
                method: METHOD.to_string(),
                priority: COLLECTION_METADATA_UPDATE_PRIORITY,
            },
        ]
    );
    assert!(h.backlog.pending().await.is_empty());
    assert!(!h.lock.is_locked(METHOD).await.unwrap());
}

#[traced_test]
#[tokio::test]
async fn unresolvable_slug_without_indexed_token_only_requests_full_refresh() {
    let fetcher = ScriptedFetcher::new().respond("azuki", Ok(page(AZUKI, &[], None)));
    let h = harness(TestConfigBuilder::new(), fetcher, vec![request("azuki", AZUKI)]).await;

    h.scheduler.run_invocation().await.unwrap();

    assert_eq!(
        h.dispatcher.fallbacks(),
        vec![DispatchCall::FullCollectionRefresh { contract: AZUKI, method: METHOD.to_string() }]
    );
    assert!(logs_contain("collection metadata update not requested"));
}

#[tokio::test]
async fn failing_fetch_does_not_affect_siblings() {
    let fetcher = ScriptedFetcher::new()
        .respond("bayc", Ok(page(BAYC, &["1"], None)))
        .respond(
            "azuki",
            Err(FetchError::ApiError {
                slug: "azuki".to_string(),
                status: StatusCode::BAD_GATEWAY,
                message: "bad gateway".to_string(),
            }),
        )
        .respond("doodles", Ok(page(DOODLES, &["2"], None)));
    let h = harness(
        TestConfigBuilder::new(),
        fetcher,
        vec![request("bayc", BAYC), request("azuki", AZUKI), request("doodles", DOODLES)],
    )
    .await;

    let outcome = h.scheduler.run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::Drained);
    let token_ids: Vec<_> = h.dispatcher.submissions()[0].iter().map(|item| item.token_id.clone()).collect();
    assert_eq!(token_ids, ["1", "2"]);
    assert_eq!(
        h.dispatcher.fallbacks(),
        vec![DispatchCall::FullCollectionRefresh { contract: AZUKI, method: METHOD.to_string() }]
    );
    // The failed request is abandoned, not retried verbatim
    assert!(h.backlog.pending().await.is_empty());
}

#[tokio::test]
async fn denylisted_contract_is_never_fetched() {
    let fetcher = ScriptedFetcher::new().respond("bayc", Ok(page(BAYC, &["1"], None)));
    let h = harness(
        TestConfigBuilder::new().configure_denylist([DENYLISTED]),
        fetcher,
        vec![request("bad", DENYLISTED), request("bayc", BAYC)],
    )
    .await;

    let outcome = h.scheduler.run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::Drained);
    assert_eq!(h.fetcher.called_slugs(), ["bayc"]);
    assert!(h.dispatcher.fallbacks().is_empty());
    assert!(h.backlog.pending().await.is_empty());
    assert_eq!(h.dispatcher.submissions()[0].len(), 1);
}

#[tokio::test]
async fn exactly_full_backlog_costs_one_empty_invocation() {
    let fetcher = ScriptedFetcher::new()
        .respond("bayc", Ok(page(BAYC, &["1"], None)))
        .respond("azuki", Ok(page(AZUKI, &["2"], None)));
    let h = harness(
        TestConfigBuilder::new().configure_fanout(2, 1),
        fetcher,
        vec![request("bayc", BAYC), request("azuki", AZUKI)],
    )
    .await;

    assert_eq!(h.scheduler.run_invocation().await.unwrap(), InvocationOutcome::Rescheduled { delay: Duration::ZERO });
    assert!(h.lock.is_locked(METHOD).await.unwrap());

    assert_eq!(h.scheduler.run_invocation().await.unwrap(), InvocationOutcome::Drained);
    assert!(!h.lock.is_locked(METHOD).await.unwrap());
    assert_eq!(h.fetcher.calls().len(), 2);
}

#[tokio::test]
async fn pagination_runs_until_the_last_page() {
    let fetcher = ScriptedFetcher::new()
        .respond("bayc", Ok(page(BAYC, &["1", "2"], Some("p2"))))
        .respond("bayc", Ok(page(BAYC, &["3"], None)));
    let h = harness(TestConfigBuilder::new(), fetcher, vec![request("bayc", BAYC)]).await;

    assert_matches!(h.scheduler.run_invocation().await, Ok(InvocationOutcome::Rescheduled { .. }));
    assert_eq!(h.scheduler.run_invocation().await.unwrap(), InvocationOutcome::Drained);

    assert_eq!(h.fetcher.calls(), vec![("bayc".to_string(), None), ("bayc".to_string(), Some("p2".to_string()))]);
    let submitted: Vec<usize> = h.dispatcher.submissions().iter().map(Vec::len).collect();
    assert_eq!(submitted, [2, 1]);
}

#[tokio::test]
async fn lost_lock_stops_without_release() {
    let mut lock = MockLockClient::new();
    lock.expect_extend_lock().withf(|key, ttl| key == METHOD && *ttl == 300).times(1).returning(|_, _| Ok(false));
    lock.expect_release_lock().never();

    let backlog = Arc::new(InMemoryRefreshBacklog::new());
    backlog.add(request("bayc", BAYC), false).await.unwrap();
    let config = TestConfigBuilder::new()
        .configure_fanout(1, 1)
        .configure_backlog(backlog)
        .configure_lock_client(Arc::new(lock))
        .configure_fetcher(Arc::new(ScriptedFetcher::new().respond("bayc", Ok(page(BAYC, &["1"], None)))))
        .build();

    let outcome = RefreshScheduler::new(config).run_invocation().await.unwrap();

    assert_eq!(outcome, InvocationOutcome::LockLost);
}

#[tokio::test]
async fn failed_metadata_submission_fails_the_invocation() {
    let backlog = Arc::new(InMemoryRefreshBacklog::new());
    let lock = Arc::new(InMemoryLockClient::new());
    backlog.add(request("bayc", BAYC), false).await.unwrap();
    lock.acquire_lock(METHOD, 300).await.unwrap();

    let config = TestConfigBuilder::new()
        .configure_backlog(backlog)
        .configure_lock_client(lock.clone())
        .configure_fetcher(Arc::new(ScriptedFetcher::new().respond("bayc", Ok(page(BAYC, &["1"], None)))))
        .configure_dispatcher(Arc::new(RecordingDispatcher::failing_submit()))
        .build();

    let result = RefreshScheduler::new(config).run_invocation().await;

    assert_matches!(result, Err(RefreshError::Dispatch(_)));
    // The run stays owned, the job runner retries it
    assert!(lock.is_locked(METHOD).await.unwrap());
}
