use std::sync::Arc;
use std::time::Duration;

use crate::core::client::{InMemoryLockClient, InMemoryRefreshBacklog, LockClient, RefreshBacklog};
use crate::tests::common::fakes::RecordingQueue;
use crate::tests::common::{request, AZUKI, BAYC, METHOD};
use crate::tests::config::TestConfigBuilder;
use crate::types::queue::QueueType;
use crate::worker::parser::trigger_message::TriggerMessage;
use crate::worker::trigger::RefreshTrigger;

struct Harness {
    trigger: RefreshTrigger,
    backlog: Arc<InMemoryRefreshBacklog>,
    lock: Arc<InMemoryLockClient>,
    queue: Arc<RecordingQueue>,
}

fn harness() -> Harness {
    let backlog = Arc::new(InMemoryRefreshBacklog::new());
    let lock = Arc::new(InMemoryLockClient::new());
    let queue = Arc::new(RecordingQueue::new());
    let config = TestConfigBuilder::new()
        .configure_backlog(backlog.clone())
        .configure_lock_client(lock.clone())
        .configure_queue_client(queue.clone())
        .build();
    Harness { trigger: RefreshTrigger::new(config), backlog, lock, queue }
}

#[tokio::test(start_paused = true)]
async fn submit_starts_a_single_run() {
    let h = harness();

    let started = h.trigger.submit(vec![request("bayc", BAYC), request("azuki", AZUKI)], false).await.unwrap();

    assert!(started);
    assert_eq!(h.backlog.pending().await, vec![request("bayc", BAYC), request("azuki", AZUKI)]);
    assert_eq!(h.lock.ttl(METHOD).await, Some(Duration::from_secs(300)));

    let sent = h.queue.sent_to(QueueType::RefreshTrigger);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].delay, None);
    assert_eq!(TriggerMessage::from_payload(sent[0].payload.as_bytes()).unwrap(), TriggerMessage::new(METHOD));
}

#[tokio::test]
async fn submit_while_running_only_fills_the_backlog() {
    let h = harness();
    assert!(h.trigger.submit(vec![request("bayc", BAYC)], false).await.unwrap());

    let started = h.trigger.submit(vec![request("azuki", AZUKI)], true).await.unwrap();

    assert!(!started);
    assert_eq!(h.queue.sent_to(QueueType::RefreshTrigger).len(), 1);
    assert_eq!(h.backlog.pending().await, vec![request("azuki", AZUKI), request("bayc", BAYC)]);
}

#[tokio::test]
async fn empty_submission_is_a_no_op() {
    let h = harness();

    assert!(!h.trigger.submit(vec![], false).await.unwrap());

    assert!(h.queue.sent().is_empty());
    assert!(!h.lock.is_locked(METHOD).await.unwrap());
}

#[tokio::test]
async fn resume_ignores_an_empty_backlog() {
    let h = harness();

    assert!(!h.trigger.resume().await.unwrap());

    assert!(h.queue.sent().is_empty());
    assert!(!h.lock.is_locked(METHOD).await.unwrap());
}

#[tokio::test]
async fn resume_restarts_an_orphaned_backlog() {
    let h = harness();
    h.backlog.add(request("bayc", BAYC), false).await.unwrap();

    assert!(h.trigger.resume().await.unwrap());

    assert!(h.lock.is_locked(METHOD).await.unwrap());
    assert_eq!(h.queue.sent_to(QueueType::RefreshTrigger).len(), 1);
}

#[tokio::test]
async fn resume_leaves_a_live_run_alone() {
    let h = harness();
    h.backlog.add(request("bayc", BAYC), false).await.unwrap();
    h.lock.acquire_lock(METHOD, 300).await.unwrap();

    assert!(!h.trigger.resume().await.unwrap());

    assert!(h.queue.sent().is_empty());
}

#[tokio::test]
async fn delay_beyond_the_queue_maximum_is_deferred() {
    let h = harness();

    h.trigger.enqueue(Duration::from_secs(1000)).await.unwrap();

    let sent = h.queue.sent_to(QueueType::RefreshTrigger);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].delay, Some(Duration::from_secs(900)));
    assert_eq!(
        TriggerMessage::from_payload(sent[0].payload.as_bytes()).unwrap(),
        TriggerMessage::new(METHOD).deferred(100)
    );
}

#[tokio::test]
async fn delay_at_the_queue_maximum_is_sent_as_is() {
    let h = harness();

    h.trigger.enqueue(Duration::from_secs(900)).await.unwrap();

    let sent = h.queue.sent_to(QueueType::RefreshTrigger);
    assert_eq!(sent[0].delay, Some(Duration::from_secs(900)));
    assert_eq!(TriggerMessage::from_payload(sent[0].payload.as_bytes()).unwrap(), TriggerMessage::new(METHOD));
}
