use super::{BacklogError, RefreshBacklog};
use crate::types::RefreshRequest;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Process local backlog, a single list where prioritized pushes go to the head.
#[derive(Debug, Default)]
pub struct InMemoryRefreshBacklog {
    requests: Mutex<VecDeque<RefreshRequest>>,
}

impl InMemoryRefreshBacklog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the pending requests in pop order
    pub async fn pending(&self) -> Vec<RefreshRequest> {
        self.requests.lock().await.iter().cloned().collect()
    }
}

#[async_trait]
impl RefreshBacklog for InMemoryRefreshBacklog {
    async fn get(&self, count: usize) -> Result<Vec<RefreshRequest>, BacklogError> {
        let mut requests = self.requests.lock().await;
        let take = count.min(requests.len());
        Ok(requests.drain(..take).collect())
    }

    async fn add(&self, request: RefreshRequest, prioritized: bool) -> Result<(), BacklogError> {
        let mut requests = self.requests.lock().await;
        if prioritized {
            requests.push_front(request);
        } else {
            requests.push_back(request);
        }
        Ok(())
    }

    async fn len(&self) -> Result<u64, BacklogError> {
        Ok(self.requests.lock().await.len() as u64)
    }
}
