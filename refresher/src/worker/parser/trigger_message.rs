use crate::error::{RefreshError, RefreshResult};
use omniqueue::Delivery;
use serde::{Deserialize, Serialize};

/// Payload of the `refresh_trigger` queue: run one scheduler invocation for `method`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMessage {
    pub method: String,
    /// Number of failed invocations that led to this message
    #[serde(default)]
    pub attempt: u32,
    /// Delay still owed before the invocation may run, for cooldowns longer than one queue delay
    #[serde(default, skip_serializing_if = "is_zero")]
    pub deferred_secs: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl TriggerMessage {
    pub fn new(method: impl Into<String>) -> Self {
        Self { method: method.into(), attempt: 0, deferred_secs: 0 }
    }

    /// The message retrying this one.
    pub fn next_attempt(&self) -> Self {
        Self { method: self.method.clone(), attempt: self.attempt + 1, deferred_secs: 0 }
    }

    /// Same message with `deferred_secs` still to wait.
    pub fn deferred(&self, deferred_secs: u64) -> Self {
        Self { method: self.method.clone(), attempt: self.attempt, deferred_secs }
    }

    pub fn parse_message(message: &Delivery) -> RefreshResult<Self> {
        let payload =
            message.borrow_payload().ok_or_else(|| RefreshError::InvalidTrigger("Empty payload".to_string()))?;
        Self::from_payload(payload)
    }

    pub fn from_payload(payload: &[u8]) -> RefreshResult<Self> {
        serde_json::from_slice(payload).map_err(|e| RefreshError::InvalidTrigger(e.to_string()))
    }
}
