use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Latest-commit metadata carried from a webhook event or a GitHub lookup
/// into the store. Never persisted locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub message: String,
    pub timestamp: DateTime<FixedOffset>,
}

impl CommitInfo {
    pub fn new(message: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            message: message.into(),
            timestamp,
        }
    }
}
