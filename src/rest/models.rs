use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub status: &'static str,
    pub repos_synced: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// The slice of a GitHub webhook body this service cares about. Everything
/// else in the event is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub repository: Option<RepositoryInfo>,
    #[serde(default)]
    pub commits: Vec<CommitPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    pub message: String,
    pub timestamp: String,
}
