use async_trait::async_trait;
use thiserror::Error;

use crate::types::CommitInfo;

/// Reference to a project page, as assigned by the store on creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
}

/// Create-payload for a project page.
#[derive(Clone, Copy, Debug)]
pub struct NewProject<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub commit: Option<&'a CommitInfo>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store unavailable: HTTP {status}: {body}")]
    Unavailable { status: u16, body: String },
    #[error("store rejected request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("store returned an unreadable response: {0}")]
    BadResponse(String),
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All pages whose `Name` equals `name`, in store order. The uniqueness
    /// invariant makes more than one match an anomaly; callers decide how to
    /// handle it.
    async fn find_by_name(&self, name: &str) -> Result<Vec<ProjectRef>, StoreError>;

    async fn create_project(&self, project: &NewProject<'_>) -> Result<ProjectRef, StoreError>;

    /// Partial update: only the last-commit fields are touched.
    async fn update_commit(&self, page_id: &str, commit: &CommitInfo) -> Result<(), StoreError>;
}
