use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::types::CommitInfo;

/// One repository as returned by the listing endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
}

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("github request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("github returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Raw GitHub operations the sync path needs, mockable per test.
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// One page of the authenticated user's repositories. An empty page
    /// means the listing is exhausted.
    async fn repos_page(&self, page: u32) -> Result<Vec<RepoSummary>, GithubError>;

    /// Most recent commit of a repository. `Ok(None)` means the repository
    /// has no history; a failed lookup is an error.
    async fn latest_commit(&self, full_name: &str) -> Result<Option<CommitInfo>, GithubError>;
}

pub const DEFAULT_PAGE_SIZE: u32 = 100;

mod client;
pub mod enumerator;

pub use client::GithubClient;
pub use enumerator::list_repositories;
