use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{GithubApi, GithubError, RepoSummary, DEFAULT_PAGE_SIZE};
use crate::types::CommitInfo;

const USER_AGENT: &str = concat!("repo2notion/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    page_size: u32,
}

#[derive(Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
    author: Option<GitAuthor>,
}

#[derive(Deserialize)]
struct GitAuthor {
    date: Option<DateTime<FixedOffset>>,
}

impl GithubClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    async fn error_from(resp: reqwest::Response) -> GithubError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        GithubError::Status { status, body }
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn repos_page(&self, page: u32) -> Result<Vec<RepoSummary>, GithubError> {
        let resp = self
            .get("/user/repos")
            .query(&[("per_page", self.page_size), ("page", page)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn latest_commit(&self, full_name: &str) -> Result<Option<CommitInfo>, GithubError> {
        let resp = self
            .get(&format!("/repos/{}/commits", full_name))
            .query(&[("per_page", 1u32)])
            .send()
            .await?;
        // GitHub answers 409 for a repository with no git history.
        if resp.status() == StatusCode::CONFLICT {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        let entries: Vec<CommitEntry> = resp.json().await?;
        let Some(entry) = entries.into_iter().next() else {
            return Ok(None);
        };
        let Some(date) = entry.commit.author.and_then(|a| a.date) else {
            log::debug!("latest commit of {} carries no author date", full_name);
            return Ok(None);
        };
        Ok(Some(CommitInfo::new(entry.commit.message, date)))
    }
}
