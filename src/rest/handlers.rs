use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::DateTime;

use crate::core::SyncCore;
use crate::github::GithubApi;
use crate::store::ProjectStore;
use crate::types::CommitInfo;

use super::{
    models::{CommitPayload, ErrorResponse, StatusResponse, SyncResponse, WebhookPayload},
    AppState,
};

pub async fn root() -> impl IntoResponse {
    Json(StatusResponse { status: "running" })
}

pub async fn webhook_probe() -> impl IntoResponse {
    Json(StatusResponse {
        status: "webhook endpoint active",
    })
}

/// Inbound webhook. Always answers 200: a malformed body is the sender's
/// bug, not a reason to trigger its retry loop, so shape problems are
/// logged and swallowed.
pub async fn webhook<S, G>(
    State(state): State<AppState<S, G>>,
    body: Bytes,
) -> impl IntoResponse
where
    S: ProjectStore + Clone + Send + Sync + 'static,
    G: GithubApi + Clone + Send + Sync + 'static,
{
    match serde_json::from_slice::<WebhookPayload>(&body) {
        Ok(payload) => apply_webhook(&state.core, payload).await,
        Err(e) => log::warn!("ignoring malformed webhook payload: {}", e),
    }
    Json(StatusResponse { status: "ok" })
}

pub async fn sync_repos<S, G>(State(state): State<AppState<S, G>>) -> impl IntoResponse
where
    S: ProjectStore + Clone + Send + Sync + 'static,
    G: GithubApi + Clone + Send + Sync + 'static,
{
    let repos_synced = state.core.sync_all().await;
    Json(SyncResponse {
        status: "done",
        repos_synced,
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}

async fn apply_webhook<S, G>(core: &SyncCore<S, G>, payload: WebhookPayload)
where
    S: ProjectStore,
    G: GithubApi,
{
    let Some(repo) = payload.repository else {
        log::warn!("webhook payload carries no repository info; ignoring");
        return;
    };
    if repo.name.is_empty() {
        log::warn!("webhook payload carries an empty repository name; ignoring");
        return;
    }

    let commit = payload.commits.into_iter().last().and_then(parse_commit);
    if let Err(e) = core.upsert(&repo.name, &repo.html_url, commit.as_ref()).await {
        log::error!("webhook upsert for {} failed: {}", repo.name, e);
    }
}

fn parse_commit(payload: CommitPayload) -> Option<CommitInfo> {
    match DateTime::parse_from_rfc3339(&payload.timestamp) {
        Ok(timestamp) => Some(CommitInfo::new(payload.message, timestamp)),
        Err(e) => {
            log::warn!(
                "unparseable commit timestamp {:?}: {}; treating event as commit-less",
                payload.timestamp,
                e
            );
            None
        }
    }
}
