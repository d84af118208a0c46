use std::net::SocketAddr;

use axum::{routing::get, Router};

use crate::core::SyncCore;
use crate::github::GithubApi;
use crate::store::ProjectStore;

mod handlers;
mod models;

use handlers::{not_found, root, sync_repos, webhook, webhook_probe};

#[derive(Clone)]
pub struct AppState<S, G> {
    pub core: SyncCore<S, G>,
}

pub fn router<S, G>(state: AppState<S, G>) -> Router
where
    S: ProjectStore + Clone + Send + Sync + 'static,
    G: GithubApi + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/api/webhook", get(webhook_probe).post(webhook::<S, G>))
        .route(
            "/api/sync_repos",
            get(sync_repos::<S, G>).post(sync_repos::<S, G>),
        )
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve<S, G>(
    addr: SocketAddr,
    core: SyncCore<S, G>,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()>
where
    S: ProjectStore + Clone + Send + Sync + 'static,
    G: GithubApi + Clone + Send + Sync + 'static,
{
    log::info!("🌐 Webhook service on http://{}", addr);

    let app = router(AppState { core });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
