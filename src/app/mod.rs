mod wiring;

use crate::{cli, context, rest};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = cli::parse();
        let ctx = context::Context::from_cli(&cli).context("loading configuration")?;

        crate::tracing::init(ctx.config.log_file.as_deref().map(Path::new));
        log::info!("🚀 Starting repo2notion");
        log::info!("🐙 GitHub API: {}", ctx.config.github_api_url);
        log::info!("🗃️ Notion API: {}", ctx.config.notion_api_url);
        log::info!("🧮 Page size: {}", ctx.config.page_size);
        if let Some(path) = ctx.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path);
        }

        Ok((Self { ctx }, cli))
    }
}

pub async fn run_daemon(app: App, cli: cli::Cli) -> Result<()> {
    let shutdown = CancellationToken::new();

    let core = wiring::build_core(&app.ctx);
    let rest_shutdown = shutdown.clone();

    let mut rest_handle = tokio::spawn(async move {
        if let Err(e) = rest::serve(cli.listen, core, rest_shutdown).await {
            log::error!("REST server error: {}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            shutdown.cancel();
            if let Err(e) = rest_handle.await {
                log::error!("REST task error: {}", e);
            }
        }
        res = &mut rest_handle => {
            if let Err(e) = res {
                log::error!("REST task error: {}", e);
            }
        }
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;
    run_daemon(app, cli).await
}
