use crate::{context, core, github, store};

pub fn build_store(ctx: &context::Context) -> store::NotionStore {
    store::NotionStore::new(
        ctx.config.notion_api_url.as_str(),
        &ctx.config.notion_token,
        &ctx.config.notion_database_id,
    )
}

pub fn build_github(ctx: &context::Context) -> github::GithubClient {
    github::GithubClient::new(
        ctx.config.github_api_url.as_str(),
        &ctx.config.github_token,
    )
    .with_page_size(ctx.config.page_size)
}

pub fn build_core(
    ctx: &context::Context,
) -> core::SyncCore<store::NotionStore, github::GithubClient> {
    core::SyncCore::new(build_store(ctx), build_github(ctx))
}
