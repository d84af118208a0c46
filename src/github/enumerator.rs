use super::{GithubApi, RepoSummary};

/// Enumerate every repository the credential can see, fetching pages until
/// one comes back empty. A failed page ends the enumeration early with
/// whatever was gathered so far; the sync is best effort.
pub async fn list_repositories<C: GithubApi>(client: &C) -> Vec<RepoSummary> {
    let mut repos = Vec::new();
    let mut page = 1u32;
    loop {
        match client.repos_page(page).await {
            Ok(batch) => {
                if batch.is_empty() {
                    break;
                }
                log::debug!("page {} returned {} repositories", page, batch.len());
                repos.extend(batch);
                page += 1;
            }
            Err(e) => {
                log::warn!(
                    "repository listing stopped at page {}: {} ({} gathered so far)",
                    page,
                    e,
                    repos.len()
                );
                break;
            }
        }
    }
    repos
}
