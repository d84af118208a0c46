use std::sync::Arc;

use tokio::sync::Mutex;

use crate::github::{enumerator, GithubApi};
use crate::store::{NewProject, ProjectRef, ProjectStore, StoreError};
use crate::types::CommitInfo;

/// Upsert engine plus the bulk sync path, generic over both remote seams.
#[derive(Clone)]
pub struct SyncCore<S, G> {
    store: S,
    github: G,
    // Query and write for the same repository must not interleave; one gate
    // across all upserts keeps the check-then-act window closed.
    upsert_gate: Arc<Mutex<()>>,
}

impl<S: ProjectStore, G: GithubApi> SyncCore<S, G> {
    pub fn new(store: S, github: G) -> Self {
        Self {
            store,
            github,
            upsert_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Create-if-absent-else-update, keyed by the `Name` title property.
    ///
    /// An existing page only gets its last-commit fields patched, and only
    /// when commit info is present; nothing is ever cleared and `Name` and
    /// the link are never rewritten. A missing page is created with the
    /// default status and whatever commit info arrived with it.
    pub async fn upsert(
        &self,
        name: &str,
        url: &str,
        commit: Option<&CommitInfo>,
    ) -> Result<ProjectRef, StoreError> {
        let _gate = self.upsert_gate.lock().await;

        let matches = self.store.find_by_name(name).await?;
        if matches.len() > 1 {
            log::warn!(
                "{} pages share the name {:?}; using the first",
                matches.len(),
                name
            );
        }
        match matches.into_iter().next() {
            Some(existing) => {
                if let Some(commit) = commit {
                    self.store.update_commit(&existing.id, commit).await?;
                    log::info!("🔄 Updated last commit for {}", name);
                } else {
                    log::debug!("no commit info for {}; page left untouched", name);
                }
                Ok(existing)
            }
            None => {
                let page = self
                    .store
                    .create_project(&NewProject { name, url, commit })
                    .await?;
                log::info!("📌 Created project {} ({})", name, url);
                Ok(page)
            }
        }
    }

    /// Enumerate all visible repositories and upsert each one. Failures are
    /// logged and skipped; the return value counts successful upserts.
    pub async fn sync_all(&self) -> usize {
        let repos = enumerator::list_repositories(&self.github).await;
        log::info!("🔁 Syncing {} repositories", repos.len());

        let mut synced = 0;
        for repo in repos {
            let commit = match self.github.latest_commit(&repo.full_name).await {
                Ok(commit) => commit,
                Err(e) => {
                    log::warn!("latest commit lookup failed for {}: {}", repo.full_name, e);
                    None
                }
            };
            match self.upsert(&repo.name, &repo.html_url, commit.as_ref()).await {
                Ok(_) => synced += 1,
                Err(e) => log::error!("skipping {}: {}", repo.name, e),
            }
        }
        synced
    }
}
