use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::traits::{NewProject, ProjectRef, ProjectStore, StoreError};
use crate::types::CommitInfo;

const NOTION_VERSION: &str = "2022-06-28";

/// Status select assigned to freshly created project pages. Existing pages
/// keep whatever status they have.
const DEFAULT_STATUS: &str = "Ongoing";

#[derive(Clone)]
pub struct NotionStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
    database_id: String,
}

#[derive(Deserialize)]
struct PageObject {
    id: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<PageObject>,
}

impl NotionStore {
    pub fn new(base_url: &str, token: &str, database_id: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            database_id: database_id.to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn error_from(resp: reqwest::Response) -> StoreError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        if status >= 500 {
            StoreError::Unavailable { status, body }
        } else {
            StoreError::Rejected { status, body }
        }
    }
}

fn title_prop(text: &str) -> Value {
    json!({ "title": [{ "text": { "content": text } }] })
}

fn rich_text_prop(text: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": text } }] })
}

fn url_prop(url: &str) -> Value {
    json!({ "url": url })
}

fn select_prop(name: &str) -> Value {
    json!({ "select": { "name": name } })
}

fn date_prop(ts: &DateTime<FixedOffset>) -> Value {
    json!({ "date": { "start": ts.to_rfc3339() } })
}

fn commit_props(properties: &mut Map<String, Value>, commit: &CommitInfo) {
    let _ = properties.insert("Last Commit".to_string(), rich_text_prop(&commit.message));
    let _ = properties.insert("Last Commit Date".to_string(), date_prop(&commit.timestamp));
}

#[async_trait]
impl ProjectStore for NotionStore {
    async fn find_by_name(&self, name: &str) -> Result<Vec<ProjectRef>, StoreError> {
        let body = json!({ "filter": { "property": "Name", "title": { "equals": name } } });
        let resp = self
            .request(
                Method::POST,
                &format!("/v1/databases/{}/query", self.database_id),
            )
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        let parsed: QueryResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::BadResponse(e.to_string()))?;
        Ok(parsed
            .results
            .into_iter()
            .map(|page| ProjectRef { id: page.id })
            .collect())
    }

    async fn create_project(&self, project: &NewProject<'_>) -> Result<ProjectRef, StoreError> {
        let mut properties = Map::new();
        let _ = properties.insert("Name".to_string(), title_prop(project.name));
        let _ = properties.insert("GitHub Link".to_string(), url_prop(project.url));
        let _ = properties.insert("Status".to_string(), select_prop(DEFAULT_STATUS));
        if let Some(commit) = project.commit {
            commit_props(&mut properties, commit);
        }
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": properties,
        });

        let resp = self
            .request(Method::POST, "/v1/pages")
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        let page: PageObject = resp
            .json()
            .await
            .map_err(|e| StoreError::BadResponse(e.to_string()))?;
        log::debug!("created project page {} for {}", page.id, project.name);
        Ok(ProjectRef { id: page.id })
    }

    async fn update_commit(&self, page_id: &str, commit: &CommitInfo) -> Result<(), StoreError> {
        let mut properties = Map::new();
        commit_props(&mut properties, commit);
        let body = json!({ "properties": properties });

        let resp = self
            .request(Method::PATCH, &format!("/v1/pages/{}", page_id))
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        log::debug!("updated last commit on page {}", page_id);
        Ok(())
    }
}
