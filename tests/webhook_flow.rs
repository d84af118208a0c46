use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use repo2notion::core::SyncCore;
use repo2notion::github::GithubClient;
use repo2notion::rest::{router, AppState};
use repo2notion::store::NotionStore;

fn app(notion: &MockServer, github: &MockServer) -> axum::Router {
    let store = NotionStore::new(&notion.uri(), "notion-secret", "db-1");
    let client = GithubClient::new(&github.uri(), "gh-token");
    router(AppState {
        core: SyncCore::new(store, client),
    })
}

async fn json_response(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn webhook_event_creates_notion_page() {
    let notion = MockServer::start().await;
    let github = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/databases/db-1/query"))
        .and(body_partial_json(json!({
            "filter": { "property": "Name", "title": { "equals": "svc-a" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&notion)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .and(body_partial_json(json!({
            "parent": { "database_id": "db-1" },
            "properties": {
                "Name": { "title": [{ "text": { "content": "svc-a" } }] },
                "GitHub Link": { "url": "https://x/svc-a" },
                "Last Commit": { "rich_text": [{ "text": { "content": "fix bug" } }] },
                "Last Commit Date": { "date": { "start": "2024-01-01T00:00:00+00:00" } }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "page-1" })))
        .expect(1)
        .mount(&notion)
        .await;

    let body = json!({
        "repository": { "name": "svc-a", "html_url": "https://x/svc-a" },
        "commits": [{ "message": "fix bug", "timestamp": "2024-01-01T00:00:00Z" }]
    });
    let request = Request::builder()
        .method("POST")
        .uri("/api/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, body) = json_response(app(&notion, &github), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn sync_repos_upserts_every_listed_repository() {
    let notion = MockServer::start().await;
    let github = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "svc-a", "full_name": "me/svc-a", "html_url": "https://x/svc-a" },
            { "name": "svc-b", "full_name": "me/svc-b", "html_url": "https://x/svc-b" }
        ])))
        .mount(&github)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&github)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/me/svc-a/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "sha": "abc",
                "commit": {
                    "message": "fix bug",
                    "author": { "name": "dev", "date": "2024-01-01T00:00:00Z" }
                }
            }
        ])))
        .mount(&github)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/me/svc-b/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&github)
        .await;

    // svc-a already tracked, svc-b is new.
    Mock::given(method("POST"))
        .and(path("/v1/databases/db-1/query"))
        .and(body_partial_json(json!({
            "filter": { "property": "Name", "title": { "equals": "svc-a" } }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "results": [{ "id": "page-1" }] })),
        )
        .expect(1)
        .mount(&notion)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/databases/db-1/query"))
        .and(body_partial_json(json!({
            "filter": { "property": "Name", "title": { "equals": "svc-b" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&notion)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/pages/page-1"))
        .and(body_partial_json(json!({
            "properties": {
                "Last Commit": { "rich_text": [{ "text": { "content": "fix bug" } }] }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "page-1" })))
        .expect(1)
        .mount(&notion)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .and(body_partial_json(json!({
            "properties": { "Name": { "title": [{ "text": { "content": "svc-b" } }] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "page-2" })))
        .expect(1)
        .mount(&notion)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/sync_repos")
        .body(Body::empty())
        .unwrap();

    let (status, body) = json_response(app(&notion, &github), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "done", "repos_synced": 2 }));
}
