use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use issuetrack::config::Config;
use issuetrack::db::Store;
use issuetrack::domain::drafts::PersonDraft;
use issuetrack::state::SharedState;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Store,
}

async fn spawn_app() -> TestApp {
    let path = std::env::temp_dir().join(format!("issuetrack-api-{}.db", uuid::Uuid::new_v4()));
    let mut config = Config::default();
    config.database.url = format!("sqlite:{}", path.display());
    config.observability.metrics_enabled = false;

    let shared = Arc::new(
        SharedState::new(config)
            .await
            .expect("Failed to create shared state"),
    );
    shared
        .store
        .seed_defaults()
        .await
        .expect("Failed to seed defaults");

    let store = shared.store.clone();
    let state = issuetrack::api::create_app_state(shared, None);
    TestApp {
        router: issuetrack::api::router(state),
        store,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_issue(&self, title: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/issues",
                Some(json!({"reporter_id": 1, "status_id": 1, "title": title})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["issue_id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = spawn_app().await;

    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = app.send(Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], true);
}

#[tokio::test]
async fn test_metrics_disabled() {
    let app = spawn_app().await;
    let (status, _) = app.send(Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_issue_returns_relations() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/issues",
            Some(json!({
                "reporter_id": 1,
                "assignee_id": 1,
                "status_id": 1,
                "title": "Street light out",
                "description": "Corner of 5th and Main"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    let data = &body["data"];
    assert_eq!(data["title"], "Street light out");
    assert_eq!(data["priority"], "medium");
    assert_eq!(data["reporter"]["full_name"], "John Doe");
    assert_eq!(data["assignee"]["full_name"], "Jane Smith");
    assert_eq!(data["status"]["status_code"], "open");
    assert_eq!(data["comments"], json!([]));
    assert!(data.get("status_history").is_none());
}

#[tokio::test]
async fn test_create_issue_validation_errors() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/issues",
            Some(json!({
                "reporter_id": 1,
                "status_id": 1,
                "title": "ab",
                "priority": "urgent"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(
        body["details"],
        json!([
            {"field": "title", "message": "title must be at least 3 characters"},
            {"field": "priority", "message": "priority must be one of: low medium high critical"}
        ])
    );
}

#[tokio::test]
async fn test_unknown_reporter_creates_nothing() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/issues",
            Some(json!({"reporter_id": 42, "status_id": 1, "title": "Ghost report"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Reporter not found");
    assert_eq!(body["details"], "invalid reporter_id");

    let (_, body) = app.send(Method::GET, "/api/issues", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_malformed_requests() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/issues")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["details"].is_string());

    let (status, body) = app.send(Method::GET, "/api/issues/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid issue ID");
    assert_eq!(body["details"], "issue_id must be a positive integer");

    let (status, body) = app.send(Method::GET, "/api/issues/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": 404, "message": "Issue not found"}));
}

#[tokio::test]
async fn test_list_filters_by_status_code() {
    let app = spawn_app().await;
    let first = app.create_issue("Pothole on Elm").await;
    app.create_issue("Graffiti on bridge").await;

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/issues/{first}/status"),
            Some(json!({"new_status_id": 3, "changed_by": 1, "comment": "patched"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, all) = app.send(Method::GET, "/api/issues", None).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let (_, open) = app.send(Method::GET, "/api/issues?status=open", None).await;
    let open = open["data"].as_array().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["title"], "Graffiti on bridge");
    assert_eq!(open[0]["status"]["status_code"], "open");

    let (_, closed) = app.send(Method::GET, "/api/issues?status=closed", None).await;
    assert_eq!(closed["data"][0]["issue_id"], first);

    let (status, unknown) = app.send(Method::GET, "/api/issues?status=archived", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown["data"], json!([]));
}

#[tokio::test]
async fn test_transition_records_history() {
    let app = spawn_app().await;
    app.store
        .create_officer(&PersonDraft {
            full_name: "Sam Patel".to_string(),
        })
        .await
        .unwrap();
    let id = app.create_issue("Broken bench").await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/issues/{id}/status"),
            Some(json!({"new_status_id": 3, "changed_by": 2, "comment": "fixed"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status_id"], 3);
    assert_eq!(body["data"]["status"]["status_code"], "closed");

    let (_, body) = app.send(Method::GET, &format!("/api/issues/{id}"), None).await;
    let history = body["data"]["status_history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["issue_id"], id);
    assert_eq!(history[0]["old_status_id"], 1);
    assert_eq!(history[0]["new_status_id"], 3);
    assert_eq!(history[0]["changed_by"], 2);
    assert_eq!(history[0]["comment"], "fixed");
}

#[tokio::test]
async fn test_transition_reference_errors() {
    let app = spawn_app().await;
    let id = app.create_issue("Loose railing").await;
    let uri = format!("/api/issues/{id}/status");

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(json!({"new_status_id": 3, "changed_by": 99})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Officer not found");
    assert_eq!(body["details"], "invalid changed_by");

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(json!({"new_status_id": 42, "changed_by": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Status not found");

    let (status, _) = app
        .send(
            Method::PATCH,
            "/api/issues/777/status",
            Some(json!({"new_status_id": 2, "changed_by": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.send(Method::GET, &format!("/api/issues/{id}"), None).await;
    assert_eq!(body["data"]["status_id"], 1);
    assert_eq!(body["data"]["status_history"], json!([]));
}

#[tokio::test]
async fn test_update_issue() {
    let app = spawn_app().await;
    let id = app.create_issue("Noisy neighbours").await;
    let uri = format!("/api/issues/{id}");

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(json!({"title": "Very noisy neighbours", "priority": "high", "assignee_id": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Very noisy neighbours");
    assert_eq!(body["data"]["priority"], "high");
    assert_eq!(body["data"]["assignee"]["officer_id"], 1);

    let (status, body) = app
        .send(Method::PUT, &uri, Some(json!({"status_id": 2})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "status_id");

    let (status, body) = app
        .send(Method::PUT, &uri, Some(json!({"assignee_id": 5})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Assignee not found");

    let (status, _) = app
        .send(Method::PUT, "/api/issues/404", Some(json!({"title": "Nope"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_issue() {
    let app = spawn_app().await;
    let id = app.create_issue("Abandoned car").await;
    let uri = format!("/api/issues/{id}");

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_length_bounds() {
    let app = spawn_app().await;
    let id = app.create_issue("Overflowing bin").await;
    let uri = format!("/api/issues/{id}/comment");

    let (status, body) = app
        .send(
            Method::POST,
            &uri,
            Some(json!({"user_id": 1, "content": "c".repeat(2000)})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["full_name"], "John Doe");
    assert_eq!(body["data"]["issue"]["issue_id"], id);

    let (status, body) = app
        .send(
            Method::POST,
            &uri,
            Some(json!({"user_id": 1, "content": "c".repeat(2001)})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!([{"field": "content", "message": "content must be at most 2000 characters"}])
    );

    let (status, body) = app
        .send(
            Method::POST,
            "/api/issues/321/comment",
            Some(json!({"user_id": 1, "content": "hello"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Issue not found");

    let (status, body) = app
        .send(
            Method::POST,
            &uri,
            Some(json!({"user_id": 8, "content": "hello"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = spawn_app().await;
    let id = app.create_issue("Blocked drain").await;

    for content in ["reported again", "still blocked"] {
        let (status, _) = app
            .send(
                Method::POST,
                &format!("/api/issues/{id}/comment"),
                Some(json!({"user_id": 1, "content": content})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = app
        .send(Method::GET, &format!("/api/issues/{id}/comments"), None)
        .await;
    let comments = body["data"].as_array().unwrap();
    assert_eq!(comments[0]["content"], "still blocked");
    assert_eq!(comments[1]["content"], "reported again");
    let comment_id = comments[0]["comment_id"].as_i64().unwrap();
    let uri = format!("/api/comments/{comment_id}");

    let (status, body) = app
        .send(Method::PUT, &uri, Some(json!({"content": "cleared"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["content"], "cleared");

    let (status, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["issue"]["title"], "Blocked drain");

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Comment not found");

    let (status, body) = app.send(Method::GET, "/api/comments/zero", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid comment ID");
}

#[tokio::test]
async fn test_list_officers() {
    let app = spawn_app().await;
    app.store
        .create_officer(&PersonDraft {
            full_name: "Sam Patel".to_string(),
        })
        .await
        .unwrap();

    let (status, body) = app.send(Method::GET, "/api/officers", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["full_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Jane Smith", "Sam Patel"]);
}
