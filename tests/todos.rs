mod common;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use common::TestApp;

fn id_of(todo: &Value) -> String {
    todo["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_then_list_round_trips() {
    let app = TestApp::new();

    let created = app.add("alice", "x", "2026-03-01T09:00:00Z").await;
    assert_eq!(created["task"], "x");
    assert_eq!(created["done"], false);
    assert_eq!(created["user"], "alice");

    let todos = app.list("alice").await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["id"], created["id"]);
    assert_eq!(todos[0]["task"], "x");
    assert_eq!(todos[0]["done"], false);
    assert_eq!(todos[0]["dueDate"], "2026-03-01T09:00:00Z");
    assert!(todos[0]["createdAt"].is_string());
    assert!(todos[0]["updatedAt"].is_string());
}

#[tokio::test]
async fn list_is_ordered_by_due_date() {
    let app = TestApp::new();
    app.add("alice", "third", "2026-05-01").await;
    app.add("alice", "first", "2026-01-01").await;
    app.add("alice", "second", "2026-03-01").await;

    let tasks: Vec<Value> = app
        .list("alice")
        .await
        .into_iter()
        .map(|t| t["task"].clone())
        .collect();

    assert_eq!(tasks, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn list_never_shows_other_owners_items() {
    let app = TestApp::new();
    app.add("alice", "alice's", "2026-03-01").await;

    assert!(app.list("bob").await.is_empty());
    assert_eq!(app.list("alice").await.len(), 1);
}

#[tokio::test]
async fn empty_task_is_400_and_creates_nothing() {
    let app = TestApp::new();
    let token = app.token("alice");

    let (status, body) = app
        .send(
            Method::POST,
            "/add",
            Some(&token),
            Some(json!({ "task": "", "dueDate": "2026-03-01" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Task and due date are required");
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn missing_due_date_is_400_on_both_create_paths() {
    let app = TestApp::new();
    let token = app.token("alice");

    for uri in ["/add", "/api/todos"] {
        let (status, body) = app
            .send(Method::POST, uri, Some(&token), Some(json!({ "task": "x" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "Task and due date are required", "{uri}");
    }
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn malformed_due_date_is_400() {
    let app = TestApp::new();
    let token = app.token("alice");

    let (status, body) = app
        .send(
            Method::POST,
            "/add",
            Some(&token),
            Some(json!({ "task": "x", "dueDate": "soon" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("dueDate"));
}

#[tokio::test]
async fn non_json_body_is_400_with_message() {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let app = TestApp::new();
    let token = app.token("alice");

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/add")
                .header("x-auth-token", token)
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn create_without_content_type_reports_missing_fields() {
    let app = TestApp::new();
    let token = app.token("alice");

    for uri in ["/add", "/api/todos"] {
        let (status, body) = app.send(Method::POST, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "message": "Task and due date are required" }), "{uri}");
    }
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn update_without_content_type_reports_missing_task() {
    let app = TestApp::new();
    let token = app.token("alice");
    let id = id_of(&app.add("alice", "keep me", "2026-03-01").await);

    let (status, body) = app
        .send(Method::PUT, &format!("/update/{id}"), Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Task is required");
    assert_eq!(app.list("alice").await[0]["task"], "keep me");
}

#[tokio::test]
async fn toggle_twice_restores_done() {
    let app = TestApp::new();
    let token = app.token("alice");
    let id = id_of(&app.add("alice", "x", "2026-03-01").await);

    let (status, once) = app
        .send(Method::PUT, &format!("/edit/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(once["done"], true);

    let (status, twice) = app
        .send(Method::PUT, &format!("/edit/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(twice["done"], false);
}

#[tokio::test]
async fn update_changes_task_only() {
    let app = TestApp::new();
    let token = app.token("alice");
    let created = app.add("alice", "draft", "2026-03-01T12:00:00Z").await;
    let id = id_of(&created);

    app.send(Method::PUT, &format!("/edit/{id}"), Some(&token), None)
        .await;

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/update/{id}"),
            Some(&token),
            Some(json!({ "task": "final" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["task"], "final");
    assert_eq!(updated["done"], true);
    assert_eq!(updated["dueDate"], created["dueDate"]);
}

#[tokio::test]
async fn update_with_blank_task_is_400() {
    let app = TestApp::new();
    let token = app.token("alice");
    let id = id_of(&app.add("alice", "keep me", "2026-03-01").await);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/update/{id}"),
            Some(&token),
            Some(json!({ "task": "  " })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.list("alice").await[0]["task"], "keep me");
}

#[tokio::test]
async fn update_of_foreign_item_is_404_and_leaves_it_untouched() {
    let app = TestApp::new();
    let id = id_of(&app.add("alice", "private", "2026-03-01").await);
    let mallory = app.token("mallory");

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/update/{id}"),
            Some(&mallory),
            Some(json!({ "task": "pwned" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo not found");

    let todos = app.list("alice").await;
    assert_eq!(todos[0]["task"], "private");
}

#[tokio::test]
async fn foreign_toggle_and_delete_are_404() {
    let app = TestApp::new();
    let id = id_of(&app.add("alice", "private", "2026-03-01").await);
    let mallory = app.token("mallory");

    let (status, _) = app
        .send(Method::PUT, &format!("/edit/{id}"), Some(&mallory), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::DELETE, &format!("/delete/{id}"), Some(&mallory), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let todos = app.list("alice").await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["done"], false);
}

#[tokio::test]
async fn second_delete_is_404() {
    let app = TestApp::new();
    let token = app.token("alice");
    let id = id_of(&app.add("alice", "x", "2026-03-01").await);

    let (status, body) = app
        .send(Method::DELETE, &format!("/delete/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Todo deleted successfully" }));

    let (status, body) = app
        .send(Method::DELETE, &format!("/delete/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo not found");
}

#[tokio::test]
async fn undecodable_id_is_404() {
    let app = TestApp::new();
    let token = app.token("alice");

    let (status, body) = app
        .send(Method::PUT, "/edit/%%%", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo not found");
}

#[tokio::test]
async fn api_todos_paths_share_semantics() {
    let app = TestApp::new();
    let token = app.token("alice");

    let (status, created) = app
        .send(
            Method::POST,
            "/api/todos",
            Some(&token),
            Some(json!({ "task": "rest", "dueDate": "2026-04-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = id_of(&created);

    let (status, listed) = app.send(Method::GET, "/api/todos", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, toggled) = app
        .send(Method::PUT, &format!("/api/todos/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["done"], true);

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/api/todos/update/{id}"),
            Some(&token),
            Some(json!({ "task": "renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["task"], "renamed");

    let (status, removed) = app
        .send(Method::DELETE, &format!("/api/todos/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], created["id"]);
    assert_eq!(removed["task"], "renamed");

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/todos/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_ids_do_not_expose_row_numbers() {
    let app = TestApp::new();
    let id = id_of(&app.add("alice", "x", "2026-03-01").await);

    assert_ne!(id, "1");
    assert!(id.len() >= 10);
}
