use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use todo_api::config::Settings;
use todo_api::observability::MetricsResponse;
use todo_api::repository::InMemoryListsRepository;
use todo_api::routes::{create_router, AppState};
use todo_api::types::{AppVersion, TodoItem, TodoList};

fn server_with(settings: Settings) -> TestServer {
    let state = AppState::new(Arc::new(InMemoryListsRepository::new()), settings);
    TestServer::new(create_router(state)).unwrap()
}

fn server() -> TestServer {
    server_with(Settings::default())
}

async fn create_list(server: &TestServer, name: &str) -> TodoList {
    server
        .post("/lists")
        .json(&json!({ "name": name }))
        .await
        .json::<TodoList>()
}

async fn create_item(server: &TestServer, list_id: &str, name: &str, state: &str) -> TodoItem {
    server
        .post(&format!("/lists/{list_id}/items"))
        .json(&json!({ "name": name, "state": state }))
        .await
        .json::<TodoItem>()
}

#[tokio::test]
async fn list_lifecycle() {
    let server = server();

    let response = server
        .post("/lists")
        .json(&json!({ "name": "Groceries", "description": "Saturday" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: TodoList = response.json();
    let location = response.header(header::LOCATION);
    assert_eq!(location.to_str().unwrap(), format!("/lists/{}", created.id));

    let fetched: TodoList = server.get(&format!("/lists/{}", created.id)).await.json();
    assert_eq!(fetched.name, "Groceries");
    assert_eq!(fetched.description.as_deref(), Some("Saturday"));

    let updated: TodoList = server
        .put(&format!("/lists/{}", created.id))
        .json(&json!({ "name": "Groceries", "description": "Sunday" }))
        .await
        .json();
    assert_eq!(updated.description.as_deref(), Some("Sunday"));
    assert!(updated.updated_date.is_some());

    server
        .delete(&format!("/lists/{}", created.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/lists/{}", created.id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn deleting_list_removes_its_items() {
    let server = server();
    let list = create_list(&server, "Garden").await;
    let list_id = list.id.to_string();
    let item = create_item(&server, &list_id, "Mow lawn", "todo").await;

    server
        .delete(&format!("/lists/{list_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/lists/{list_id}/items/{}", item.id))
        .await
        .assert_status_not_found();

    let replacement = create_list(&server, "Garden").await;
    let items: Vec<TodoItem> = server
        .get(&format!("/lists/{}/items", replacement.id))
        .await
        .json();
    assert!(items.is_empty());
}

#[tokio::test]
async fn item_paging_and_state_filter() {
    let server = server();
    let list = create_list(&server, "Sprint").await;
    let list_id = list.id.to_string();

    let mut done = Vec::new();
    for i in 0..6 {
        let state = if i % 2 == 0 { "done" } else { "todo" };
        let item = create_item(&server, &list_id, &format!("task {i}"), state).await;
        if state == "done" {
            done.push(item);
        }
    }

    let page: Vec<TodoItem> = server
        .get(&format!("/lists/{list_id}/items"))
        .add_query_param("skip", 2)
        .add_query_param("batchSize", 3)
        .await
        .json();
    let names: Vec<&str> = page.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["task 2", "task 3", "task 4"]);

    let filtered: Vec<TodoItem> = server
        .get(&format!("/lists/{list_id}/state/done"))
        .await
        .json();
    assert_eq!(filtered, done);

    let second_done: Vec<TodoItem> = server
        .get(&format!("/lists/{list_id}/state/done"))
        .add_query_param("skip", 1)
        .add_query_param("batchSize", 1)
        .await
        .json();
    assert_eq!(second_done, vec![done[1].clone()]);
}

#[tokio::test]
async fn update_item_under_wrong_list_is_not_found() {
    let server = server();
    let home = create_list(&server, "Home").await;
    let work = create_list(&server, "Work").await;
    let item = create_item(&server, &home.id.to_string(), "Dishes", "todo").await;

    server
        .put(&format!("/lists/{}/items/{}", work.id, item.id))
        .json(&json!({ "name": "Dishes", "state": "done" }))
        .await
        .assert_status_not_found();

    let unchanged: TodoItem = server
        .get(&format!("/lists/{}/items/{}", home.id, item.id))
        .await
        .json();
    assert_eq!(unchanged.state, "todo");
}

#[tokio::test]
async fn version_defaults_when_unset() {
    let version: AppVersion = server().get("/version").await.json();
    assert_eq!(version.value, "v0.0.1-rc");
}

#[tokio::test]
async fn version_extracts_configured_tag() {
    let settings = Settings {
        app_version: Some("2.3.1:v1.0.0".to_string()),
        ..Settings::default()
    };

    let version: AppVersion = server_with(settings).get("/version").await.json();
    assert_eq!(version.value, "v1.0.0");
}

#[tokio::test]
async fn metrics_count_outcomes() {
    let server = server();
    let list = create_list(&server, "Counted").await;
    server.get(&format!("/lists/{}", list.id)).await;
    server
        .get(&format!("/lists/{}", uuid::Uuid::new_v4()))
        .await
        .assert_status_not_found();

    let metrics: MetricsResponse = server.get("/metrics").await.json();

    // The /metrics request is counted before its status is known.
    assert_eq!(metrics.total_requests, 4);
    assert_eq!(metrics.created_resources, 1);
    assert_eq!(metrics.successful_requests, 2);
    assert_eq!(metrics.not_found_requests, 1);
}

#[tokio::test]
async fn health_reports_repository_ok() {
    let health: serde_json::Value = server().get("/health").await.json();

    assert_eq!(health["status"], "healthy");
    assert_eq!(health["checks"]["repository"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let doc: serde_json::Value = server().get("/api-docs/openapi.json").await.json();

    assert!(doc["paths"]["/lists/{listId}/items/{itemId}"].is_object());
}
