//! HTTP-level tests for the `/categories` router

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use domain_categories::{CategoryService, SqlCategoryRepository, handlers};
use domain_tasks::{CreateTask, SqlTaskRepository, TaskService};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_category_routes() {
    let db = TestDatabase::new().await;
    let tasks = TaskService::new(SqlTaskRepository::new(db.connection()));
    let task = tasks.create_task(CreateTask::titled("t")).await.unwrap();

    let app = Router::new().nest(
        "/categories",
        handlers::router(CategoryService::new(SqlCategoryRepository::new(
            db.connection(),
        ))),
    );

    let (status, created) = send(
        &app,
        "POST",
        "/categories",
        Some(json!({"name": "Work", "color": "#123ABC"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "POST", "/categories", Some(json!({"name": "Work"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let (status, _) = send(
        &app,
        "POST",
        "/categories",
        Some(json!({"name": "Bad", "color": "blue"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", &format!("/categories/{id}/tasks/{}", task.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, linked) = send(&app, "GET", &format!("/categories/{id}/tasks"), None).await;
    assert_eq!(linked.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "POST", &format!("/categories/{id}/tasks/9999"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/categories/{id}/tasks/{}", task.id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/categories/{id}"),
        Some(json!({"name": "Office"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["color"], "#123ABC");

    let (status, _) = send(&app, "DELETE", &format!("/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, list) = send(&app, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());
}
