use axum::{Router, routing::get};
use axum_helpers::{create_router, health_router};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;

/// Domain routes without the API prefix; `create_router` nests them.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/tasks", domain_tasks::handlers::router(state.tasks.clone()))
        .nest(
            "/progress",
            domain_tasks::handlers::progress_router(state.tasks.clone()),
        )
        .nest(
            "/categories",
            domain_categories::handlers::router(state.categories.clone()),
        )
        .nest("/tags", domain_tags::handlers::router(state.tags.clone()))
        .nest(
            "/reminders",
            domain_reminders::handlers::router(state.reminders.clone()),
        )
}

/// `/ready` needs the database, so it carries its own state
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The complete application: prefixed domain routes, OpenAPI document,
/// `/`, `/health` and `/ready`.
pub fn app(state: &AppState) -> io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use core_config::{app_info, server::ServerConfig};
    use database::sql::SqlConfig;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use test_utils::TestDatabase;
    use tower::ServiceExt;

    async fn test_app() -> (TestDatabase, Router) {
        let db = TestDatabase::new().await;
        let config = Config {
            app: app_info!(),
            database: SqlConfig::new("sqlite::memory:"),
            server: ServerConfig::default(),
            environment: Environment::Development,
        };
        let state = AppState::new(config, db.connection());
        let app = app(&state).unwrap();
        (db, app)
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let (_db, app) = test_app().await;

        let (status, body) = call(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "taskboard_api");

        let (status, body) = call(&app, get("/ready")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "connected");

        let (status, body) = call(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    async fn test_domain_routes_share_one_database() {
        let (_db, app) = test_app().await;

        let request = Request::post("/api/v1/tasks")
            .header("content-type", "application/json")
            .body(Body::from(json!({"title": "write report"}).to_string()))
            .unwrap();
        let (status, task) = call(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = task["id"].as_i64().unwrap();

        let request = Request::post("/api/v1/reminders")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"task_id": id, "remind_at": "2030-01-01T09:00:00Z"}).to_string(),
            ))
            .unwrap();
        let (status, _) = call(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, progress) = call(&app, get(&format!("/api/v1/progress/tasks/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(progress["progress"], 0);

        let (status, _) = call(&app, get("/api/v1/unknown")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_lists_every_domain() {
        let (_db, app) = test_app().await;

        let (status, doc) = call(&app, get(axum_helpers::OPENAPI_PATH)).await;
        assert_eq!(status, StatusCode::OK);
        let paths = doc["paths"].as_object().unwrap();
        for prefix in ["/tasks", "/progress", "/categories", "/tags", "/reminders"] {
            assert!(
                paths.keys().any(|path| path.starts_with(prefix)),
                "no paths under {prefix}"
            );
        }
    }
}
