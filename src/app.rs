use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{ai, auth, entries};

pub fn build_app<Store: SessionStore + Clone>(
    state: AppState,
    session_layer: SessionManagerLayer<Store>,
) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(entries::router())
                .merge(ai::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

/// Session layer backed by an in-process store, for tests.
#[cfg(test)]
pub fn memory_session_layer() -> SessionManagerLayer<tower_sessions::MemoryStore> {
    SessionManagerLayer::new(tower_sessions::MemoryStore::default()).with_secure(false)
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "3000".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    fn test_app(db: SqlitePool) -> Router {
        build_app(AppState::fake(db), memory_session_layer())
    }

    async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn registration() -> Value {
        json!({ "name": "Ada", "email": "ada@ex.com", "password": "secret1" })
    }

    #[sqlx::test]
    async fn register_creates_a_user(db: SqlitePool) {
        let app = test_app(db);
        let (status, body) = post_json(&app, "/api/register", registration()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert!(body["userId"].is_i64());
    }

    #[sqlx::test]
    async fn duplicate_email_is_rejected_regardless_of_case(db: SqlitePool) {
        let app = test_app(db);
        let (status, _) = post_json(&app, "/api/register", registration()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_json(
            &app,
            "/api/register",
            json!({ "name": "Ada", "email": " Ada@Ex.com ", "password": "secret1" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("already exists"));
    }

    #[sqlx::test]
    async fn wrong_password_and_unknown_email_answer_identically(db: SqlitePool) {
        let app = test_app(db);
        post_json(&app, "/api/register", registration()).await;

        let (wrong_pw_status, wrong_pw_body) = post_json(
            &app,
            "/api/login",
            json!({ "email": "ada@ex.com", "password": "not-it" }),
        )
        .await;
        let (unknown_status, unknown_body) = post_json(
            &app,
            "/api/login",
            json!({ "email": "ghost@ex.com", "password": "whatever" }),
        )
        .await;

        assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_pw_body, unknown_body);
    }

    #[sqlx::test]
    async fn entry_operations_require_a_session(db: SqlitePool) {
        let app = test_app(db);
        let (status, body) = post_json(
            &app,
            "/api/entries",
            json!({ "apps": ["X"], "screenTime": 30, "reflection": "ok", "tags": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!("Authentication required"));
    }

    #[sqlx::test]
    async fn session_refresh_without_a_session_is_a_soft_failure(db: SqlitePool) {
        let app = test_app(db);
        let request = Request::builder()
            .uri("/api/session/refresh")
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["success"], json!(false));
    }
}
