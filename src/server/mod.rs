//! Development Notes API
//!
//! In-memory implementation of the notes API the widget talks to, built with Axum.
//!
//! # Endpoints
//!
//! ## Notes
//! - `GET /notes` - List all notes
//! - `POST /notes` - Create a note (session required)
//! - `GET /notes/:id` - Get a note
//! - `PUT /notes/:id` - Update a note
//! - `DELETE /notes/:id` - Delete a note
//!
//! ## Chat
//! - `POST /notes/ai` - Ask the assistant
//!
//! ## Accounts
//! - `POST /register`, `POST /login`, `GET /logout`
//!
//! ## Health
//! - `GET /health`

pub mod assistant;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use assistant::{Assistant, AssistantError, NotesAssistant};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        // Note routes
        .route(
            "/notes",
            get(routes::notes::list_notes).post(routes::notes::create_note),
        )
        .route(
            "/notes/:id",
            get(routes::notes::get_note)
                .put(routes::notes::update_note)
                .delete(routes::notes::delete_note),
        )
        // Chat route
        .route("/notes/ai", post(routes::ai::chat))
        // Account routes
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", get(routes::auth::logout))
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        // Mirrors the request origin and allows credentials, so the browser
        // widget can send its session cookie cross-origin
        .layer(CorsLayer::very_permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Notes API listening on {}", addr);
    serve_with_listener(listener, state, shutdown_signal()).await?;

    tracing::info!("Notes API shut down gracefully");
    Ok(())
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_with_listener(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ApiError> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        build_router(AppState::new())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Register and log in, returning the `Cookie` header value
    async fn login(app: &Router) -> String {
        let body = r#"{"username": "alice", "password": "secret"}"#;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/login", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["notes"], 0);
    }

    #[tokio::test]
    async fn test_list_notes_empty() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/notes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_note_requires_session() {
        let response = create_test_app()
            .oneshot(json_request("POST", "/notes", r#"{"title": "T", "content": "C"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "User not logged in!");
    }

    #[tokio::test]
    async fn test_create_list_update_delete() {
        let app = create_test_app();
        let cookie = login(&app).await;

        let mut request = json_request("POST", "/notes", r#"{"title": "T", "content": "C"}"#);
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/notes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let notes = body_json(response).await;
        assert_eq!(notes.as_array().unwrap().len(), 1);
        assert_eq!(notes[0]["title"], "T");
        assert_eq!(notes[0]["content"], "C");
        let id = notes[0]["notes_id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/notes/{}", id),
                r#"{"title": "T2", "content": "C2"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/notes/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["title"], "T2");

        let delete = || {
            Request::builder()
                .method("DELETE")
                .uri(format!("/notes/{}", id))
                .body(Body::empty())
                .unwrap()
        };
        let response = app.clone().oneshot(delete()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(delete()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Not found");
    }

    #[tokio::test]
    async fn test_duplicate_register_and_bad_login() {
        let app = create_test_app();
        login(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/register",
                r#"{"username": "alice", "password": "x"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                r#"{"username": "alice", "password": "wrong"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let app = create_test_app();
        let cookie = login(&app).await;

        let mut request = Request::builder().uri("/logout").body(Body::empty()).unwrap();
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut request = json_request("POST", "/notes", r#"{"title": "T", "content": "C"}"#);
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_chat_replies_with_ai_field() {
        let response = create_test_app()
            .oneshot(json_request("POST", "/notes/ai", r#"{"prompt": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await["AI"],
            "You don't have any notes yet."
        );
    }

    struct OfflineAssistant;

    #[async_trait::async_trait]
    impl Assistant for OfflineAssistant {
        async fn reply(
            &self,
            _prompt: &str,
            _notes: &[crate::models::Note],
        ) -> Result<String, AssistantError> {
            Err(AssistantError::Unavailable("model offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_chat_backend_failure_is_503() {
        let app = build_router(AppState::with_assistant(Arc::new(OfflineAssistant)));
        let response = app
            .oneshot(json_request("POST", "/notes/ai", r#"{"prompt": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("model offline"));
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_prompt() {
        let response = create_test_app()
            .oneshot(json_request("POST", "/notes/ai", r#"{"prompt": "  "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_note() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/notes/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
