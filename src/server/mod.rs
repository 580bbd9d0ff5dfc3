//! HTTP surface: `POST /chat`, the embedded chat page and a health probe.

use crate::core::engine::ChatEngine;
use crate::domain::model::{ChatReply, ChatRequest};
use crate::domain::ports::AlertStore;
use crate::utils::error::{ChatError, ErrorCategory, Result};
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

const INDEX_HTML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html"));

pub fn build_router<S: AlertStore + 'static>(engine: Arc<ChatEngine<S>>) -> Router {
    Router::new()
        .route("/", get(serve_chat_ui))
        .route("/health", get(health))
        .route("/chat", post(chat_handler::<S>))
        .with_state(engine)
        .layer(axum::middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
}

pub async fn serve<S: AlertStore + 'static>(engine: Arc<ChatEngine<S>>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Chat endpoint listening on http://{}/chat", addr);

    axum::serve(listener, build_router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        "{} {} -> {} ({:?})",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

async fn health() -> &'static str {
    "OK"
}

async fn serve_chat_ui() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn chat_handler<S: AlertStore + 'static>(
    State(engine): State<Arc<ChatEngine<S>>>,
    Json(request): Json<ChatRequest>,
) -> std::result::Result<Json<ChatReply>, ChatError> {
    tracing::debug!("💬 Incoming message: {:?}", request.message);
    let reply = engine.respond(&request.message).await?;
    Ok(Json(reply))
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match self.category() {
            ErrorCategory::Database => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCategory::Configuration | ErrorCategory::Io => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(
            "❌ Chat request failed: {} (Category: {:?}, Severity: {:?})",
            self,
            self.category(),
            self.severity()
        );

        let body = serde_json::json!({ "error": self.user_friendly_message() });
        (status, Json(body)).into_response()
    }
}
