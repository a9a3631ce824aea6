//! HTTP layer: chat endpoint, health probe, and status page.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use finrag_core::{ChatTurn, QueryEngine, SourceRef};

/// Shared handler state: the fully built engine.
///
/// The engine is constructed before the listener binds, so every request that
/// reaches a handler sees initialized, read-only state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
}

/// Listener address configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5001 }
    }
}

/// Body of a `POST /api/chat` request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub user_id: Option<String>,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

/// Body of a successful `POST /api/chat` response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub sources: Vec<SourceRef>,
    pub glossary_terms: IndexMap<String, String>,
    pub market_data: IndexMap<String, String>,
    pub timestamp: String,
}

/// JSON error body for client errors.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run_server(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for finrag server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("finrag server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> impl IntoResponse {
    Html(include_str!("../assets/index.html"))
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "finrag"}))
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorBody>)> {
    if request.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody { error: "No message provided".to_string() }),
        ));
    }

    let started = Instant::now();
    let response = state.engine.handle_query(&request.message, &request.chat_history).await;

    let user_id = request.user_id.as_deref().unwrap_or("anonymous");
    info!(
        user_id,
        query = %request.message,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "chat request processed"
    );

    Ok(Json(ChatResponse {
        response: response.answer,
        sources: response.sources,
        glossary_terms: response.glossary_terms,
        market_data: response.market_data,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
