use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::ChatSessionGateway;
use crate::domain::{GatewayError, Persona, Turn};

use super::dto::{ChatRequest, ChatResponse, HealthResponse};

const INVALID_BODY_MESSAGE: &str = "El cuerpo de la solicitud no es válido.";

/// State shared by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ChatSessionGateway>,
    pub persona: Arc<Persona>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream | GatewayError::Transport => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ChatResponse {
            response: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Build the HTTP API: `POST /chat` and `GET /health`, open CORS.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Backend listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, GatewayError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("chat", %request_id);

    handle_chat(state, payload).instrument(span).await
}

async fn handle_chat(
    state: AppState,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, GatewayError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected /chat body: {}", e.body_text());
        GatewayError::validation(INVALID_BODY_MESSAGE)
    })?;

    let history: Vec<Turn> = request.history.into_iter().map(Turn::from).collect();
    let reply = state
        .gateway
        .exchange(&request.message, &history, &state.persona)
        .await?;

    Ok(Json(ChatResponse { response: reply }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
